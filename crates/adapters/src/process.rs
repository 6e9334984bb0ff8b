//! Child process adapter.

use deploy_probe_ports::{CommandRunner, CommandSpec, CommandStatus, StdioMode};
use deploy_probe_shared::{ErrorCode, ErrorEnvelope, Result};
use std::io;
use std::process::{Command, Stdio};

/// Runs commands with `std::process`, blocking until they exit.
///
/// Arguments are passed directly to the program; no shell is involved.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCommandRunner;

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus> {
        // A missing cwd fails the spawn with NotFound too; report it as such.
        if !spec.cwd.is_dir() {
            return Err(ErrorEnvelope::unexpected(
                ErrorCode::new("process", "cwd_not_found"),
                format!("cannot run {spec}: no such directory {}", spec.cwd.display()),
            )
            .with_metadata("program", spec.program.display().to_string())
            .with_metadata("cwd", spec.cwd.display().to_string()));
        }

        let mut command = Command::new(&spec.program);
        command.args(&spec.args).current_dir(&spec.cwd);
        match spec.stdio {
            StdioMode::Inherit => {},
            StdioMode::Quiet => {
                command
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());
            },
            StdioMode::StdoutToStderr => {
                command.stdout(Stdio::from(io::stderr()));
            },
        }

        let status = command
            .status()
            .map_err(|error| spawn_error(spec, &error))?;
        tracing::debug!(
            command = %spec,
            code = ?status.code(),
            "child process exited"
        );
        Ok(CommandStatus {
            code: status.code(),
        })
    }
}

fn spawn_error(spec: &CommandSpec, error: &io::Error) -> ErrorEnvelope {
    let code = match error.kind() {
        io::ErrorKind::NotFound => ErrorCode::new("process", "program_not_found"),
        io::ErrorKind::PermissionDenied => ErrorCode::permission_denied(),
        _ => ErrorCode::new("process", "spawn_failed"),
    };
    ErrorEnvelope::unexpected(code, format!("failed to run {spec}: {error}"))
        .with_metadata("program", spec.program.display().to_string())
        .with_metadata("cwd", spec.cwd.display().to_string())
}
