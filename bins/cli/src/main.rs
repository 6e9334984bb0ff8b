//! CLI binary entrypoint.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand};
use commands::{
    run_build_all_command, run_build_flutter_command, run_dev_config, run_dev_health, run_info,
    run_serve, run_settings, run_verify_structure_command,
};
use deploy_probe_config::ProbeSettings;
use deploy_probe_infra::init_tracing;
use error::{CliError, ExitCode};
use format::{OutputArgs, OutputMode};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "deploy-probe",
    version,
    about = "Deployment health probes and build pipelines",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    /// Project root for pipelines (overrides `DEPLOY_PROBE_PROJECT_ROOT`).
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve both dev functions over HTTP.
    Serve {
        /// Listen address (overrides `DEPLOY_PROBE_BIND`).
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Validate the deployment configuration once against this environment.
    DevConfig {
        /// Request method to simulate.
        #[arg(long, default_value = "GET")]
        method: String,
    },
    /// Report deployment health once against this environment.
    DevHealth {
        /// Request method to simulate.
        #[arg(long, default_value = "GET")]
        method: String,
        /// Client context JSON, as the platform would pass it.
        #[arg(long)]
        client_context: Option<String>,
    },
    /// Build the mobile and web apps, tolerating failures.
    BuildAll,
    /// Regenerate Flutter dependencies and smoke-build the mobile app.
    BuildFlutter,
    /// Check the repository layout and Flutter toolchain.
    VerifyStructure,
    /// Show the effective probe settings.
    Settings,
    /// Show build and version details.
    Info,
}

pub(crate) struct CliOutput {
    stdout: String,
    stderr: String,
    exit_code: ExitCode,
}

impl CliOutput {
    pub(crate) const fn stdout(stdout: String, exit_code: ExitCode) -> Self {
        Self {
            stdout,
            stderr: String::new(),
            exit_code,
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(error) => return exit_with_error(&error),
    };
    if let Err(error) = init_tracing(&settings.log_filter, settings.log_format) {
        return exit_with_error(&error.into());
    }
    tracing::debug!(event = "cli.command", command = ?cli.command, "running command");

    match run(&cli.command, mode, &settings) {
        Ok(output) => match write_output(&output) {
            Ok(()) => std::process::ExitCode::from(output.exit_code.as_u8()),
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

/// Env settings with command-line overrides applied.
fn resolve_settings(cli: &Cli) -> Result<ProbeSettings, CliError> {
    let mut settings = ProbeSettings::from_std_env()?;
    if let Some(root) = &cli.project_root {
        settings.project_root = Some(root.clone());
    }
    if let Commands::Serve { bind: Some(bind) } = &cli.command {
        settings.bind = *bind;
    }
    Ok(settings)
}

fn run(
    command: &Commands,
    mode: OutputMode,
    settings: &ProbeSettings,
) -> Result<CliOutput, CliError> {
    match command {
        Commands::Serve { .. } => run_serve(settings),
        Commands::DevConfig { method } => run_dev_config(mode, method),
        Commands::DevHealth {
            method,
            client_context,
        } => run_dev_health(mode, method, client_context.as_deref()),
        Commands::BuildAll => run_build_all_command(mode, project_root(settings)?),
        Commands::BuildFlutter => run_build_flutter_command(mode, project_root(settings)?),
        Commands::VerifyStructure => run_verify_structure_command(mode, project_root(settings)?),
        Commands::Settings => run_settings(mode, settings),
        Commands::Info => run_info(mode),
    }
}

/// The configured root made absolute against the current directory, so the
/// same path is seen after pipeline steps change directory.
fn project_root(settings: &ProbeSettings) -> Result<PathBuf, CliError> {
    match &settings.project_root {
        Some(root) => Ok(std::path::absolute(root)?),
        None => Ok(std::env::current_dir()?),
    }
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;

    if !output.stderr.is_empty() {
        let mut stderr = io::stderr();
        stderr.write_all(output.stderr.as_bytes())?;
        stderr.flush()?;
    }

    Ok(())
}
