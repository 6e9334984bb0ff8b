//! Child process boundary contract.

use deploy_probe_shared::Result;
use std::fmt;
use std::path::PathBuf;

/// How a child's standard streams are wired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StdioMode {
    /// Share the parent's terminal so build output streams live.
    #[default]
    Inherit,
    /// Discard output; only the exit status matters.
    Quiet,
    /// Send the child's stdout to the parent's stderr, keeping stdout free
    /// for a machine-readable report.
    StdoutToStderr,
}

/// A fully specified command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path; bare names resolve through `PATH`.
    pub program: PathBuf,
    /// Arguments, passed without shell interpretation.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: PathBuf,
    /// Stream wiring.
    pub stdio: StdioMode,
}

impl CommandSpec {
    /// Start a spec for `program` in `cwd` with inherited output.
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
            stdio: StdioMode::Inherit,
        }
    }

    /// Append arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Discard the child's output.
    #[must_use]
    pub fn quiet(self) -> Self {
        self.stdio(StdioMode::Quiet)
    }

    /// Set the stream wiring.
    #[must_use]
    pub fn stdio(mut self, stdio: StdioMode) -> Self {
        self.stdio = stdio;
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.program.display())?;
        for arg in &self.args {
            write!(formatter, " {arg}")?;
        }
        Ok(())
    }
}

/// How a child that did start finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code; `None` when the child was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandStatus {
    /// A zero exit.
    pub const SUCCESS: Self = Self { code: Some(0) };

    /// True for a zero exit.
    #[must_use]
    pub const fn success(self) -> bool {
        matches!(self.code, Some(0))
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(formatter, "exit code {code}"),
            None => formatter.write_str("terminated by signal"),
        }
    }
}

/// Runs child processes to completion.
///
/// `Err` means the process could not be started at all (missing binary,
/// bad working directory); a started process always yields `Ok`.
pub trait CommandRunner: Send + Sync {
    /// Run `spec` and wait for it.
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_displays_as_command_line() {
        let spec = CommandSpec::new("flutter", "apps/mobile").args(["build", "apk", "--debug"]);
        assert_eq!(spec.to_string(), "flutter build apk --debug");
        assert_eq!(spec.stdio, StdioMode::Inherit);
        assert_eq!(spec.clone().quiet().stdio, StdioMode::Quiet);
        assert_eq!(
            spec.stdio(StdioMode::StdoutToStderr).stdio,
            StdioMode::StdoutToStderr
        );
    }

    #[test]
    fn status_success_needs_zero_code() {
        assert!(CommandStatus::SUCCESS.success());
        assert!(!CommandStatus { code: Some(1) }.success());
        assert!(!CommandStatus { code: None }.success());
        assert_eq!(CommandStatus { code: None }.to_string(), "terminated by signal");
    }
}
