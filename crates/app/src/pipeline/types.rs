//! Pipeline definitions and results.

use deploy_probe_core::HostOs;
use deploy_probe_ports::StdioMode;
use serde::Serialize;
use std::path::PathBuf;

/// What a step does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepAction {
    /// Run a program to completion.
    Run {
        /// Program name or path.
        program: PathBuf,
        /// Arguments.
        args: Vec<String>,
        /// Directory relative to the current one, for this step only.
        dir: Option<PathBuf>,
        /// Child stream wiring.
        stdio: StdioMode,
    },
    /// Move the working directory for every later step.
    ChangeDir(PathBuf),
    /// Report whether a file exists. Never fails the step.
    ExpectFile {
        /// Path relative to the current directory.
        path: PathBuf,
        /// Notice when found.
        found: String,
        /// Notice when missing.
        missing: String,
    },
    /// Print a notice.
    Notice(String),
}

/// One pipeline step and its failure policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Display name.
    pub name: String,
    /// Action.
    pub action: StepAction,
    /// A failing critical step aborts the pipeline; others are logged and skipped past.
    pub critical: bool,
    /// Only run on this host; elsewhere the step is skipped.
    pub host: Option<HostOs>,
    /// Skip notice when the host does not match.
    pub skip_notice: Option<String>,
}

impl Step {
    fn new(name: impl Into<String>, action: StepAction) -> Self {
        Self {
            name: name.into(),
            action,
            critical: true,
            host: None,
            skip_notice: None,
        }
    }

    /// A command step, critical by default.
    pub fn run<I, S>(name: impl Into<String>, program: impl Into<PathBuf>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            StepAction::Run {
                program: program.into(),
                args: args.into_iter().map(Into::into).collect(),
                dir: None,
                stdio: StdioMode::Inherit,
            },
        )
    }

    /// A working-directory change, critical by default.
    pub fn change_dir(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self::new(name, StepAction::ChangeDir(dir.into()))
    }

    /// A logged existence check.
    pub fn expect_file(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        found: impl Into<String>,
        missing: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            StepAction::ExpectFile {
                path: path.into(),
                found: found.into(),
                missing: missing.into(),
            },
        )
    }

    /// A notice.
    pub fn notice(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(name, StepAction::Notice(message.into()))
    }

    /// Run a command step in `dir` (relative to the current directory).
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        if let StepAction::Run { dir: slot, .. } = &mut self.action {
            *slot = Some(dir.into());
        }
        self
    }

    /// Failures are logged and the pipeline continues.
    #[must_use]
    pub fn non_critical(mut self) -> Self {
        self.critical = false;
        self
    }

    /// Restrict the step to one host OS.
    #[must_use]
    pub fn only_on(mut self, host: HostOs, skip_notice: impl Into<String>) -> Self {
        self.host = Some(host);
        self.skip_notice = Some(skip_notice.into());
        self
    }
}

/// How a pipeline's progress is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Each step is announced and its result reported.
    Announced,
    /// Only notices and child output are shown.
    Plain,
}

/// An ordered list of steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    /// Stable pipeline name.
    pub name: &'static str,
    /// Opening line.
    pub banner: String,
    /// Steps, run strictly in order.
    pub steps: Vec<Step>,
    /// Closing lines printed when the pipeline was not aborted.
    pub summary: Vec<String>,
    /// Prefix for the abort line.
    pub abort_prefix: String,
    /// Progress presentation.
    pub presentation: Presentation,
}

impl Pipeline {
    /// Apply `stdio` to every command step.
    #[must_use]
    pub fn with_child_stdio(mut self, stdio: StdioMode) -> Self {
        for step in &mut self.steps {
            if let StepAction::Run { stdio: slot, .. } = &mut step.action {
                *slot = stdio;
            }
        }
        self
    }
}

/// Result of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum StepOutcome {
    /// The step completed.
    Succeeded,
    /// The step failed.
    Failed {
        /// Failure description.
        reason: String,
    },
    /// The step did not apply on this host.
    Skipped {
        /// Skip notice.
        reason: String,
    },
    /// An existence check ran.
    Checked {
        /// Whether the file was found.
        found: bool,
    },
    /// A notice was shown.
    Noted,
}

impl StepOutcome {
    /// Failure description, if the step failed.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed { reason } => Some(reason),
            _ => None,
        }
    }
}

/// A step's recorded result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepRecord {
    /// Step name.
    pub name: String,
    /// Failure policy at the time it ran.
    pub critical: bool,
    /// Outcome.
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Where and why a pipeline stopped early.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Abort {
    /// Name of the failing critical step.
    pub step: String,
    /// Failure description.
    pub reason: String,
}

/// Result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    /// Pipeline name.
    pub pipeline: &'static str,
    /// Steps that ran, in order. Steps after an abort are absent.
    pub steps: Vec<StepRecord>,
    /// Set when a critical step failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<Abort>,
}

impl PipelineReport {
    /// True unless a critical step failed.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.aborted.is_none()
    }

    /// Number of non-critical failures that were tolerated.
    #[must_use]
    pub fn tolerated_failures(&self) -> usize {
        self.steps
            .iter()
            .filter(|record| !record.critical && record.outcome.failure().is_some())
            .count()
    }
}

/// Progress notifications, in the order they happen.
#[derive(Debug, Clone, Copy)]
pub enum PipelineEvent<'a> {
    /// The pipeline is starting.
    Started(&'a Pipeline),
    /// A step is about to run.
    StepStarted(&'a Pipeline, &'a Step),
    /// A step finished.
    StepFinished(&'a Pipeline, &'a Step, &'a StepOutcome),
    /// A critical step failed; nothing else runs.
    Aborted(&'a Pipeline, &'a Abort),
    /// The pipeline ran to the end.
    Completed(&'a Pipeline, &'a PipelineReport),
}
