//! Sequential step runner with a per-step failure policy.
//!
//! Steps never run in parallel and nothing is rolled back. A failing
//! critical step ends the run; a failing non-critical step is logged and the
//! next step runs.

mod catalog;
mod types;

pub use catalog::{
    BUILD_ALL, BUILD_FLUTTER, FLUTTER_DIR, WEB_DIR, build_all_pipeline, build_flutter_pipeline,
};
pub use types::{
    Abort, Pipeline, PipelineEvent, PipelineReport, Presentation, Step, StepAction, StepOutcome,
    StepRecord,
};

use deploy_probe_core::HostOs;
use deploy_probe_ports::{CommandRunner, CommandSpec, FileProbe};
use std::path::PathBuf;
use std::sync::Arc;

/// Dependencies shared by the pipelines and the structure check.
#[derive(Clone)]
pub struct PipelineDeps {
    /// Child process runner.
    pub runner: Arc<dyn CommandRunner>,
    /// Filesystem probe.
    pub files: Arc<dyn FileProbe>,
    /// Host the steps run on.
    pub host_os: HostOs,
    /// Directory every relative path starts from.
    pub project_root: PathBuf,
}

/// Run `pipeline` to completion or to its first critical failure.
#[tracing::instrument(skip_all, fields(pipeline = pipeline.name))]
pub fn run_pipeline(
    deps: &PipelineDeps,
    pipeline: &Pipeline,
    observer: &mut dyn FnMut(&PipelineEvent<'_>),
) -> PipelineReport {
    tracing::info!(
        event = "pipeline.started",
        steps = pipeline.steps.len(),
        root = %deps.project_root.display(),
        "pipeline started"
    );
    observer(&PipelineEvent::Started(pipeline));

    let mut cwd = deps.project_root.clone();
    let mut steps = Vec::with_capacity(pipeline.steps.len());

    for step in &pipeline.steps {
        observer(&PipelineEvent::StepStarted(pipeline, step));
        let outcome = execute_step(deps, step, &mut cwd);
        log_outcome(step, &outcome);
        observer(&PipelineEvent::StepFinished(pipeline, step, &outcome));

        let abort = step
            .critical
            .then(|| outcome.failure())
            .flatten()
            .map(|reason| Abort {
                step: step.name.clone(),
                reason: reason.to_owned(),
            });
        steps.push(StepRecord {
            name: step.name.clone(),
            critical: step.critical,
            outcome,
        });

        if let Some(abort) = abort {
            tracing::error!(
                event = "pipeline.aborted",
                step = %abort.step,
                reason = %abort.reason,
                "pipeline aborted"
            );
            observer(&PipelineEvent::Aborted(pipeline, &abort));
            return PipelineReport {
                pipeline: pipeline.name,
                steps,
                aborted: Some(abort),
            };
        }
    }

    let report = PipelineReport {
        pipeline: pipeline.name,
        steps,
        aborted: None,
    };
    tracing::info!(
        event = "pipeline.completed",
        tolerated_failures = report.tolerated_failures(),
        "pipeline completed"
    );
    observer(&PipelineEvent::Completed(pipeline, &report));
    report
}

fn execute_step(deps: &PipelineDeps, step: &Step, cwd: &mut PathBuf) -> StepOutcome {
    if step.host.is_some_and(|host| host != deps.host_os) {
        let reason = step
            .skip_notice
            .clone()
            .unwrap_or_else(|| format!("not supported on {}", deps.host_os));
        return StepOutcome::Skipped { reason };
    }

    match &step.action {
        StepAction::Run {
            program,
            args,
            dir,
            stdio,
        } => {
            let workdir = dir.as_ref().map_or_else(|| cwd.clone(), |dir| cwd.join(dir));
            let spec = CommandSpec::new(program.clone(), workdir)
                .args(args.iter().cloned())
                .stdio(*stdio);
            run_command(deps.runner.as_ref(), &spec)
        },
        StepAction::ChangeDir(dir) => {
            let target = cwd.join(dir);
            if deps.files.is_dir(&target) {
                *cwd = target;
                StepOutcome::Succeeded
            } else {
                StepOutcome::Failed {
                    reason: format!("no such directory: {}", target.display()),
                }
            }
        },
        StepAction::ExpectFile { path, .. } => StepOutcome::Checked {
            found: deps.files.exists(&cwd.join(path)),
        },
        StepAction::Notice(_) => StepOutcome::Noted,
    }
}

/// Run one command and fold spawn errors and non-zero exits into a failure.
pub fn run_command(runner: &dyn CommandRunner, spec: &CommandSpec) -> StepOutcome {
    tracing::debug!(
        event = "pipeline.command",
        command = %spec,
        cwd = %spec.cwd.display(),
        "running command"
    );
    match runner.run(spec) {
        Ok(status) if status.success() => StepOutcome::Succeeded,
        Ok(status) => StepOutcome::Failed {
            reason: format!("Command failed: {spec} ({status})"),
        },
        Err(error) => StepOutcome::Failed {
            reason: format!("{spec}: {}", error.message),
        },
    }
}

fn log_outcome(step: &Step, outcome: &StepOutcome) {
    match outcome {
        StepOutcome::Failed { reason } if step.critical => {
            tracing::error!(event = "pipeline.step_failed", step = %step.name, reason = %reason);
        },
        StepOutcome::Failed { reason } => {
            tracing::warn!(event = "pipeline.step_failed", step = %step.name, reason = %reason);
        },
        StepOutcome::Skipped { reason } => {
            tracing::info!(event = "pipeline.step_skipped", step = %step.name, reason = %reason);
        },
        StepOutcome::Checked { found } => {
            tracing::info!(event = "pipeline.file_checked", step = %step.name, found = *found);
        },
        StepOutcome::Succeeded | StepOutcome::Noted => {
            tracing::debug!(event = "pipeline.step_done", step = %step.name);
        },
    }
}
