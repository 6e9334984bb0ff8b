//! Build pipeline commands.
//!
//! Child processes write straight to the terminal, so progress lines are
//! printed as events arrive instead of being buffered into [`CliOutput`].
//! In JSON mode child stdout goes to stderr and stdout carries only the
//! report.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use deploy_probe_app::{
    Pipeline, PipelineEvent, PipelineReport, Presentation, Step, StepAction, StepOutcome,
};
use deploy_probe_infra::{StdioMode, run_build_all, run_build_flutter};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const SUMMARY_ICONS: [&str; 3] = ["🎉", "📱", "🌐"];

/// A rendered progress line and where it goes.
#[derive(Debug, PartialEq, Eq)]
enum Line {
    Stdout(String),
    Stderr(String),
}

/// Run the Flutter pipeline. Exits 1 when a step aborts it.
pub fn run_build_flutter_command(
    mode: OutputMode,
    project_root: PathBuf,
) -> Result<CliOutput, CliError> {
    let report = run_build_flutter(project_root, child_stdio(mode), &mut observer(mode));
    let exit_code = if report.is_success() {
        ExitCode::Ok
    } else {
        ExitCode::Internal
    };
    finish(mode, &report, exit_code)
}

/// Run the aggregate build. Always exits 0.
pub fn run_build_all_command(
    mode: OutputMode,
    project_root: PathBuf,
) -> Result<CliOutput, CliError> {
    let self_exe = std::env::current_exe()?;
    let child_args = mobile_child_args(mode, &project_root);
    let report = run_build_all(
        project_root,
        &self_exe,
        &child_args,
        child_stdio(mode),
        &mut observer(mode),
    );
    finish(mode, &report, ExitCode::Ok)
}

/// Arguments after `build-flutter` for the mobile child. The root is passed
/// explicitly because the child starts with the parent's working directory.
fn mobile_child_args(mode: OutputMode, project_root: &Path) -> Vec<String> {
    let output = if mode.is_json() { "json" } else { "text" };
    vec![
        "--project-root".to_owned(),
        project_root.display().to_string(),
        "--output".to_owned(),
        output.to_owned(),
    ]
}

const fn child_stdio(mode: OutputMode) -> StdioMode {
    if mode.is_json() {
        StdioMode::StdoutToStderr
    } else {
        StdioMode::Inherit
    }
}

fn finish(
    mode: OutputMode,
    report: &PipelineReport,
    exit_code: ExitCode,
) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        to_json_line(report)?
    } else {
        String::new()
    };
    Ok(CliOutput::stdout(stdout, exit_code))
}

fn observer(mode: OutputMode) -> impl FnMut(&PipelineEvent<'_>) {
    move |event| {
        if mode.is_json() {
            return;
        }
        for line in render_event(event) {
            // Progress is best effort; the report still decides the exit code.
            let _ = match line {
                Line::Stdout(text) => {
                    writeln!(io::stdout(), "{text}").and_then(|()| io::stdout().flush())
                },
                Line::Stderr(text) => writeln!(io::stderr(), "{text}"),
            };
        }
    }
}

fn render_event(event: &PipelineEvent<'_>) -> Vec<Line> {
    match event {
        PipelineEvent::Started(pipeline) => match pipeline.presentation {
            Presentation::Announced => {
                vec![Line::Stdout(format!("🏗️  {}\n", pipeline.banner))]
            },
            Presentation::Plain => vec![Line::Stdout(format!("🔄 {}", pipeline.banner))],
        },
        PipelineEvent::StepStarted(pipeline, step) => {
            if pipeline.presentation == Presentation::Announced {
                vec![Line::Stdout(format!("\n🔨 Building {}...", step.name))]
            } else {
                Vec::new()
            }
        },
        PipelineEvent::StepFinished(pipeline, step, outcome) => {
            render_outcome(pipeline, step, outcome).into_iter().collect()
        },
        PipelineEvent::Aborted(pipeline, abort) => vec![Line::Stderr(format!(
            "❌ {}: {}",
            pipeline.abort_prefix, abort.reason
        ))],
        PipelineEvent::Completed(pipeline, _) => render_summary(pipeline),
    }
}

fn render_outcome(pipeline: &Pipeline, step: &Step, outcome: &StepOutcome) -> Option<Line> {
    let announced = pipeline.presentation == Presentation::Announced;
    match (outcome, &step.action) {
        (StepOutcome::Succeeded, StepAction::Run { .. }) if announced => {
            Some(Line::Stdout(format!("✅ {} build successful", step.name)))
        },
        (StepOutcome::Failed { reason }, _) if announced => {
            Some(Line::Stdout(format!("❌ {} build failed: {reason}", step.name)))
        },
        (StepOutcome::Skipped { reason }, _) => Some(Line::Stdout(format!("⚠️  {reason}"))),
        (
            StepOutcome::Checked { found },
            StepAction::ExpectFile {
                found: on_found,
                missing,
                ..
            },
        ) => Some(Line::Stdout(if *found {
            format!("✅ {on_found}")
        } else {
            format!("❌ {missing}")
        })),
        (StepOutcome::Noted, StepAction::Notice(message)) => {
            Some(Line::Stdout(format!("🧪 {message}")))
        },
        _ => None,
    }
}

fn render_summary(pipeline: &Pipeline) -> Vec<Line> {
    pipeline
        .summary
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let icon = SUMMARY_ICONS.get(index).copied().unwrap_or("•");
            let lead = if index == 0 { "\n" } else { "" };
            Line::Stdout(format!("{lead}{icon} {text}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OutputFormat;
    use deploy_probe_app::{Abort, build_all_pipeline, build_flutter_pipeline};

    fn step<'a>(pipeline: &'a Pipeline, name: &str) -> &'a Step {
        let Some(step) = pipeline.steps.iter().find(|step| step.name == name) else {
            panic!("missing step {name}");
        };
        step
    }

    #[test]
    fn announced_steps_report_success_and_failure() {
        let pipeline = build_all_pipeline(Path::new("/bin/deploy-probe"), &[]);
        let web = step(&pipeline, "React Web");

        assert_eq!(
            render_event(&PipelineEvent::StepStarted(&pipeline, web)),
            vec![Line::Stdout("\n🔨 Building React Web...".to_owned())]
        );
        assert_eq!(
            render_event(&PipelineEvent::StepFinished(
                &pipeline,
                web,
                &StepOutcome::Succeeded
            )),
            vec![Line::Stdout("✅ React Web build successful".to_owned())]
        );
        let failed = StepOutcome::Failed {
            reason: "Command failed: npm run build:web (exit code 1)".to_owned(),
        };
        assert_eq!(
            render_event(&PipelineEvent::StepFinished(&pipeline, web, &failed)),
            vec![Line::Stdout(
                "❌ React Web build failed: Command failed: npm run build:web (exit code 1)"
                    .to_owned()
            )]
        );
    }

    #[test]
    fn plain_pipeline_shows_checks_notices_and_skips() {
        let pipeline = build_flutter_pipeline();
        let lock = step(&pipeline, "pubspec.lock");
        let notice = step(&pipeline, "test builds");
        let ios = step(&pipeline, "flutter build ios");
        let clean = step(&pipeline, "flutter clean");

        assert_eq!(
            render_event(&PipelineEvent::StepFinished(
                &pipeline,
                lock,
                &StepOutcome::Checked { found: false }
            )),
            vec![Line::Stdout("❌ pubspec.lock generation failed".to_owned())]
        );
        assert_eq!(
            render_event(&PipelineEvent::StepFinished(&pipeline, notice, &StepOutcome::Noted)),
            vec![Line::Stdout("🧪 Testing Flutter builds...".to_owned())]
        );
        assert_eq!(
            render_event(&PipelineEvent::StepFinished(
                &pipeline,
                ios,
                &StepOutcome::Skipped {
                    reason: "Skipping iOS build: not running on macOS.".to_owned()
                }
            )),
            vec![Line::Stdout("⚠️  Skipping iOS build: not running on macOS.".to_owned())]
        );
        assert!(
            render_event(&PipelineEvent::StepFinished(
                &pipeline,
                clean,
                &StepOutcome::Succeeded
            ))
            .is_empty()
        );
    }

    #[test]
    fn abort_goes_to_stderr() {
        let pipeline = build_flutter_pipeline();
        let abort = Abort {
            step: "flutter analyze".to_owned(),
            reason: "Command failed: flutter analyze (exit code 1)".to_owned(),
        };
        assert_eq!(
            render_event(&PipelineEvent::Aborted(&pipeline, &abort)),
            vec![Line::Stderr(
                "❌ Flutter setup failed: Command failed: flutter analyze (exit code 1)"
                    .to_owned()
            )]
        );
    }

    #[test]
    fn summary_lines_get_icons() {
        let pipeline = build_all_pipeline(Path::new("/bin/deploy-probe"), &[]);
        let lines = render_summary(&pipeline);
        assert_eq!(
            lines,
            vec![
                Line::Stdout("\n🎉 All builds completed!".to_owned()),
                Line::Stdout("📱 Mobile: Flutter app ready in build/app/".to_owned()),
                Line::Stdout("🌐 Web: React app ready in apps/web/build/".to_owned()),
            ]
        );
    }

    #[test]
    fn mobile_child_gets_root_and_output_format() {
        let json = OutputMode {
            format: OutputFormat::Json,
        };
        let text = OutputMode {
            format: OutputFormat::Text,
        };
        let root = Path::new("/srv/app");

        assert_eq!(
            mobile_child_args(json, root),
            ["--project-root", "/srv/app", "--output", "json"]
        );
        assert_eq!(
            mobile_child_args(text, root),
            ["--project-root", "/srv/app", "--output", "text"]
        );
        assert_eq!(child_stdio(json), StdioMode::StdoutToStderr);
        assert_eq!(child_stdio(text), StdioMode::Inherit);
    }
}
