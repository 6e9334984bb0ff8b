//! Structure check command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use deploy_probe_app::StructureReport;
use deploy_probe_infra::run_verify_structure;
use std::fmt::Write as _;
use std::path::PathBuf;

/// Check the repository layout. Findings never change the exit code.
pub fn run_verify_structure_command(
    mode: OutputMode,
    project_root: PathBuf,
) -> Result<CliOutput, CliError> {
    let report = run_verify_structure(project_root);
    let stdout = if mode.is_json() {
        to_json_line(&report)?
    } else {
        format_structure_text(&report)
    };
    Ok(CliOutput::stdout(stdout, ExitCode::Ok))
}

fn format_structure_text(report: &StructureReport) -> String {
    let mut out = String::from("🔍 Verifying Repository Structure...\n\n");
    for check in &report.files {
        let mark = if check.exists { "✅" } else { "❌" };
        let _ = writeln!(out, "{mark} {} - {}", check.path, check.description);
    }
    out.push_str(if report.flutter_installed {
        "✅ Flutter installed\n"
    } else {
        "❌ Flutter not installed or not in PATH\n"
    });
    out.push_str("\n📋 Next Steps:\n");
    for (index, step) in report.next_steps.iter().enumerate() {
        let _ = writeln!(out, "{}. Run: {step}", index + 1);
    }
    out
}
