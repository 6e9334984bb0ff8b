//! Repository structure check.
//!
//! Reports what is present and prints the lockfile remediation checklist.
//! Nothing here fails: missing files and a missing toolchain are findings.

use crate::pipeline::{PipelineDeps, run_command};
use deploy_probe_ports::CommandSpec;
use serde::Serialize;

/// Paths checked, relative to the project root, with what they are for.
pub const STRUCTURE_FILES: [(&str, &str); 4] = [
    ("apps/mobile/pubspec.yaml", "Flutter configuration"),
    (
        "apps/mobile/pubspec.lock",
        "Flutter dependencies (will be regenerated)",
    ),
    ("apps/web/package.json", "React web app configuration"),
    ("netlify.toml", "Netlify deployment config"),
];

/// Remediation checklist for a stale Flutter lockfile.
pub const NEXT_STEPS: [&str; 4] = [
    "rm apps/mobile/pubspec.lock",
    "cd apps/mobile && flutter pub get",
    "git add apps/mobile/pubspec.lock && git commit -m \"Update pubspec.lock\"",
    "git push",
];

/// One checked path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCheck {
    /// Path relative to the project root.
    pub path: &'static str,
    /// What the file is for.
    pub description: &'static str,
    /// Whether anything exists at the path.
    pub exists: bool,
}

/// Structure check findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    /// Checked paths, in check order.
    pub files: Vec<FileCheck>,
    /// `flutter --version` ran successfully.
    pub flutter_installed: bool,
    /// Remediation checklist.
    pub next_steps: Vec<&'static str>,
}

impl StructureReport {
    /// Paths that were not found.
    pub fn missing(&self) -> impl Iterator<Item = &FileCheck> {
        self.files.iter().filter(|check| !check.exists)
    }
}

/// Check the repository layout and probe for the Flutter toolchain.
#[tracing::instrument(skip_all, fields(root = %deps.project_root.display()))]
pub fn verify_structure(deps: &PipelineDeps) -> StructureReport {
    let files: Vec<FileCheck> = STRUCTURE_FILES
        .iter()
        .map(|(path, description)| FileCheck {
            path,
            description,
            exists: deps.files.exists(&deps.project_root.join(path)),
        })
        .collect();

    let probe = CommandSpec::new("flutter", deps.project_root.clone())
        .args(["--version"])
        .quiet();
    let flutter_installed = run_command(deps.runner.as_ref(), &probe).failure().is_none();

    let report = StructureReport {
        files,
        flutter_installed,
        next_steps: NEXT_STEPS.to_vec(),
    };
    tracing::info!(
        event = "verify_structure.completed",
        missing = report.missing().count(),
        flutter_installed,
        "structure verified"
    );
    report
}
