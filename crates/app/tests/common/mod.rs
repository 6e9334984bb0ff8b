//! Test doubles shared by the app integration tests.

#![allow(dead_code, reason = "each test binary uses a different subset")]

use chrono::DateTime;
use deploy_probe_domain::Timestamp;
use deploy_probe_ports::{Clock, CommandRunner, CommandSpec, CommandStatus, FileProbe};
use deploy_probe_shared::{ErrorCode, ErrorEnvelope, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 2026-10-17T08:30:00Z
pub const FIXED_SECONDS: i64 = 1_792_225_800;

/// Clock that always returns the same instant.
pub struct FixedClock(pub Timestamp);

impl Default for FixedClock {
    fn default() -> Self {
        Self(Timestamp::new(
            DateTime::from_timestamp(FIXED_SECONDS, 0).unwrap_or_default(),
        ))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// How the scripted runner answers a command line.
#[derive(Clone)]
pub enum Scripted {
    Exit(i32),
    SpawnError,
}

/// Runner that records every invocation and answers from a script.
///
/// Commands are matched on their display form (`program arg arg`); anything
/// unscripted exits 0.
#[derive(Default)]
pub struct ScriptedRunner {
    script: Vec<(String, Scripted)>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn answer(mut self, command: &str, answer: Scripted) -> Self {
        self.script.push((command.to_owned(), answer));
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandStatus> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(spec.clone());
        }
        let line = spec.to_string();
        match self
            .script
            .iter()
            .find(|(command, _)| *command == line)
            .map(|(_, answer)| answer.clone())
        {
            Some(Scripted::Exit(code)) => Ok(CommandStatus { code: Some(code) }),
            Some(Scripted::SpawnError) => Err(ErrorEnvelope::unexpected(
                ErrorCode::not_found(),
                format!("{} not found", spec.program.display()),
            )),
            None => Ok(CommandStatus::SUCCESS),
        }
    }
}

/// In-memory filesystem: a set of files and a set of directories.
#[derive(Default)]
pub struct FakeFiles {
    files: BTreeSet<PathBuf>,
    dirs: BTreeSet<PathBuf>,
}

impl FakeFiles {
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into());
        self
    }

    pub fn with_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.dirs.insert(path.into());
        self
    }
}

impl FileProbe for FakeFiles {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains(path) || self.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }
}
