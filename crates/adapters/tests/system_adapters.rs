//! Adapters against the real process table and filesystem.

use deploy_probe_adapters::{LocalFileProbe, ProcessCommandRunner};
use deploy_probe_ports::{CommandRunner, CommandSpec, FileProbe, StdioMode};
use deploy_probe_shared::Result;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}-{nanos}"))
}

#[test]
fn file_probe_distinguishes_files_and_dirs() -> Result<()> {
    let root = temp_dir("deploy-probe-fs");
    std::fs::create_dir_all(root.join("apps/mobile"))?;
    std::fs::write(root.join("netlify.toml"), "[build]\n")?;

    let probe = LocalFileProbe;
    assert!(probe.exists(&root.join("netlify.toml")));
    assert!(!probe.is_dir(&root.join("netlify.toml")));
    assert!(probe.is_dir(&root.join("apps/mobile")));
    assert!(probe.exists(&root.join("apps/mobile")));
    assert!(!probe.exists(&root.join("apps/web/package.json")));

    std::fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn missing_program_is_a_spawn_error() {
    let spec = CommandSpec::new("deploy-probe-definitely-missing-binary", std::env::temp_dir());
    let Err(error) = ProcessCommandRunner.run(&spec) else {
        panic!("expected spawn failure");
    };
    assert_eq!(error.code.code(), "program_not_found");
    assert!(error.metadata.contains_key("program"));
}

#[cfg(unix)]
#[test]
fn exit_codes_are_reported() -> Result<()> {
    let ok = CommandSpec::new("sh", std::env::temp_dir())
        .args(["-c", "exit 0"])
        .quiet();
    assert!(ProcessCommandRunner.run(&ok)?.success());

    let failing = CommandSpec::new("sh", std::env::temp_dir())
        .args(["-c", "exit 3"])
        .quiet();
    let status = ProcessCommandRunner.run(&failing)?;
    assert_eq!(status.code, Some(3));
    assert!(!status.success());
    Ok(())
}

#[cfg(unix)]
#[test]
fn commands_run_in_the_requested_directory() -> Result<()> {
    let root = temp_dir("deploy-probe-cwd");
    std::fs::create_dir_all(&root)?;
    std::fs::write(root.join("marker"), "")?;

    let spec = CommandSpec::new("sh", root.clone())
        .args(["-c", "test -f marker"])
        .quiet();
    assert!(ProcessCommandRunner.run(&spec)?.success());

    std::fs::remove_dir_all(&root)?;
    Ok(())
}

#[test]
fn missing_working_directory_is_reported_as_such() {
    let cwd = temp_dir("deploy-probe-no-such-dir");
    let spec = CommandSpec::new("sh", cwd.clone()).args(["-c", "exit 0"]);
    let Err(error) = ProcessCommandRunner.run(&spec) else {
        panic!("expected missing cwd to fail");
    };
    assert_eq!(error.code.code(), "cwd_not_found");
    assert_eq!(
        error.metadata.get("cwd").map(String::as_str),
        Some(cwd.display().to_string().as_str())
    );
    assert!(error.message.contains("no such directory"));
}

#[cfg(unix)]
#[test]
fn stdout_can_be_redirected_to_stderr() -> Result<()> {
    let spec = CommandSpec::new("sh", std::env::temp_dir())
        .args(["-c", "echo redirected"])
        .stdio(StdioMode::StdoutToStderr);
    assert!(ProcessCommandRunner.run(&spec)?.success());
    Ok(())
}
