//! CLI smoke tests: metadata, settings, and argument errors.

use serde_json::Value;
use std::process::{Command, Output};

fn run_cli(args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_deploy-probe"));
    command.env_clear().args(args);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output()
}

#[test]
fn info_json_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    let first = run_cli(&["info", "--output", "json"], &[])?;
    let second = run_cli(&["info", "--output", "json"], &[])?;
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let value: Value = serde_json::from_slice(&first.stdout)?;
    assert_eq!(value["status"], "ok");
    assert_eq!(value["build"]["name"], "deploy-probe-core");
    Ok(())
}

#[test]
fn settings_reflect_env_and_flags() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(
        &["settings", "--output", "json", "--project-root", "/srv/site"],
        &[
            ("DEPLOY_PROBE_BIND", "0.0.0.0:9000"),
            ("DEPLOY_PROBE_LOG_FORMAT", "json"),
        ],
    )?;
    assert!(output.status.success());

    let value: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["bind"], "0.0.0.0:9000");
    assert_eq!(value["projectRoot"], "/srv/site");
    assert_eq!(value["logFilter"], "info");
    assert_eq!(value["logFormat"], "json");
    Ok(())
}

#[test]
fn invalid_bind_env_exits_with_invalid_input() -> std::io::Result<()> {
    let output = run_cli(&["settings"], &[("DEPLOY_PROBE_BIND", "not-an-addr")])?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("error: "), "stderr: {stderr}");
    assert!(stderr.contains("DEPLOY_PROBE_BIND"), "stderr: {stderr}");
    Ok(())
}

#[test]
fn invalid_log_filter_exits_with_invalid_input() -> std::io::Result<()> {
    let output = run_cli(&["info"], &[("DEPLOY_PROBE_LOG", "deploy_probe=[")])?;
    assert_eq!(output.status.code(), Some(2));
    Ok(())
}
