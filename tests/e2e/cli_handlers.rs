//! One-shot handler commands against a controlled environment.

use serde_json::Value;
use std::process::{Command, Output};

const FIREBASE_VARS: [(&str, &str); 6] = [
    ("FIREBASE_API_KEY", "AIzaSyA-real-looking-key"),
    ("FIREBASE_AUTH_DOMAIN", "probe-app.firebaseapp.com"),
    ("FIREBASE_PROJECT_ID", "probe-app"),
    ("FIREBASE_STORAGE_BUCKET", "probe-app.appspot.com"),
    ("FIREBASE_MESSAGING_SENDER_ID", "1234567890"),
    ("FIREBASE_APP_ID", "1:1234567890:web:abcdef"),
];

fn run_cli(args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_deploy-probe"));
    command.env_clear().args(args);
    for (key, value) in env {
        command.env(key, value);
    }
    command.output()
}

fn json_stdout(output: &Output) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(&output.stdout)
}

#[test]
fn dev_config_healthy_env_exits_zero() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["dev-config"], &FIREBASE_VARS)?;
    assert_eq!(output.status.code(), Some(0));

    let body = json_stdout(&output)?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["summary"]["requiredMissing"], 0);
    assert_eq!(body["environment"], "unknown");
    assert!(String::from_utf8_lossy(&output.stderr).contains("status: 200"));
    Ok(())
}

#[test]
fn dev_config_missing_key_exits_invalid_input() -> Result<(), Box<dyn std::error::Error>> {
    let env: Vec<(&str, &str)> = FIREBASE_VARS
        .iter()
        .copied()
        .filter(|(key, _)| *key != "FIREBASE_API_KEY")
        .collect();
    let output = run_cli(&["dev-config", "--output", "json"], &env)?;
    assert_eq!(output.status.code(), Some(2));

    let response = json_stdout(&output)?;
    assert_eq!(response["status"], 400);
    assert_eq!(response["body"]["summary"]["requiredMissing"], 1);
    assert_eq!(
        response["body"]["validation"]["required"]["FIREBASE_API_KEY"]["configured"],
        false
    );
    assert_eq!(response["headers"]["Cache-Control"], "no-cache");
    Ok(())
}

#[test]
fn dev_config_is_refused_in_production() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(
        &["dev-config", "--output", "json"],
        &[("NODE_ENV", "production")],
    )?;
    assert_eq!(output.status.code(), Some(2));

    let response = json_stdout(&output)?;
    assert_eq!(response["status"], 403);
    assert_eq!(
        response["body"]["error"],
        "Config validation not available in production"
    );
    Ok(())
}

#[test]
fn dev_config_preflight_has_empty_body() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(&["dev-config", "--method", "OPTIONS"], &[])?;
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn dev_health_echoes_context_and_sentinels() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_cli(
        &["dev-health", "--client-context", r#"{"site":"probe"}"#],
        &[("FLUTTER_WEB_DEBUG", "true")],
    )?;
    assert_eq!(output.status.code(), Some(0));

    let body = json_stdout(&output)?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["deployment"]["netlifyContext"]["site"], "probe");
    assert_eq!(body["deployment"]["buildId"], "local");
    assert_eq!(body["config"]["firebaseProjectId"], "not-configured");
    assert_eq!(body["features"]["debugMode"], true);
    assert_eq!(body["features"]["devTools"], false);
    Ok(())
}
