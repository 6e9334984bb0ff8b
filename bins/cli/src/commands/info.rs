//! Info command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use deploy_probe_core::{BuildInfo, build_info};
use deploy_probe_infra::infra_crate_version;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InfoDto<'a> {
    status: &'static str,
    build: BuildDto<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuildDto<'a> {
    name: &'a str,
    version: &'a str,
    infra_version: &'a str,
    rust_version: &'a str,
    host_os: &'a str,
    profile: &'a str,
    git_hash: Option<&'a str>,
}

/// Run the info command.
pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let build = build_info();
    let infra_version = infra_crate_version();

    let stdout = if mode.is_json() {
        format_info_json(&build, infra_version)?
    } else {
        format_info_text(&build, infra_version)
    };

    Ok(CliOutput::stdout(stdout, ExitCode::Ok))
}

fn format_info_text(build: &BuildInfo, infra_version: &str) -> String {
    format!(
        "status: ok\nname: {}\nversion: {}\ninfra: {}\nrust: {}\nhost: {}\nprofile: {}\ngit: {}\n",
        build.name,
        build.version,
        infra_version,
        build.rust_version,
        build.host_os,
        build.profile,
        build.git_hash.unwrap_or("none"),
    )
}

fn format_info_json(build: &BuildInfo, infra_version: &str) -> Result<String, CliError> {
    let payload = InfoDto {
        status: "ok",
        build: BuildDto {
            name: build.name,
            version: build.version,
            infra_version,
            rust_version: build.rust_version,
            host_os: build.host_os.as_str(),
            profile: build.profile,
            git_hash: build.git_hash,
        },
    };
    Ok(to_json_line(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_json_has_build_keys() -> Result<(), Box<dyn std::error::Error>> {
        let output = format_info_json(&build_info(), infra_crate_version())?;
        let value: serde_json::Value = serde_json::from_str(&output)?;
        assert_eq!(value["status"], "ok");
        for key in ["name", "version", "infraVersion", "rustVersion", "hostOs", "profile"] {
            assert!(value["build"].get(key).is_some(), "missing {key}");
        }
        Ok(())
    }

    #[test]
    fn info_text_starts_with_status() {
        let text = format_info_text(&build_info(), infra_crate_version());
        assert!(text.starts_with("status: ok\nname: "));
    }
}
