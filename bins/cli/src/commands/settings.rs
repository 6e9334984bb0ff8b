//! Settings command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::{OutputMode, to_json_line};
use deploy_probe_config::ProbeSettings;

/// Print the effective settings.
pub fn run_settings(mode: OutputMode, settings: &ProbeSettings) -> Result<CliOutput, CliError> {
    let stdout = if mode.is_json() {
        to_json_line(settings)?
    } else {
        format_settings_text(settings)
    };
    Ok(CliOutput::stdout(stdout, ExitCode::Ok))
}

fn format_settings_text(settings: &ProbeSettings) -> String {
    let root = settings
        .project_root
        .as_ref()
        .map_or_else(|| "(current directory)".to_owned(), |root| root.display().to_string());
    format!(
        "bind: {}\nprojectRoot: {root}\nlogFilter: {}\nlogFormat: {}\n",
        settings.bind, settings.log_filter, settings.log_format
    )
}
