//! Serve command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use deploy_probe_config::ProbeSettings;
use deploy_probe_infra::run_http_server;
use deploy_probe_shared::ErrorEnvelope;

/// Serve until ctrl-c.
pub fn run_serve(settings: &ProbeSettings) -> Result<CliOutput, CliError> {
    run_http_server(settings.bind).map_err(ErrorEnvelope::from)?;
    Ok(CliOutput::stdout(String::new(), ExitCode::Ok))
}
