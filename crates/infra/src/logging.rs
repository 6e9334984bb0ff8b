//! Tracing subscriber setup.
//!
//! Logs always go to stderr so command output on stdout stays parseable.

use deploy_probe_config::{ENV_LOG, LogFormat};
use deploy_probe_shared::{ErrorCode, ErrorEnvelope};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Fails when `filter` is not a valid directive or a subscriber is already set.
pub fn init_tracing(filter: &str, format: LogFormat) -> Result<(), ErrorEnvelope> {
    let env_filter = EnvFilter::try_new(filter).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_log_filter"),
            format!("{ENV_LOG} is not a valid filter: {error}"),
        )
        .with_metadata("env_var", ENV_LOG)
        .with_metadata("value", filter)
    })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);
    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|error| {
        ErrorEnvelope::invariant(
            ErrorCode::new("logging", "already_initialized"),
            error.to_string(),
        )
    })
}
