//! Probe settings parsed from `DEPLOY_PROBE_*` variables.
//!
//! Parsing is strict: a present but empty or malformed value fails fast
//! instead of falling back to the default.

use crate::env::{EnvReadError, EnvSnapshot};
use deploy_probe_shared::{ErrorCode, ErrorEnvelope};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Env var: HTTP bind address for `serve`.
pub const ENV_BIND: &str = "DEPLOY_PROBE_BIND";
/// Env var: project root used by the pipelines.
pub const ENV_PROJECT_ROOT: &str = "DEPLOY_PROBE_PROJECT_ROOT";
/// Env var: tracing filter directive.
pub const ENV_LOG: &str = "DEPLOY_PROBE_LOG";
/// Env var: log output format.
pub const ENV_LOG_FORMAT: &str = "DEPLOY_PROBE_LOG_FORMAT";

/// Default bind address (the `netlify dev` functions port).
pub const DEFAULT_BIND: SocketAddr =
    SocketAddr::new(std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST), 8888);
/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Stable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Effective settings for one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeSettings {
    /// Address `serve` binds to.
    pub bind: SocketAddr,
    /// Project root override; `None` means the current directory.
    pub project_root: Option<PathBuf>,
    /// Tracing filter directive.
    pub log_filter: String,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND,
            project_root: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
            log_format: LogFormat::Text,
        }
    }
}

impl ProbeSettings {
    /// Parse settings from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, SettingsError> {
        Self::from_snapshot(&EnvSnapshot::from_map(map))
    }

    /// Parse settings from a captured environment.
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Result<Self, SettingsError> {
        let defaults = Self::default();
        let bind = match read_trimmed(snapshot, ENV_BIND)? {
            Some(value) => value
                .parse::<SocketAddr>()
                .map_err(|_| SettingsError::InvalidSocketAddr {
                    var: ENV_BIND,
                    value: value.to_owned(),
                })?,
            None => defaults.bind,
        };
        let project_root = read_trimmed(snapshot, ENV_PROJECT_ROOT)?.map(PathBuf::from);
        let log_filter = read_trimmed(snapshot, ENV_LOG)?
            .map_or(defaults.log_filter, ToOwned::to_owned);
        let log_format = match read_trimmed(snapshot, ENV_LOG_FORMAT)? {
            Some(value) => value
                .parse::<LogFormat>()
                .map_err(|()| SettingsError::InvalidEnum {
                    var: ENV_LOG_FORMAT,
                    value: value.to_owned(),
                })?,
            None => defaults.log_format,
        };

        Ok(Self {
            bind,
            project_root,
            log_filter,
            log_format,
        })
    }

    /// Parse settings from the process environment.
    pub fn from_std_env() -> Result<Self, SettingsError> {
        Self::from_snapshot(&EnvSnapshot::capture())
    }
}

fn read_trimmed<'a>(
    snapshot: &'a EnvSnapshot,
    var: &'static str,
) -> Result<Option<&'a str>, SettingsError> {
    let Some(raw) = snapshot.get(var)? else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SettingsError::EmptyValue { var });
    }
    Ok(Some(trimmed))
}

/// Validation failures when parsing probe settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A variable was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// A socket address variable did not parse.
    #[error("{var} must be a socket address like 127.0.0.1:8888")]
    InvalidSocketAddr {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// An enum variable had an unsupported value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// A variable could not be read.
    #[error(transparent)]
    Unreadable(#[from] EnvReadError),
}

impl SettingsError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidSocketAddr { .. } => ErrorCode::new("config", "invalid_env_addr"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
            Self::Unreadable(_) => ErrorCode::new("config", "unreadable_env_var"),
        }
    }
}

impl From<SettingsError> for ErrorEnvelope {
    fn from(error: SettingsError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        match error {
            SettingsError::EmptyValue { var } => {
                Self::expected(code, message).with_metadata("env_var", var)
            },
            SettingsError::InvalidSocketAddr { var, value }
            | SettingsError::InvalidEnum { var, value } => Self::expected(code, message)
                .with_metadata("env_var", var)
                .with_metadata("value", value),
            SettingsError::Unreadable(inner) => inner.into(),
        }
    }
}
