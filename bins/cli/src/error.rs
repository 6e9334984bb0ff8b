use deploy_probe_config::SettingsError;
use deploy_probe_shared::ErrorEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Ok = 0,
    InvalidInput = 2,
    Io = 3,
    Internal = 1,
}

impl ExitCode {
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Runtime(ErrorEnvelope),
}

impl CliError {
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self {
            Self::Settings(_) => ExitCode::InvalidInput,
            Self::Io(_) => ExitCode::Io,
            Self::Runtime(error) if error.is_expected() => ExitCode::InvalidInput,
            Self::Serialization(_) | Self::Runtime(_) => ExitCode::Internal,
        }
    }
}

impl From<ErrorEnvelope> for CliError {
    fn from(error: ErrorEnvelope) -> Self {
        Self::Runtime(error)
    }
}
