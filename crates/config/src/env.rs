//! Variable tables and the per-request environment snapshot.
//!
//! The snapshot is captured once and only read afterwards. A variable whose
//! value is not valid unicode is kept as unreadable so callers can surface a
//! fault instead of silently treating it as unset.

use deploy_probe_domain::VarSpec;
use deploy_probe_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::ffi::OsString;

/// Env var: Firebase web API key.
pub const ENV_FIREBASE_API_KEY: &str = "FIREBASE_API_KEY";
/// Env var: Firebase auth domain.
pub const ENV_FIREBASE_AUTH_DOMAIN: &str = "FIREBASE_AUTH_DOMAIN";
/// Env var: Firebase project id.
pub const ENV_FIREBASE_PROJECT_ID: &str = "FIREBASE_PROJECT_ID";
/// Env var: Firebase storage bucket.
pub const ENV_FIREBASE_STORAGE_BUCKET: &str = "FIREBASE_STORAGE_BUCKET";
/// Env var: Firebase messaging sender id.
pub const ENV_FIREBASE_MESSAGING_SENDER_ID: &str = "FIREBASE_MESSAGING_SENDER_ID";
/// Env var: Firebase app id.
pub const ENV_FIREBASE_APP_ID: &str = "FIREBASE_APP_ID";

/// Env var: `OpenAI` API key.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
/// Env var: Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Env var: Google Analytics measurement id.
pub const ENV_GOOGLE_ANALYTICS_ID: &str = "GOOGLE_ANALYTICS_ID";
/// Env var: Sentry DSN.
pub const ENV_SENTRY_DSN: &str = "SENTRY_DSN";
/// Env var: Netlify site id.
pub const ENV_NETLIFY_SITE_ID: &str = "NETLIFY_SITE_ID";

/// Env var: Flutter build mode.
pub const ENV_FLUTTER_BUILD_MODE: &str = "FLUTTER_BUILD_MODE";
/// Env var: Flutter web renderer selection.
pub const ENV_FLUTTER_WEB_USE_SKIA: &str = "FLUTTER_WEB_USE_SKIA";
/// Env var: Flutter web debug flag.
pub const ENV_FLUTTER_WEB_DEBUG: &str = "FLUTTER_WEB_DEBUG";
/// Env var: Flutter web source maps flag.
pub const ENV_FLUTTER_WEB_BUILD_WITH_SOURCEMAPS: &str = "FLUTTER_WEB_BUILD_WITH_SOURCEMAPS";

/// Env var: set by `netlify dev`.
pub const ENV_NETLIFY_DEV: &str = "NETLIFY_DEV";
/// Env var: branch being deployed.
pub const ENV_NETLIFY_BRANCH: &str = "NETLIFY_BRANCH";
/// Env var: CI build id.
pub const ENV_BUILD_ID: &str = "BUILD_ID";

/// Env var: runtime environment name.
pub const ENV_NODE_ENV: &str = "NODE_ENV";
/// Env var: hosting region.
pub const ENV_AWS_REGION: &str = "AWS_REGION";
/// Env var: developer tools flag.
pub const ENV_ENABLE_DEV_TOOLS: &str = "ENABLE_DEV_TOOLS";

/// `NODE_ENV` value that closes the config validator.
pub const PRODUCTION: &str = "production";

/// Variables whose absence makes the config report unhealthy, in report order.
pub const REQUIRED_VARS: [VarSpec; 6] = [
    VarSpec::required(ENV_FIREBASE_API_KEY),
    VarSpec::required(ENV_FIREBASE_AUTH_DOMAIN),
    VarSpec::required(ENV_FIREBASE_PROJECT_ID),
    VarSpec::required(ENV_FIREBASE_STORAGE_BUCKET),
    VarSpec::required(ENV_FIREBASE_MESSAGING_SENDER_ID),
    VarSpec::required(ENV_FIREBASE_APP_ID),
];

/// Variables tracked for visibility only, in report order.
pub const OPTIONAL_VARS: [VarSpec; 5] = [
    VarSpec::optional(ENV_OPENAI_API_KEY),
    VarSpec::optional(ENV_GEMINI_API_KEY),
    VarSpec::optional(ENV_GOOGLE_ANALYTICS_ID),
    VarSpec::optional(ENV_SENTRY_DSN),
    VarSpec::optional(ENV_NETLIFY_SITE_ID),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum EnvValue {
    Text(String),
    Unreadable,
}

/// Read-only view of the process environment at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, EnvValue>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    ///
    /// Variables whose names are not valid unicode cannot be looked up by any
    /// table entry and are dropped.
    pub fn capture() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build a snapshot from raw OS pairs.
    pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let vars = vars
            .into_iter()
            .filter_map(|(name, value)| {
                let name = name.into_string().ok()?;
                let value = value
                    .into_string()
                    .map_or(EnvValue::Unreadable, EnvValue::Text);
                Some((name, value))
            })
            .collect();
        Self { vars }
    }

    /// Build a snapshot from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let vars = map
            .iter()
            .map(|(name, value)| (name.clone(), EnvValue::Text(value.clone())))
            .collect();
        Self { vars }
    }

    /// Return a copy with `name` set to `value`.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), EnvValue::Text(value.into()));
        self
    }

    /// Return a copy with `name` present but unreadable.
    #[must_use]
    pub fn with_unreadable(mut self, name: impl Into<String>) -> Self {
        self.vars.insert(name.into(), EnvValue::Unreadable);
        self
    }

    /// Look up a variable. Absent → `Ok(None)`; present but not unicode → error.
    pub fn get(&self, name: &str) -> Result<Option<&str>, EnvReadError> {
        match self.vars.get(name) {
            None => Ok(None),
            Some(EnvValue::Text(value)) => Ok(Some(value.as_str())),
            Some(EnvValue::Unreadable) => Err(EnvReadError::NotUnicode {
                var: name.to_owned(),
            }),
        }
    }
}

/// Failure reading a captured variable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvReadError {
    /// The value is present but not valid unicode.
    #[error("environment variable {var} is not valid unicode")]
    NotUnicode {
        /// Env var name.
        var: String,
    },
}

impl EnvReadError {
    /// Name of the offending variable.
    #[must_use]
    pub fn var(&self) -> &str {
        match self {
            Self::NotUnicode { var } => var,
        }
    }
}

impl From<EnvReadError> for ErrorEnvelope {
    fn from(error: EnvReadError) -> Self {
        let var = error.var().to_owned();
        Self::unexpected(
            ErrorCode::new("config", "unreadable_env_var"),
            error.to_string(),
        )
        .with_metadata("env_var", var)
    }
}
