//! # deploy-probe-config
//!
//! Variable tables, the environment snapshot, and probe settings.
//! This crate depends on `domain` and `shared` only.

/// Variable tables and the environment snapshot.
pub mod env;
/// `DEPLOY_PROBE_*` settings.
pub mod settings;

pub use env::{
    ENV_AWS_REGION, ENV_BUILD_ID, ENV_ENABLE_DEV_TOOLS, ENV_FIREBASE_API_KEY,
    ENV_FIREBASE_APP_ID, ENV_FIREBASE_AUTH_DOMAIN, ENV_FIREBASE_MESSAGING_SENDER_ID,
    ENV_FIREBASE_PROJECT_ID, ENV_FIREBASE_STORAGE_BUCKET, ENV_FLUTTER_BUILD_MODE,
    ENV_FLUTTER_WEB_BUILD_WITH_SOURCEMAPS, ENV_FLUTTER_WEB_DEBUG, ENV_FLUTTER_WEB_USE_SKIA,
    ENV_GEMINI_API_KEY, ENV_GOOGLE_ANALYTICS_ID, ENV_NETLIFY_BRANCH, ENV_NETLIFY_DEV,
    ENV_NETLIFY_SITE_ID, ENV_NODE_ENV, ENV_OPENAI_API_KEY, ENV_SENTRY_DSN, EnvReadError,
    EnvSnapshot, OPTIONAL_VARS, PRODUCTION, REQUIRED_VARS,
};
pub use settings::{
    DEFAULT_BIND, DEFAULT_LOG_FILTER, ENV_BIND, ENV_LOG, ENV_LOG_FORMAT, ENV_PROJECT_ROOT,
    LogFormat, ProbeSettings, SettingsError,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploy_probe_domain::domain_crate_version;
    use deploy_probe_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
        assert_eq!(version, domain_crate_version());
        assert_eq!(version, shared_crate_version());
    }
}
