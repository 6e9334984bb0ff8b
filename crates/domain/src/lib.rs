//! # deploy-probe-domain
//!
//! Variable classification and report models.
//!
//! - **Checks** - `VarSpec`, `VariableCheck`, placeholder and flag rules
//! - **Reports** - `ConfigReport`, `HealthReport`, `HealthFault`
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared`
//! - Works on values, never on the process environment
//! - No I/O

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use deploy_probe_shared::shared_crate_version;

pub mod check;
pub mod report;

pub use check::{
    FLAG_ENABLED, PLACEHOLDER_MARKERS, VarClass, VarSpec, VariableCheck, VariableChecks,
    contains_placeholder, flag_enabled, value_or_sentinel,
};
pub use report::{
    ConfigEcho, ConfigReport, ConfigStatus, ConfigSummary, DEVELOPMENT, DeploymentInfo,
    FeatureFlags, FlutterSettings, HealthFault, HealthReport, LOCAL_BUILD, NOT_CONFIGURED,
    NOT_SET, NetlifySettings, Timestamp, UNKNOWN, Validation,
};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
