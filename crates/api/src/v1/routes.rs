//! Route table.

/// Paths serving the config validator.
pub const DEV_CONFIG_ROUTES: [&str; 2] = ["/.netlify/functions/dev-config", "/dev-config"];
/// Paths serving the health reporter.
pub const DEV_HEALTH_ROUTES: [&str; 2] = ["/.netlify/functions/dev-health", "/dev-health"];

