//! # deploy-probe-api
//!
//! Transport-neutral request/response contract shared by the HTTP server and
//! the one-shot CLI commands.
//! This crate depends only on `shared`.

/// API v1 contract.
pub mod v1;

/// Returns the api crate version.
#[must_use]
pub const fn api_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
