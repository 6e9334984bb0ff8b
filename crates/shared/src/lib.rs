//! # deploy-probe-shared
//!
//! Shared result and error envelope types for the deploy-probe workspace.
//!
//! Every crate reports failures as an [`ErrorEnvelope`]: a kind, a stable
//! namespaced code, a message that is safe to show an operator, and optional
//! string metadata. Leaf crates keep their own typed errors and convert at the
//! boundary.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};

/// Shared result type used across the workspace.
pub type Result<T, E = ErrorEnvelope> = std::result::Result<T, E>;

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
