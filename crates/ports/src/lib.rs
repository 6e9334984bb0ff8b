//! # deploy-probe-ports
//!
//! Port traits for the deploy-probe hexagonal architecture.
//!
//! This crate defines the interfaces between the handlers and pipelines and
//! the outside world (wall clock, child processes, filesystem). It depends
//! only on `domain` and `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod clock;
pub mod filesystem;
pub mod process;

pub use clock::*;
pub use filesystem::*;
pub use process::*;

// Re-export the domain timestamp used in port signatures, so adapter crates
// can implement ports without directly depending on `deploy-probe-domain`.
pub use deploy_probe_domain::Timestamp;
