//! # deploy-probe-adapters
//!
//! Adapter implementations for ports (clock, child processes, filesystem).
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod clock;
pub mod fs;
pub mod process;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use clock::{FixedClock, SystemClock};
pub use fs::LocalFileProbe;
pub use process::ProcessCommandRunner;
