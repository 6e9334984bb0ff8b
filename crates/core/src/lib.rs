//! # deploy-probe-core
//!
//! Build metadata and host platform detection.
//!
//! This crate has no workspace dependencies, so every other crate can import it.
//!
//! - [`build_info()`] - compile-time metadata about the binary
//! - [`HostOs`] - the operating system the binary was built for, used to gate
//!   platform-only pipeline steps

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;

/// Build-time information about the binary.
///
/// # Example
///
/// ```
/// use deploy_probe_core::build_info;
///
/// let info = build_info();
/// println!("Running {} v{}", info.name, info.version);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Package name from Cargo.toml
    pub name: &'static str,

    /// Package version from Cargo.toml (semver)
    pub version: &'static str,

    /// Minimum supported Rust version declared by the workspace
    pub rust_version: &'static str,

    /// Host operating system the binary targets
    pub host_os: HostOs,

    /// Build profile ("debug" or "release")
    pub profile: &'static str,

    /// Git commit hash (short form), injected via `GIT_HASH` at build time
    pub git_hash: Option<&'static str>,
}

/// Returns build-time information about the binary.
///
/// ```
/// use deploy_probe_core::build_info;
///
/// let info = build_info();
/// assert!(!info.name.is_empty());
/// assert!(!info.version.is_empty());
/// ```
#[must_use]
pub const fn build_info() -> BuildInfo {
    BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        rust_version: env!("CARGO_PKG_RUST_VERSION"),
        host_os: HostOs::current(),
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
        git_hash: option_env!("GIT_HASH"),
    }
}

/// Operating system family, as far as pipeline gating is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOs {
    /// Apple macOS (the only host that can build iOS targets).
    MacOs,
    /// Linux.
    Linux,
    /// Microsoft Windows.
    Windows,
    /// Anything else.
    Other,
}

impl HostOs {
    /// Host OS the binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Other
        }
    }

    /// Stable lowercase identifier (`macos`, `linux`, `windows`, `other`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MacOs => "macos",
            Self::Linux => "linux",
            Self::Windows => "windows",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for HostOs {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

// =============================================================================
// TESTS
// =============================================================================
