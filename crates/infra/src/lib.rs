//! # deploy-probe-infra
//!
//! Infrastructure wiring and runtime composition.
//! This crate depends on `app`, `adapters`, `api`, `config`, `ports`, and `shared`.

/// Real adapters wired into the use cases.
pub mod composition;
/// Axum server for the handlers.
pub mod http_server;
/// Tracing subscriber setup.
pub mod logging;

pub use composition::{
    local_pipeline_deps, run_build_all, run_build_flutter, run_dev_config_once,
    run_dev_health_once, run_http_server, run_verify_structure,
};
pub use http_server::{ServeError, ServerState, SnapshotSource, bind, router, run_server, serve};
pub use logging::init_tracing;

pub use deploy_probe_ports::StdioMode;

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
