//! # deploy-probe-app
//!
//! The two HTTP handlers, the build pipelines, and the structure check.
//! This crate depends on `ports`, `api`, `config`, `domain`, and `shared`.

pub mod dev_config;
pub mod dev_health;
pub mod pipeline;
pub mod verify_structure;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub use dev_config::{PRODUCTION_GATE_MESSAGE, build_config_report, validate_config};
pub use dev_health::{build_health_report, report_health};
pub use pipeline::{
    Abort, BUILD_ALL, BUILD_FLUTTER, Pipeline, PipelineDeps, PipelineEvent, PipelineReport,
    Presentation, Step, StepAction, StepOutcome, StepRecord, build_all_pipeline,
    build_flutter_pipeline, run_pipeline,
};
pub use verify_structure::{
    FileCheck, NEXT_STEPS, STRUCTURE_FILES, StructureReport, verify_structure,
};

#[cfg(test)]
mod tests {
    use super::*;
    use deploy_probe_domain::domain_crate_version;
    use deploy_probe_ports::ports_crate_version;
    use deploy_probe_shared::shared_crate_version;

    #[test]
    fn app_crate_versions_agree() {
        let version = app_crate_version();
        assert!(!version.is_empty());
        assert_eq!(version, ports_crate_version());
        assert_eq!(version, domain_crate_version());
        assert_eq!(version, shared_crate_version());
    }
}
