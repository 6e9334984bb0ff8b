//! Composition root: real adapters wired into the app layer.

use crate::http_server::{ServeError, ServerState, run_server};
use deploy_probe_adapters::{LocalFileProbe, ProcessCommandRunner, SystemClock};
use deploy_probe_api::v1::{ExecutionContext, HandlerRequest, HandlerResponse};
use deploy_probe_app::{
    PipelineDeps, PipelineEvent, PipelineReport, StructureReport, build_all_pipeline,
    build_flutter_pipeline, report_health, run_pipeline, validate_config, verify_structure,
};
use deploy_probe_config::EnvSnapshot;
use deploy_probe_core::HostOs;
use deploy_probe_ports::StdioMode;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Pipeline dependencies backed by the local machine.
pub fn local_pipeline_deps(project_root: PathBuf) -> PipelineDeps {
    PipelineDeps {
        runner: Arc::new(ProcessCommandRunner),
        files: Arc::new(LocalFileProbe),
        host_os: HostOs::current(),
        project_root,
    }
}

/// Serve both handlers on `addr` with the system clock until ctrl-c.
pub fn run_http_server(addr: SocketAddr) -> Result<(), ServeError> {
    run_server(addr, ServerState::live(Arc::new(SystemClock)))
}

/// Run the config validator once against the process environment.
pub fn run_dev_config_once(request: &HandlerRequest) -> HandlerResponse {
    validate_config(&SystemClock, request, &EnvSnapshot::capture())
}

/// Run the health reporter once against the process environment.
pub fn run_dev_health_once(
    request: &HandlerRequest,
    context: &ExecutionContext,
) -> HandlerResponse {
    report_health(&SystemClock, request, context, &EnvSnapshot::capture())
}

/// Run the Flutter mobile pipeline from `project_root`.
pub fn run_build_flutter(
    project_root: PathBuf,
    child_stdio: StdioMode,
    observer: &mut dyn FnMut(&PipelineEvent<'_>),
) -> PipelineReport {
    run_pipeline(
        &local_pipeline_deps(project_root),
        &build_flutter_pipeline().with_child_stdio(child_stdio),
        observer,
    )
}

/// Run the aggregate build from `project_root`, re-invoking `self_exe` with
/// `child_args` for the mobile step.
pub fn run_build_all(
    project_root: PathBuf,
    self_exe: &Path,
    child_args: &[String],
    child_stdio: StdioMode,
    observer: &mut dyn FnMut(&PipelineEvent<'_>),
) -> PipelineReport {
    run_pipeline(
        &local_pipeline_deps(project_root),
        &build_all_pipeline(self_exe, child_args).with_child_stdio(child_stdio),
        observer,
    )
}

/// Check the repository layout under `project_root`.
pub fn run_verify_structure(project_root: PathBuf) -> StructureReport {
    verify_structure(&local_pipeline_deps(project_root))
}
