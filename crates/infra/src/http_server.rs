//! HTTP surface for the two handlers.
//!
//! Every request takes a fresh environment snapshot; the only state shared
//! across requests is the clock and the snapshot source, both immutable.

use axum::Router;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use deploy_probe_api::v1::{
    CLIENT_CONTEXT_HEADER, DEV_CONFIG_ROUTES, DEV_HEALTH_ROUTES, ExecutionContext,
    HandlerRequest, HandlerResponse, HttpMethod,
};
use deploy_probe_app::{report_health, validate_config};
use deploy_probe_config::EnvSnapshot;
use deploy_probe_ports::Clock;
use deploy_probe_shared::{ErrorCode, ErrorEnvelope};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Produces the environment snapshot for one request.
pub type SnapshotSource = Arc<dyn Fn() -> EnvSnapshot + Send + Sync>;

/// Shared, immutable server state.
#[derive(Clone)]
pub struct ServerState {
    /// Report timestamps.
    pub clock: Arc<dyn Clock>,
    /// Per-request environment snapshot.
    pub snapshot: SnapshotSource,
}

impl ServerState {
    /// State that reads the live process environment on every request.
    pub fn live(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            snapshot: Arc::new(EnvSnapshot::capture),
        }
    }
}

/// Failures starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// The listener could not bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: SocketAddr,
        /// Underlying error.
        source: io::Error,
    },
    /// The async runtime could not start.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] io::Error),
    /// The server loop stopped with an error.
    #[error("http server failed: {0}")]
    Server(#[source] io::Error),
}

impl From<ServeError> for ErrorEnvelope {
    fn from(error: ServeError) -> Self {
        let message = error.to_string();
        match error {
            ServeError::Bind { addr, .. } => {
                Self::unexpected(ErrorCode::new("http", "bind_failed"), message)
                    .with_metadata("addr", addr.to_string())
            },
            ServeError::Runtime(_) => Self::unexpected(ErrorCode::new("http", "runtime"), message),
            ServeError::Server(_) => Self::unexpected(ErrorCode::new("http", "server"), message),
        }
    }
}

/// Build the router with every handler path mounted.
pub fn router(state: Arc<ServerState>) -> Router {
    let mut router: Router<Arc<ServerState>> = Router::new();
    for path in DEV_CONFIG_ROUTES {
        router = router.route(path, any(handle_dev_config));
    }
    for path in DEV_HEALTH_ROUTES {
        router = router.route(path, any(handle_dev_health));
    }
    router.with_state(state)
}

/// Bind a listener.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServeError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })
}

/// Serve on an already bound listener until ctrl-c.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> Result<(), ServeError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(event = "http.listening", %addr, "serving dev functions");
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServeError::Server)
}

/// Bind `addr` and serve on a fresh multi-threaded runtime, blocking the caller.
pub fn run_server(addr: SocketAddr, state: ServerState) -> Result<(), ServeError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ServeError::Runtime)?;
    runtime.block_on(async move {
        let listener = bind(addr).await?;
        serve(listener, Arc::new(state)).await
    })
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!(event = "http.shutdown", "shutting down");
    }
}

async fn handle_dev_config(State(state): State<Arc<ServerState>>, method: Method) -> Response {
    let request = HandlerRequest::with_method(HttpMethod::parse(method.as_str()));
    let env = (state.snapshot)();
    let response = validate_config(state.clock.as_ref(), &request, &env);
    log_request("dev-config", &request, &response);
    into_http(response)
}

async fn handle_dev_health(
    State(state): State<Arc<ServerState>>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    let request = HandlerRequest::with_method(HttpMethod::parse(method.as_str()));
    let context = ExecutionContext::from_header(
        headers
            .get(CLIENT_CONTEXT_HEADER)
            .and_then(|value| value.to_str().ok()),
    );
    let env = (state.snapshot)();
    let response = report_health(state.clock.as_ref(), &request, &context, &env);
    log_request("dev-health", &request, &response);
    into_http(response)
}

fn log_request(endpoint: &str, request: &HandlerRequest, response: &HandlerResponse) {
    tracing::info!(
        event = "http.request",
        endpoint,
        method = %request.method,
        status = response.status.code(),
    );
}

fn into_http(response: HandlerResponse) -> Response {
    let status =
        StatusCode::from_u16(response.status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = Response::builder().status(status);
    for (name, value) in &response.headers {
        builder = builder.header(*name, *value);
    }
    builder
        .body(Body::from(response.body))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
