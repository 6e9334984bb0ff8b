//! API v1 contract types and helpers.

mod headers;
mod http;
mod mappers;
mod routes;
mod types;

pub use headers::{
    CONTENT_TYPE_JSON, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN, CachePolicy,
    response_headers,
};
pub use http::{
    CLIENT_CONTEXT_HEADER, ExecutionContext, HandlerRequest, HandlerResponse, HttpMethod,
    ResponseStatus,
};
pub use mappers::{error_envelope_to_error_body, json_response};
pub use routes::{DEV_CONFIG_ROUTES, DEV_HEALTH_ROUTES};
pub use types::{ErrorBodyDto, PREFLIGHT_MESSAGE, PreflightDto};
