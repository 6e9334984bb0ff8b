//! Transport-neutral request and response.

use crate::v1::headers::{CachePolicy, response_headers};
use serde_json::Value;
use std::fmt;

/// Header carrying the platform's client context for function invocations.
pub const CLIENT_CONTEXT_HEADER: &str = "Lambda-Runtime-Client-Context";

/// Request method. Only `OPTIONS` changes handler behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`.
    Get,
    /// `POST`.
    Post,
    /// `OPTIONS` (CORS preflight).
    Options,
    /// Any other method, upper-cased.
    Other(String),
}

impl HttpMethod {
    /// Parse a method token, case-insensitively.
    #[must_use]
    pub fn parse(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "OPTIONS" => Self::Options,
            other => Self::Other(other.to_owned()),
        }
    }

    /// True for a CORS preflight.
    #[must_use]
    pub const fn is_preflight(&self) -> bool {
        matches!(self, Self::Options)
    }

    /// Method token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Options => "OPTIONS",
            Self::Other(token) => token,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// The parts of an incoming request the handlers look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRequest {
    /// Request method.
    pub method: HttpMethod,
}

impl HandlerRequest {
    /// A plain `GET`.
    #[must_use]
    pub const fn get() -> Self {
        Self {
            method: HttpMethod::Get,
        }
    }

    /// A request with the given method.
    #[must_use]
    pub const fn with_method(method: HttpMethod) -> Self {
        Self { method }
    }
}

/// Per-invocation context supplied by the hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionContext {
    /// Client context, when the platform supplied one.
    pub client_context: Option<Value>,
}

impl ExecutionContext {
    /// Build from the raw client context header.
    ///
    /// JSON is kept structured; anything else is carried as a string. An empty
    /// header counts as absent.
    #[must_use]
    pub fn from_header(raw: Option<&str>) -> Self {
        let client_context = raw
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(|raw| {
                serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
            });
        Self { client_context }
    }
}

/// HTTP status codes the handlers produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    /// 200.
    Ok,
    /// 400: required configuration missing.
    BadRequest,
    /// 403: production gate.
    Forbidden,
    /// 500: unexpected fault.
    InternalServerError,
}

impl ResponseStatus {
    /// Numeric code.
    #[must_use]
    pub const fn code(self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::BadRequest => 400,
            Self::Forbidden => 403,
            Self::InternalServerError => 500,
        }
    }
}

/// A complete handler response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// Status.
    pub status: ResponseStatus,
    /// Headers in emission order.
    pub headers: Vec<(&'static str, &'static str)>,
    /// Serialized JSON body; empty for a bare preflight.
    pub body: String,
}

impl HandlerResponse {
    /// Build a response with the standard header set.
    #[must_use]
    pub fn new(status: ResponseStatus, cache: CachePolicy, body: String) -> Self {
        Self {
            status,
            headers: response_headers(cache),
            body,
        }
    }

    /// Look up a header, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&'static str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| *value)
    }
}
