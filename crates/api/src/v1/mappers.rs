//! Body serialization helpers.

use crate::v1::headers::CachePolicy;
use crate::v1::http::{HandlerResponse, ResponseStatus};
use crate::v1::types::ErrorBodyDto;
use deploy_probe_shared::{ErrorEnvelope, Result};
use serde::Serialize;

/// Map an `ErrorEnvelope` into the `{"error": ...}` body.
///
/// Only the message crosses the wire; codes and metadata stay in the logs.
#[must_use]
pub fn error_envelope_to_error_body(envelope: &ErrorEnvelope) -> ErrorBodyDto {
    ErrorBodyDto {
        error: envelope.message.clone(),
    }
}

/// Serialize `body` and wrap it with the standard headers.
///
/// `pretty` selects two-space indented output; otherwise the body is compact.
pub fn json_response<T: Serialize>(
    status: ResponseStatus,
    cache: CachePolicy,
    body: &T,
    pretty: bool,
) -> Result<HandlerResponse> {
    let body = if pretty {
        serde_json::to_string_pretty(body)?
    } else {
        serde_json::to_string(body)?
    };
    Ok(HandlerResponse::new(status, cache, body))
}
