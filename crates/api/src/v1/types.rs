//! Small fixed-shape bodies.

use serde::{Deserialize, Serialize};

/// Body of the health endpoint's preflight response.
pub const PREFLIGHT_MESSAGE: &str = "CORS preflight success";

/// `{"error": ...}` body used for the 403 gate and 500 faults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBodyDto {
    /// Human-readable description.
    pub error: String,
}

/// `{"message": ...}` preflight body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreflightDto {
    /// Always [`PREFLIGHT_MESSAGE`].
    pub message: String,
}

impl Default for PreflightDto {
    fn default() -> Self {
        Self {
            message: PREFLIGHT_MESSAGE.to_owned(),
        }
    }
}
