//! API request and response types.

use serde::Serialize;

/// Response to `POST /sessions`.
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    /// Identifier for the freshly opened session.
    pub session_id: u64,
}

/// Error response body for 400/404-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
