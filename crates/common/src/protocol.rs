//! Request and response types exchanged over the HTTP surface.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Debug token endpoint
// ---------------------------------------------------------------------------

/// Query string for `GET /debug/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugTokenQuery {
    /// Plaintext to push through encrypt → decrypt.
    pub q: String,
    /// Optional override secret. When present the explicit-key path is used
    /// instead of the runtime key.
    #[serde(default)]
    pub key: Option<String>,
}

/// Response body for `GET /debug/token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugTokenResponse {
    /// Token produced by the encrypt step.
    pub encrypted: String,
    /// Result of decrypting `encrypted` again.
    pub decrypted: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: always `"ok"` once the runtime key is derived.
    pub status: String,
    /// Crate version of the running binary.
    pub version: String,
}
