//! Common error types shared across crates.

use thiserror::Error;
use tokencrypt::TokenError;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed, e.g. a missing query parameter.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A token was rejected. The reason is kept out of the response body so
    /// that forged tokens cannot be used as an oracle.
    #[error("not found")]
    NotFound,

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::NotFound => 404,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable error code for [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::NotFound => "not_found",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

impl From<TokenError> for ServiceError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MalformedToken
            | TokenError::AuthenticationFailure
            | TokenError::EncodingFailure => ServiceError::NotFound,
            TokenError::MissingSecret => {
                ServiceError::BadRequest("secret must not be empty".into())
            }
            TokenError::KeyDerivation | TokenError::Sealing => {
                ServiceError::Internal(err.kind().into())
            }
        }
    }
}
