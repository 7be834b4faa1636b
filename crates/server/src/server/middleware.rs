//! Router options and the request span used by the trace layer.

use std::time::Duration;

use axum::{body::Body, http::Request};
use tracing::Span;

/// Per-request timeout used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Router-level settings derived from [`crate::config::Config`].
#[derive(Debug, Clone, Copy)]
pub struct RouterOptions {
    /// Mount `GET /debug/token`.
    pub debug_routes: bool,
    /// Timeout applied to every request.
    pub request_timeout: Duration,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            debug_routes: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Span for one HTTP request: method and path only.
///
/// The query string is never recorded. On `/debug/token` it carries the
/// plaintext and the override secret.
pub fn request_span(req: &Request<Body>) -> Span {
    tracing::debug_span!(
        "request",
        method = %req.method(),
        path = %req.uri().path(),
        version = ?req.version(),
    )
}
