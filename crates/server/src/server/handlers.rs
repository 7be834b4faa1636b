//! Axum request handlers for all service endpoints.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::{DebugTokenQuery, DebugTokenResponse, ErrorResponse, HealthResponse};
use common::ServiceError;
use tokencrypt::{TokenCipher, TokenError};
use tracing::warn;

use super::state::AppState;

/// `GET /health`: liveness check.
///
/// The runtime key is derived before the listener is bound, so a process that
/// answers at all is ready.
pub async fn health() -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// `GET /debug/token?q=<plaintext>[&key=<secret>]`: encrypt then decrypt.
///
/// Without `key` the runtime cipher is used. With `key` the explicit-key
/// operations run on the blocking pool, since each derives a fresh scrypt key.
/// Only mounted outside production.
pub async fn debug_token(
    State(state): State<AppState>,
    Query(query): Query<DebugTokenQuery>,
) -> Response {
    let DebugTokenQuery { q, key } = query;

    let outcome = match key {
        Some(secret) => tokio::task::spawn_blocking(move || explicit_round_trip(&q, &secret))
            .await
            .map_err(|e| ServiceError::Internal(format!("blocking task failed: {e}")))
            .and_then(|r| r.map_err(rejected)),
        None => default_round_trip(&state.cipher, &q).map_err(rejected),
    };

    match outcome {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => error_response(&err),
    }
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

fn default_round_trip(
    cipher: &TokenCipher,
    plaintext: &str,
) -> Result<DebugTokenResponse, TokenError> {
    let encrypted = cipher.encrypt(plaintext)?;
    let decrypted = cipher.decrypt(&encrypted)?;
    Ok(DebugTokenResponse {
        encrypted,
        decrypted,
    })
}

fn explicit_round_trip(plaintext: &str, secret: &str) -> Result<DebugTokenResponse, TokenError> {
    let encrypted = tokencrypt::encrypt_with(plaintext, secret)?;
    let decrypted = tokencrypt::decrypt_with(&encrypted, secret)?;
    Ok(DebugTokenResponse {
        encrypted,
        decrypted,
    })
}

fn rejected(err: TokenError) -> ServiceError {
    warn!(kind = err.kind(), "debug token round trip failed");
    ServiceError::from(err)
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}
