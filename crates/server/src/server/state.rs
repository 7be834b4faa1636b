//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use tokencrypt::TokenCipher;

/// Application state shared across all request handlers.
///
/// Only constructible from a ready [`TokenCipher`], so a server without a
/// runtime key cannot exist.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Cipher bound to the key derived from `TOKEN_SECRET` at startup.
    pub cipher: Arc<TokenCipher>,
}

impl AppState {
    /// Create a new [`AppState`] around the runtime cipher.
    pub fn new(cipher: TokenCipher) -> Self {
        Self {
            cipher: Arc::new(cipher),
        }
    }
}
