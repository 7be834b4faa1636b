//! Error taxonomy for token encryption and decryption.

use thiserror::Error;

/// Errors produced while deriving keys, sealing, or opening tokens.
///
/// Messages are deliberately generic: no variant carries plaintext, secret, or
/// key material, so any of them is safe to log. Callers facing untrusted input
/// should collapse every variant into a single "not found" outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// No secret was supplied, or it was blank.
    #[error("no secret configured")]
    MissingSecret,

    /// The token is not valid URL-safe base64, or is shorter than nonce + tag.
    #[error("malformed token")]
    MalformedToken,

    /// Tag verification failed: wrong key, wrong nonce, or tampered bytes.
    #[error("token authentication failed")]
    AuthenticationFailure,

    /// The authenticated plaintext is not valid UTF-8.
    #[error("decrypted token is not valid UTF-8")]
    EncodingFailure,

    /// scrypt rejected its parameters. Unreachable with the fixed constants.
    #[error("key derivation failed")]
    KeyDerivation,

    /// The AEAD refused to seal (plaintext beyond the AES-GCM length limit).
    #[error("token sealing failed")]
    Sealing,
}

impl TokenError {
    /// Stable, machine-readable label used in log fields and HTTP error codes.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::MissingSecret => "missing_secret",
            TokenError::MalformedToken => "malformed_token",
            TokenError::AuthenticationFailure => "authentication_failure",
            TokenError::EncodingFailure => "encoding_failure",
            TokenError::KeyDerivation => "key_derivation",
            TokenError::Sealing => "sealing",
        }
    }

    /// Returns `true` for errors caused by the token itself rather than by the
    /// configuration or the local process.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            TokenError::MalformedToken
                | TokenError::AuthenticationFailure
                | TokenError::EncodingFailure
        )
    }
}
