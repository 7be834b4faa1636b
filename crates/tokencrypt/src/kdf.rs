//! Secret → 256-bit key derivation using scrypt.

use scrypt::{scrypt, Params};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::TokenError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed, application-wide scrypt salt.
///
/// This is not a password-hashing scheme: the input is a deployment secret,
/// not a user login credential, and every deployment sharing a secret must
/// derive the same key. A per-token salt would change the token format.
pub const KEY_SALT: &[u8] = b"tokencrypt/resource-id/v1";

/// scrypt cost parameter, as log2(N). N = 16384.
pub const SCRYPT_LOG_N: u8 = 14;

/// scrypt block size.
pub const SCRYPT_R: u32 = 8;

/// scrypt parallelism.
pub const SCRYPT_P: u32 = 1;

/// A derived symmetric key. Zeroed on drop and never printed.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_LEN]);

impl DerivedKey {
    /// Raw key bytes, for handing to the AEAD.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Derive a [`DerivedKey`] from `secret` with scrypt and [`KEY_SALT`].
///
/// Deterministic and intentionally slow (~16 MiB of memory per call).
///
/// # Errors
///
/// Returns [`TokenError::MissingSecret`] if `secret` is empty or whitespace.
/// Returns [`TokenError::KeyDerivation`] if scrypt rejects its parameters.
pub fn derive_key(secret: &str) -> Result<DerivedKey, TokenError> {
    if secret.trim().is_empty() {
        return Err(TokenError::MissingSecret);
    }
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN)
        .map_err(|_| TokenError::KeyDerivation)?;

    let mut key = DerivedKey([0u8; KEY_LEN]);
    scrypt(secret.as_bytes(), KEY_SALT, &params, &mut key.0)
        .map_err(|_| TokenError::KeyDerivation)?;
    Ok(key)
}
