//! [`TokenCipher`]: the default-key facade, plus the explicit-key operations.
//!
//! Both call shapes run the same pipeline and differ only in where the key
//! comes from:
//!
//! ```text
//! encrypt: derive/borrow key → seal(random nonce) → envelope → base64url
//! decrypt: base64url → envelope (≥ 28 bytes) → open (verify tag) → UTF-8
//! ```

use tracing::debug;

use crate::cipher::{self, Sealed};
use crate::encoding;
use crate::envelope::Envelope;
use crate::error::TokenError;
use crate::kdf::{self, DerivedKey};

/// Token encryption bound to one derived key.
///
/// Build it once at startup from the runtime secret and share it by reference
/// (or behind an `Arc`). It holds no mutable state, so concurrent callers need
/// no locking.
#[derive(Debug)]
pub struct TokenCipher {
    key: DerivedKey,
}

impl TokenCipher {
    /// Derive the key for `secret` and return a ready cipher.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MissingSecret`] if `secret` is blank, or
    /// [`TokenError::KeyDerivation`] if scrypt fails.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        Ok(Self::from_key(kdf::derive_key(secret)?))
    }

    /// Wrap an already-derived key.
    pub fn from_key(key: DerivedKey) -> Self {
        Self { key }
    }

    /// Encrypt `plaintext` into a URL-safe token under this cipher's key.
    ///
    /// Every call draws a fresh nonce, so equal plaintexts give distinct tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Sealing`] only for plaintexts beyond the AES-GCM
    /// length limit.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, TokenError> {
        let nonce = cipher::generate_nonce();
        let Sealed { ciphertext, tag } =
            cipher::seal(&self.key, &nonce, plaintext.as_bytes())?;
        let envelope = Envelope {
            nonce,
            tag,
            ciphertext,
        };
        Ok(encoding::to_text(&envelope.to_bytes()))
    }

    /// Decrypt and authenticate a token produced under this cipher's key.
    ///
    /// # Errors
    ///
    /// - [`TokenError::MalformedToken`] if `token` is not base64url or decodes
    ///   to fewer than 28 bytes. No cryptographic work is done in that case.
    /// - [`TokenError::AuthenticationFailure`] if the tag does not verify.
    /// - [`TokenError::EncodingFailure`] if the plaintext is not UTF-8.
    pub fn decrypt(&self, token: &str) -> Result<String, TokenError> {
        self.open_token(token).map_err(|e| {
            debug!(kind = e.kind(), token_len = token.len(), "token rejected");
            e
        })
    }

    fn open_token(&self, token: &str) -> Result<String, TokenError> {
        let bytes = encoding::from_text(token)?;
        let envelope = Envelope::from_bytes(&bytes)?;
        let plaintext = cipher::open(
            &self.key,
            &envelope.nonce,
            &envelope.tag,
            &envelope.ciphertext,
        )?;
        String::from_utf8(plaintext).map_err(|_| TokenError::EncodingFailure)
    }
}

/// Encrypt `plaintext` under a key derived from `secret` for this call only.
///
/// Used to mint tokens for a deployment whose runtime secret differs from the
/// local one. The derivation is slow and is not cached; callers encrypting
/// many values should build a [`TokenCipher`] once instead.
///
/// # Errors
///
/// Returns [`TokenError::MissingSecret`] if `secret` is blank, otherwise the
/// errors of [`TokenCipher::encrypt`].
pub fn encrypt_with(plaintext: &str, secret: &str) -> Result<String, TokenError> {
    TokenCipher::new(secret)?.encrypt(plaintext)
}

/// Decrypt `token` under a key derived from `secret` for this call only.
///
/// # Errors
///
/// Returns [`TokenError::MissingSecret`] if `secret` is blank, otherwise the
/// errors of [`TokenCipher::decrypt`].
pub fn decrypt_with(token: &str, secret: &str) -> Result<String, TokenError> {
    TokenCipher::new(secret)?.decrypt(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::generate_nonce;
    use crate::envelope::MIN_ENVELOPE_LEN;
    use std::sync::{Arc, OnceLock};

    fn shared() -> &'static TokenCipher {
        static CIPHER: OnceLock<TokenCipher> = OnceLock::new();
        CIPHER.get_or_init(|| TokenCipher::new("service-tests").unwrap())
    }

    #[test]
    fn round_trip() {
        for p in ["", "a", "0AGxTymTXw2x", "Grüße, 世界 🌍", "https://host/path?a=b&c=d"] {
            let token = shared().encrypt(p).unwrap();
            assert_eq!(shared().decrypt(&token).unwrap(), p);
        }
    }

    #[test]
    fn empty_plaintext_is_minimum_envelope() {
        let token = shared().encrypt("").unwrap();
        assert_eq!(encoding::from_text(&token).unwrap().len(), MIN_ENVELOPE_LEN);
    }

    #[test]
    fn same_plaintext_different_tokens() {
        let a = shared().encrypt("same").unwrap();
        let b = shared().encrypt("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn default_and_explicit_paths_interoperate() {
        let cipher = TokenCipher::new("interop").unwrap();
        let minted = encrypt_with("file-123", "interop").unwrap();
        assert_eq!(cipher.decrypt(&minted).unwrap(), "file-123");

        let local = cipher.encrypt("file-456").unwrap();
        assert_eq!(decrypt_with(&local, "interop").unwrap(), "file-456");
    }

    #[test]
    fn blank_override_secret_is_missing_secret() {
        assert_eq!(encrypt_with("x", "").unwrap_err(), TokenError::MissingSecret);
        assert_eq!(decrypt_with("x", " ").unwrap_err(), TokenError::MissingSecret);
    }

    #[test]
    fn short_token_is_malformed_not_auth_failure() {
        let short = encoding::to_text(&[0u8; MIN_ENVELOPE_LEN - 1]);
        assert_eq!(shared().decrypt(&short).unwrap_err(), TokenError::MalformedToken);
        assert_eq!(shared().decrypt("").unwrap_err(), TokenError::MalformedToken);
    }

    #[test]
    fn non_base64_is_malformed() {
        assert_eq!(
            shared().decrypt("not a token!").unwrap_err(),
            TokenError::MalformedToken
        );
    }

    #[test]
    fn authenticated_non_utf8_is_encoding_failure() {
        let nonce = generate_nonce();
        let Sealed { ciphertext, tag } =
            cipher::seal(&shared().key, &nonce, &[0xff, 0xfe]).unwrap();
        let token = encoding::to_text(&Envelope { nonce, tag, ciphertext }.to_bytes());
        assert_eq!(shared().decrypt(&token).unwrap_err(), TokenError::EncodingFailure);
    }

    #[test]
    fn concurrent_use_without_locking() {
        let cipher = Arc::new(TokenCipher::new("concurrency").unwrap());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cipher = Arc::clone(&cipher);
                std::thread::spawn(move || {
                    for j in 0..50 {
                        let p = format!("id-{i}-{j}");
                        let token = cipher.encrypt(&p).unwrap();
                        assert_eq!(cipher.decrypt(&token).unwrap(), p);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
    }
}
