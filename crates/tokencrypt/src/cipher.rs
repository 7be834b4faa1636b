//! AES-256-GCM seal/open with a detached tag.
//!
//! A fresh random 96-bit nonce is drawn from the OS CSPRNG for every seal.
//! **Never reuse a nonce under the same key.** GCM nonce reuse is catastrophic:
//! it breaks both confidentiality and authentication.

use aes_gcm::{
    aead::{rand_core::RngCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce, Tag,
};

use crate::error::TokenError;
use crate::kdf::DerivedKey;

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Ciphertext plus its detached authentication tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Encrypted bytes; same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// Tag binding key, nonce, and ciphertext.
    pub tag: [u8; TAG_LEN],
}

/// Draw a fresh random nonce.
pub fn generate_nonce() -> [u8; NONCE_LEN] {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

/// Encrypt `plaintext` under `key` and `nonce`, with no associated data.
///
/// # Errors
///
/// Returns [`TokenError::Sealing`] if the AEAD refuses the input, which only
/// happens for plaintexts beyond the AES-GCM length limit.
pub fn seal(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<Sealed, TokenError> {
    let mut buffer = plaintext.to_vec();
    let tag = build_cipher(key)
        .encrypt_in_place_detached(Nonce::from_slice(nonce), b"", &mut buffer)
        .map_err(|_| TokenError::Sealing)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);
    Ok(Sealed {
        ciphertext: buffer,
        tag: tag_bytes,
    })
}

/// Verify `tag` and decrypt `ciphertext`.
///
/// No plaintext is returned unless the tag verifies.
///
/// # Errors
///
/// Returns [`TokenError::AuthenticationFailure`] on any mismatch. The cause
/// (wrong key, wrong nonce, altered tag or ciphertext) is not distinguished.
pub fn open(
    key: &DerivedKey,
    nonce: &[u8; NONCE_LEN],
    tag: &[u8; TAG_LEN],
    ciphertext: &[u8],
) -> Result<Vec<u8>, TokenError> {
    let mut buffer = ciphertext.to_vec();
    build_cipher(key)
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            b"",
            &mut buffer,
            Tag::from_slice(tag),
        )
        .map_err(|_| TokenError::AuthenticationFailure)?;
    Ok(buffer)
}

fn build_cipher(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kdf::derive_key;
    use std::sync::OnceLock;

    fn key() -> &'static DerivedKey {
        static KEY: OnceLock<DerivedKey> = OnceLock::new();
        KEY.get_or_init(|| derive_key("cipher-tests").unwrap())
    }

    #[test]
    fn seal_open_round_trip() {
        let nonce = generate_nonce();
        let sealed = seal(key(), &nonce, b"folder-id").unwrap();
        assert_eq!(sealed.ciphertext.len(), b"folder-id".len());
        let opened = open(key(), &nonce, &sealed.tag, &sealed.ciphertext).unwrap();
        assert_eq!(opened, b"folder-id");
    }

    #[test]
    fn empty_plaintext_still_tagged() {
        let nonce = generate_nonce();
        let sealed = seal(key(), &nonce, b"").unwrap();
        assert!(sealed.ciphertext.is_empty());
        assert!(open(key(), &nonce, &sealed.tag, &[]).unwrap().is_empty());
    }

    #[test]
    fn nonces_differ() {
        assert_ne!(generate_nonce(), generate_nonce());
    }

    #[test]
    fn wrong_nonce_fails() {
        let nonce = generate_nonce();
        let sealed = seal(key(), &nonce, b"abc").unwrap();
        let mut other = nonce;
        other[0] ^= 1;
        assert_eq!(
            open(key(), &other, &sealed.tag, &sealed.ciphertext).unwrap_err(),
            TokenError::AuthenticationFailure
        );
    }

    #[test]
    fn tampered_tag_fails() {
        let nonce = generate_nonce();
        let mut sealed = seal(key(), &nonce, b"abc").unwrap();
        sealed.tag[TAG_LEN - 1] ^= 0x80;
        assert_eq!(
            open(key(), &nonce, &sealed.tag, &sealed.ciphertext).unwrap_err(),
            TokenError::AuthenticationFailure
        );
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let nonce = generate_nonce();
        let mut sealed = seal(key(), &nonce, b"tamper me").unwrap();
        sealed.ciphertext[0] ^= 0xFF;
        assert_eq!(
            open(key(), &nonce, &sealed.tag, &sealed.ciphertext).unwrap_err(),
            TokenError::AuthenticationFailure
        );
    }

    #[test]
    fn truncated_ciphertext_fails() {
        let nonce = generate_nonce();
        let sealed = seal(key(), &nonce, b"truncate me").unwrap();
        let short = &sealed.ciphertext[..sealed.ciphertext.len() - 1];
        assert!(open(key(), &nonce, &sealed.tag, short).is_err());
    }
}
