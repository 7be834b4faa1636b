//! Binary envelope: `nonce(12) ‖ tag(16) ‖ ciphertext(N)`.
//!
//! Field widths are fixed, so there are no length prefixes and no version
//! byte. The layout is the token contract; changing it invalidates every
//! token already embedded in URLs and configuration.

use crate::cipher::{NONCE_LEN, TAG_LEN};
use crate::error::TokenError;

/// Smallest valid envelope: an empty plaintext still carries nonce and tag.
pub const MIN_ENVELOPE_LEN: usize = NONCE_LEN + TAG_LEN;

/// A parsed envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Per-token random nonce.
    pub nonce: [u8; NONCE_LEN],
    /// AES-GCM authentication tag.
    pub tag: [u8; TAG_LEN],
    /// Encrypted plaintext bytes.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Concatenate the fields in wire order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(MIN_ENVELOPE_LEN + self.ciphertext.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Split raw envelope bytes into their fields.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MalformedToken`] if `bytes` is shorter than
    /// [`MIN_ENVELOPE_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TokenError> {
        if bytes.len() < MIN_ENVELOPE_LEN {
            return Err(TokenError::MalformedToken);
        }
        let (nonce, rest) = bytes.split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);

        let mut envelope = Envelope {
            nonce: [0u8; NONCE_LEN],
            tag: [0u8; TAG_LEN],
            ciphertext: ciphertext.to_vec(),
        };
        envelope.nonce.copy_from_slice(nonce);
        envelope.tag.copy_from_slice(tag);
        Ok(envelope)
    }
}
