//! Unpadded URL-safe base64 text form of an envelope.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};

use crate::error::TokenError;

/// Encode envelope bytes as a token string. Never contains `+`, `/` or `=`.
pub fn to_text(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode a token string back to envelope bytes.
///
/// # Errors
///
/// Returns [`TokenError::MalformedToken`] for characters outside the URL-safe
/// alphabet, padding characters, impossible lengths, or non-canonical
/// trailing bits.
pub fn from_text(text: &str) -> Result<Vec<u8>, TokenError> {
    URL_SAFE_NO_PAD
        .decode(text)
        .map_err(|_| TokenError::MalformedToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_url_safe() {
        let bytes: Vec<u8> = (0..=255).collect();
        let text = to_text(&bytes);
        assert!(!text.contains(['+', '/', '=']));
        assert_eq!(from_text(&text).unwrap(), bytes);
    }

    #[test]
    fn rejects_standard_alphabet() {
        assert_eq!(from_text("ab+/").unwrap_err(), TokenError::MalformedToken);
    }

    #[test]
    fn rejects_padding() {
        let padded = format!("{}=", to_text(b"ab"));
        assert_eq!(from_text(&padded).unwrap_err(), TokenError::MalformedToken);
    }

    #[test]
    fn rejects_impossible_length() {
        // A single trailing symbol carries fewer than 8 bits.
        assert_eq!(from_text("abcde").unwrap_err(), TokenError::MalformedToken);
    }

    #[test]
    fn rejects_non_canonical_trailing_bits() {
        // "AB" would decode to one byte only if the low 4 bits of 'B' were ignored.
        assert_eq!(from_text("AB").unwrap_err(), TokenError::MalformedToken);
    }

    #[test]
    fn rejects_whitespace() {
        assert!(from_text("abcd efgh").is_err());
    }
}
