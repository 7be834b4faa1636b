//! Opaque, authenticated tokens for backend resource identifiers.
//!
//! Folder/file IDs, content URLs, and short-lived access tokens are sealed
//! with AES-256-GCM under a key derived from a deployment secret, and shipped
//! as unpadded base64url so they can sit directly in paths and query strings.
//!
//! # Token format
//!
//! ```text
//! base64url-no-pad( nonce[12] ‖ tag[16] ‖ ciphertext[N] )
//! ```
//!
//! A 35-byte identifier becomes a 63-byte envelope and an 84-character token.
//!
//! # Call shapes
//!
//! - [`TokenCipher::encrypt`] / [`TokenCipher::decrypt`] use a key derived
//!   once from the runtime secret.
//! - [`encrypt_with`] / [`decrypt_with`] derive a key from a caller-supplied
//!   secret on every call, for minting tokens for another deployment.

pub mod cipher;
pub mod encoding;
pub mod envelope;
pub mod error;
pub mod kdf;
pub mod service;

pub use error::TokenError;
pub use kdf::{derive_key, DerivedKey};
pub use service::{decrypt_with, encrypt_with, TokenCipher};
