//! Common types, protocol definitions, and errors shared across `tokencrypt` binaries.

pub mod error;
pub mod protocol;

pub use error::ServiceError;
