//! Tracing setup: structured JSON logs, optionally exported as OTLP spans.
//!
//! # Telemetry invariants
//!
//! - **No plaintext, secret, key material, or token value** may appear in any
//!   span attribute or log field. Token failures are logged by error kind only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
