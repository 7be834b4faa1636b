//! Telemetry initialisation for the `tokenctl` CLI.
//!
//! Plain-text logs on stderr only, so stdout carries nothing but tokens and
//! plaintexts and can be piped straight into configuration files.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Initialise the tracing subscriber for the CLI.
///
/// # Errors
///
/// Returns an error if the subscriber has already been set.
pub fn init(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise tokenctl tracing subscriber: {e}"))
}
