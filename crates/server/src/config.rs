//! Configuration loading and validation for the token server.
//!
//! All values are read from environment variables at startup. The process will
//! exit with a clear error message if any required variable is missing or invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Value of `APP_ENV` that disables the debug harness.
pub const PRODUCTION: &str = "production";

/// Validated server configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// Runtime secret the default token key is derived from. **Required.**
    #[serde(default)]
    pub token_secret: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Deployment environment. Anything other than `"production"` mounts
    /// `GET /debug/token`.
    #[serde(default = "default_app_env")]
    pub app_env: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// OTLP endpoint for span export. Spans are only logged when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_listen_port() -> u16 {
    8080
}
fn default_app_env() -> String {
    PRODUCTION.into()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Returns `true` when the debug harness should be mounted.
    pub fn debug_routes_enabled(&self) -> bool {
        !self.app_env.trim().eq_ignore_ascii_case(PRODUCTION)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.token_secret.trim().is_empty() {
            anyhow::bail!("TOKEN_SECRET is required and must not be empty");
        }
        if self.request_timeout_secs == 0 {
            anyhow::bail!("REQUEST_TIMEOUT_SECS must be > 0");
        }
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            if endpoint.trim().is_empty() {
                anyhow::bail!("OTEL_EXPORTER_OTLP_ENDPOINT must not be blank when set");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("token_secret", &"[REDACTED]")
            .field("listen_port", &self.listen_port)
            .field("app_env", &self.app_env)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("otel_exporter_otlp_endpoint", &self.otel_exporter_otlp_endpoint)
            .field("log_level", &self.log_level)
            .finish()
    }
}
