//! `tokencrypt-server` binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP spans).
//! 3. Derive the runtime token key from `TOKEN_SECRET`.
//! 4. Build the Axum router and serve until Ctrl-C / SIGTERM.
//!
//! Any failure before step 4 exits the process; no port is bound without a key.

mod config;
mod server;
mod telemetry;

use anyhow::{Context, Result};
use tokencrypt::TokenCipher;
use tracing::{info, warn};

use config::Config;
use server::{middleware::RouterOptions, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        app_env = %cfg.app_env,
        "tokencrypt-server starting"
    );

    // -----------------------------------------------------------------------
    // 3. Runtime key
    // -----------------------------------------------------------------------
    let secret = cfg.token_secret.clone();
    let cipher = tokio::task::spawn_blocking(move || TokenCipher::new(&secret))
        .await
        .context("key derivation task panicked")?
        .map_err(|e| {
            tracing::error!(kind = e.kind(), "runtime key derivation failed");
            e
        })
        .context("failed to derive runtime token key")?;
    info!("runtime token key derived");

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let options = RouterOptions {
        debug_routes: cfg.debug_routes_enabled(),
        request_timeout: std::time::Duration::from_secs(cfg.request_timeout_secs),
    };
    if options.debug_routes {
        warn!("debug token endpoint enabled; do not expose this deployment publicly");
    }
    let router = server::router::build(AppState::new(cipher), options);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    telemetry::shutdown_telemetry();
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    info!("shutdown signal received");
}
