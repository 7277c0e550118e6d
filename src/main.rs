//! Interactions endpoint entry point.
//!
//! Reads the configuration, then serves the interactions webhook until the
//! process is stopped.

use std::sync::Arc;

use tracing::{error, info, warn};

use minsky::config::Config;
use minsky::handlers;
use minsky::server::{self, AppState};

#[tokio::main]
async fn main() {
    // Respects RUST_LOG, defaults to info for this crate and the HTTP layer.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "minsky=info,tower_http=info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    if config.is_insecure() {
        warn!("signature verification is DISABLED; never expose this instance");
    }

    let router = handlers::router();
    info!(commands = ?router.command_names().collect::<Vec<_>>(), "routes ready");

    let state = Arc::new(AppState::new(&config, router));
    let app = server::app(state);

    let listener = match tokio::net::TcpListener::bind(config.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.bind, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(addr = %config.bind, "listening for interactions");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server stopped");
        std::process::exit(1);
    }
}
