//! kubemock server binary.
//!
//! Binds the TokenReview mock to a TCP listener and serves until Ctrl+C.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use kubemock_server::{create_app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_target(true)
        .init();

    let state = Arc::new(AppState::new());
    let app = create_app(state, config.read_timeout());

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("could not start tcp listener on {}", config.listen))?;

    info!(addr = %config.listen, "Starting kube http server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("kube http server closed with unexpected error")?;

    info!("Kube server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
