use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use storage::TrackingRepository;
use tokio::net::TcpListener;
use tracing::{info, instrument};
use tracker_core::init_tracing;

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;

/// Main entry: validate config, init logging, open the store, then serve until shutdown.
#[instrument(skip(config))]
pub async fn run_server(config: ServerConfig) -> Result<()> {
    config.validate()?;
    if let Some(dir) = Path::new(&config.log_file).parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        }
    }
    init_tracing(&config.log_file)?;

    info!(database_url = %config.database_url, "Initializing email tracker");

    let repo = TrackingRepository::new(&config.database_url)
        .await
        .context("Failed to open tracking database")?;
    let app = build_router(AppState::new(Arc::new(repo)));

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, "Email tracker listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Email tracker stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
