//! Startup orchestration.
//!
//! # Responsibilities
//! - Start the metrics exporter when configured
//! - Create the database pool
//! - Bind the listener and serve until a shutdown signal arrives
//!
//! Configuration is loaded and validated by the caller, so a bad
//! environment never reaches this point.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::db::{ModelStore, MySqlStore};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] io::Error),
}

/// Run the API until SIGTERM/SIGINT, then drain and return.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let db = &config.database;
    tracing::info!(
        host = db.host.as_deref().unwrap_or("localhost"),
        port = db.port,
        database = db.database.as_deref().unwrap_or_default(),
        tls = db.tls,
        "Database configured"
    );
    if db.host.is_none() || db.user.is_none() || db.database.is_none() {
        tracing::warn!("Database settings incomplete, driver defaults will be used");
    }

    if let Some(addr) = config.observability.metrics_address {
        metrics::init_metrics(addr)?;
    }

    let store: Arc<dyn ModelStore> = Arc::new(MySqlStore::connect_lazy(&config.database));

    let addr = config.listener.bind_address();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        shutdown.trigger_on_signal().await;
    });

    HttpServer::new(&config, store)
        .run(listener, server_shutdown)
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
