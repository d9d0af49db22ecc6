//! Startup orchestration.
//!
//! # Order
//! 1. Telemetry backend (never fatal)
//! 2. Application state (empty store)
//! 3. Listener bind (fatal on failure)
//! 4. Signal handler, then serve until drained

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::Settings;
use crate::http::{AppState, HttpServer};
use crate::lifecycle::{signals, Shutdown};
use crate::observability::init_telemetry;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Start every subsystem and serve until a shutdown signal has drained.
pub async fn run(settings: Settings) -> Result<(), StartupError> {
    let settings = Arc::new(settings);

    tracing::info!(
        app = %settings.app_name,
        version = %settings.app_version,
        environment = %settings.environment,
        debug = settings.debug,
        "Starting"
    );

    let telemetry = init_telemetry(&settings);
    let shutdown = Shutdown::new();
    let state = AppState::new(settings.clone(), telemetry, shutdown.clone());
    let server = HttpServer::new(state);

    let address = settings.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown, Duration::from_secs(settings.shutdown_drain_secs));

    server.run(listener, server_shutdown).await?;
    Ok(())
}
