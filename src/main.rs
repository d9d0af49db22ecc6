//! Item Service
//!
//! A small HTTP service built with Tokio and Axum: orchestrator probes,
//! service metadata, and an in-memory item store.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                 ITEM SERVICE                  │
//!                     │                                               │
//!   Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────┐   │
//!   ──────────────────┼─▶│middleware│──▶│ handlers │──▶│  store   │   │
//!                     │  │ req id,  │   │ items,   │   │ ordered  │   │
//!                     │  │ trace,   │   │ health,  │   │ map +    │   │
//!   Client Response   │  │ limits   │   │ info,    │   │ counter  │   │
//!   ◀─────────────────┼──│          │◀──│ docs     │◀──│          │   │
//!                     │  └──────────┘   └────┬─────┘   └──────────┘   │
//!                     │                      │                        │
//!                     │                      ▼                        │
//!                     │               ┌─────────────┐                 │
//!                     │               │  telemetry  │───▶ Prometheus  │
//!                     │               │ (or no-op)  │     scrape      │
//!                     │               └─────────────┘                 │
//!                     │                                               │
//!                     │  config (env, once) · lifecycle (drain/stop)  │
//!                     └───────────────────────────────────────────────┘
//! ```

use item_service::config::load_settings;
use item_service::lifecycle::startup;
use item_service::observability::init_logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings()?;
    init_logging(&settings.observability)?;

    tracing::info!(
        bind_address = %settings.bind_address(),
        environment = %settings.environment,
        request_timeout_secs = settings.limits.request_timeout_secs,
        metrics_address = ?settings.observability.metrics_address,
        "Configuration loaded"
    );

    startup::run(settings).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
