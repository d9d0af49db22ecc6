//! Item metrics and their export.
//!
//! # Metrics
//! - `app_items_created` (counter): items created
//! - `app_items_deleted` (counter): items deleted
//! - `app_item_name_length` (histogram): item name length in characters
//! - `app_items_count` (gauge): items currently stored
//!
//! # Design Decisions
//! - Handlers only see the `Telemetry` trait; the backend is picked once at
//!   startup
//! - Export problems never stop the service: they degrade to `NoopTelemetry`
//! - Prometheus global labels carry the service name, version and instance

use std::net::{AddrParseError, SocketAddr};
use std::sync::Arc;

use metrics::{describe_counter, describe_gauge, describe_histogram, Unit};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use thiserror::Error;

use crate::config::Settings;

pub const ITEMS_CREATED: &str = "app_items_created";
pub const ITEMS_DELETED: &str = "app_items_deleted";
pub const ITEM_NAME_LENGTH: &str = "app_item_name_length";
pub const ITEMS_COUNT: &str = "app_items_count";

/// Instruments exposed to the HTTP surface.
pub trait Telemetry: Send + Sync {
    fn record_item_created(&self);

    fn record_item_deleted(&self);

    fn record_name_length(&self, chars: usize);

    /// Move the current item count up or down.
    fn adjust_item_count(&self, delta: i64);

    /// Whether measurements leave the process.
    fn is_exporting(&self) -> bool;
}

/// Backend used when export is not configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn record_item_created(&self) {}

    fn record_item_deleted(&self) {}

    fn record_name_length(&self, _chars: usize) {}

    fn adjust_item_count(&self, _delta: i64) {}

    fn is_exporting(&self) -> bool {
        false
    }
}

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid metrics address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: AddrParseError,
    },

    #[error("failed to install Prometheus exporter: {0}")]
    Install(#[from] BuildError),
}

/// Exporter builder carrying the service identity as global labels.
fn labelled_builder(settings: &Settings) -> PrometheusBuilder {
    let mut builder = PrometheusBuilder::new()
        .add_global_label("service_name", settings.app_name.clone())
        .add_global_label("service_version", settings.app_version.clone());
    if let Some(instance) = settings.instance_id() {
        builder = builder.add_global_label("service_instance_id", instance);
    }
    builder
}

/// Backend that records through the global `metrics` recorder, scraped by
/// Prometheus.
#[derive(Debug)]
pub struct PrometheusTelemetry {
    listen: SocketAddr,
}

impl PrometheusTelemetry {
    /// Install the Prometheus recorder with a scrape listener on `address`.
    ///
    /// Must run inside a Tokio runtime; the listener is spawned onto it.
    pub fn install(address: &str, settings: &Settings) -> Result<Self, TelemetryError> {
        let listen: SocketAddr =
            address
                .parse()
                .map_err(|source| TelemetryError::InvalidAddress {
                    address: address.to_string(),
                    source,
                })?;

        labelled_builder(settings)
            .with_http_listener(listen)
            .install()?;

        describe_counter!(ITEMS_CREATED, Unit::Count, "Number of items created");
        describe_counter!(ITEMS_DELETED, Unit::Count, "Number of items deleted");
        describe_histogram!(ITEM_NAME_LENGTH, "Distribution of item name lengths in characters");
        describe_gauge!(ITEMS_COUNT, Unit::Count, "Current number of items in the store");

        Ok(Self { listen })
    }

    pub fn listen_address(&self) -> SocketAddr {
        self.listen
    }
}

impl Telemetry for PrometheusTelemetry {
    fn record_item_created(&self) {
        metrics::counter!(ITEMS_CREATED).increment(1);
    }

    fn record_item_deleted(&self) {
        metrics::counter!(ITEMS_DELETED).increment(1);
    }

    fn record_name_length(&self, chars: usize) {
        metrics::histogram!(ITEM_NAME_LENGTH).record(chars as f64);
    }

    fn adjust_item_count(&self, delta: i64) {
        let gauge = metrics::gauge!(ITEMS_COUNT);
        if delta >= 0 {
            gauge.increment(delta as f64);
        } else {
            gauge.decrement(delta.unsigned_abs() as f64);
        }
    }

    fn is_exporting(&self) -> bool {
        true
    }
}

/// Pick the telemetry backend for this process.
pub fn init_telemetry(settings: &Settings) -> Arc<dyn Telemetry> {
    let Some(address) = settings.observability.metrics_address.as_deref() else {
        tracing::warn!("METRICS_ADDRESS not set, telemetry will not be exported");
        return Arc::new(NoopTelemetry);
    };

    match PrometheusTelemetry::install(address, settings) {
        Ok(telemetry) => {
            tracing::info!(
                address = %telemetry.listen_address(),
                service = %settings.app_name,
                version = %settings.app_version,
                "Prometheus exporter configured"
            );
            Arc::new(telemetry)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to configure telemetry, continuing without export");
            Arc::new(NoopTelemetry)
        }
    }
}
