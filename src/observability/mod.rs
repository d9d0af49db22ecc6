//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and middleware produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (item counters, gauge, histogram via Telemetry)
//!     → tracing.rs (request spans with request ids)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (when METRICS_ADDRESS is set)
//! ```

pub mod logging;
pub mod metrics;
pub mod tracing;

pub use self::logging::init_logging;
pub use self::metrics::{init_telemetry, NoopTelemetry, PrometheusTelemetry, Telemetry};
