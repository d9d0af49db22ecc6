//! Configuration schema definitions.
//!
//! This module defines the complete settings structure for the service.
//! All fields have defaults so an empty environment yields a runnable config.

use serde::{Deserialize, Serialize};

/// Root settings for the item service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Application name, reported by `/info` and the welcome message.
    pub app_name: String,

    /// Application version.
    pub app_version: String,

    /// Deployment environment tag (development, staging, production...).
    pub environment: String,

    /// Debug flag. Raises the default log level.
    pub debug: bool,

    /// Bind host (e.g., "0.0.0.0").
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Container platform metadata. Informational only.
    pub container: ContainerInfo,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// HTTP limits and timeouts.
    pub limits: LimitsConfig,

    /// Seconds between the readiness flip and closing the listener.
    pub shutdown_drain_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: "Item Service".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
            debug: false,
            host: "0.0.0.0".to_string(),
            port: 8000,
            container: ContainerInfo::default(),
            observability: ObservabilityConfig::default(),
            limits: LimitsConfig::default(),
            shutdown_drain_secs: 5,
        }
    }
}

impl Settings {
    /// Address the listener binds to, as `host:port`.
    pub fn bind_address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    /// Identifier for this running instance: replica name when the platform
    /// injects one, otherwise the host name.
    pub fn instance_id(&self) -> Option<String> {
        self.container
            .replica_name
            .clone()
            .or_else(|| hostname::get().ok().map(|h| h.to_string_lossy().into_owned()))
    }
}

/// Identifiers injected by the container platform.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ContainerInfo {
    pub app_name: Option<String>,
    pub revision: Option<String>,
    pub replica_name: Option<String>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Prometheus scrape listener address. Telemetry export is disabled
    /// when unset.
    pub metrics_address: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_address: None,
        }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            max_body_bytes: 1024 * 1024, // 1MB
        }
    }
}
