//! Settings loading from the process environment.

use std::collections::HashMap;
use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::config::schema::{LogFormat, Settings};
use crate::config::validation::{validate_settings, ValidationError};

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate settings from the process environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(|key| env::var(key).ok())
}

/// Load and validate settings from a map, as if it were the environment.
pub fn load_settings_from_map(vars: &HashMap<String, String>) -> Result<Settings, ConfigError> {
    load_settings_from(|key| vars.get(key).cloned())
}

/// Load and validate settings using `lookup` to resolve variables.
///
/// Empty values are treated as unset.
pub fn load_settings_from<F>(lookup: F) -> Result<Settings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
    let mut settings = Settings::default();

    if let Some(v) = get("APP_NAME") {
        settings.app_name = v;
    }
    if let Some(v) = get("APP_VERSION") {
        settings.app_version = v;
    }
    if let Some(v) = get("ENVIRONMENT") {
        settings.environment = v;
    }
    if let Some(v) = get("DEBUG") {
        settings.debug = parse_bool("DEBUG", &v)?;
    }
    if let Some(v) = get("HOST") {
        settings.host = v;
    }
    if let Some(v) = get("PORT") {
        settings.port = parse_num("PORT", &v)?;
    }

    settings.container.app_name = get("CONTAINER_APP_NAME");
    settings.container.revision = get("CONTAINER_APP_REVISION");
    settings.container.replica_name = get("CONTAINER_APP_REPLICA_NAME");

    settings.observability.metrics_address = get("METRICS_ADDRESS");
    if let Some(v) = get("LOG_LEVEL") {
        settings.observability.log_level = v;
    } else if settings.debug {
        settings.observability.log_level = "debug".to_string();
    }
    if let Some(v) = get("LOG_FORMAT") {
        settings.observability.log_format = parse_log_format(&v)?;
    }

    if let Some(v) = get("REQUEST_TIMEOUT_SECS") {
        settings.limits.request_timeout_secs = parse_num("REQUEST_TIMEOUT_SECS", &v)?;
    }
    if let Some(v) = get("MAX_BODY_BYTES") {
        settings.limits.max_body_bytes = parse_num("MAX_BODY_BYTES", &v)?;
    }
    if let Some(v) = get("SHUTDOWN_DRAIN_SECS") {
        settings.shutdown_drain_secs = parse_num("SHUTDOWN_DRAIN_SECS", &v)?;
    }

    validate_settings(&settings).map_err(ConfigError::Validation)?;

    Ok(settings)
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}

fn parse_num<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        _ => Err(ConfigError::InvalidValue {
            key: "LOG_FORMAT",
            value: value.to_string(),
            reason: "expected `pretty` or `json`".into(),
        }),
    }
}
