//! Settings validation.
//!
//! Semantic checks run after the environment has been parsed. Every problem
//! is collected so an operator sees the whole list in one start attempt.

use std::fmt;

use crate::config::schema::Settings;

/// A single semantic problem in the loaded settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate settings, returning every problem found.
pub fn validate_settings(settings: &Settings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.app_name.trim().is_empty() {
        errors.push(ValidationError {
            field: "APP_NAME",
            message: "must not be empty".into(),
        });
    }

    if settings.app_version.trim().is_empty() {
        errors.push(ValidationError {
            field: "APP_VERSION",
            message: "must not be empty".into(),
        });
    }

    if settings.host.trim().is_empty() {
        errors.push(ValidationError {
            field: "HOST",
            message: "must not be empty".into(),
        });
    }

    if settings.limits.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "REQUEST_TIMEOUT_SECS",
            message: "must be greater than 0".into(),
        });
    }

    if settings.limits.max_body_bytes == 0 {
        errors.push(ValidationError {
            field: "MAX_BODY_BYTES",
            message: "must be greater than 0".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
