//! Item types and field validation.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

fn default_quantity() -> i64 {
    1
}

/// Payload for creating an item.
///
/// `quantity` is signed so that a negative value reaches validation and is
/// reported like any other out-of-range field.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NewItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl NewItem {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            quantity: default_quantity(),
        }
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check every field, collecting all violations.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name_len = self.name.chars().count();
        if name_len == 0 {
            errors.push(FieldError::new("name", "must not be empty"));
        } else if name_len > NAME_MAX_CHARS {
            errors.push(FieldError::new(
                "name",
                format!("must be at most {NAME_MAX_CHARS} characters"),
            ));
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_CHARS {
                errors.push(FieldError::new(
                    "description",
                    format!("must be at most {DESCRIPTION_MAX_CHARS} characters"),
                ));
            }
        }

        if !self.price.is_finite() || self.price <= 0.0 {
            errors.push(FieldError::new("price", "must be greater than 0"));
        }

        if self.quantity < 0 {
            errors.push(FieldError::new("quantity", "must be greater than or equal to 0"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A stored item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub quantity: u64,
}

impl Item {
    /// `price * quantity`, computed on every call.
    pub fn total_value(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}
