//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read & parse variables)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Settings are read once at startup; changes require a restart
//! - All fields have defaults so an empty environment is runnable
//! - Validation separates parsing errors from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_settings, load_settings_from, load_settings_from_map, ConfigError};
pub use schema::{ContainerInfo, LimitsConfig, LogFormat, ObservabilityConfig, Settings};
