//! Health and metadata endpoints.
//!
//! # Data Flow
//! ```text
//! Orchestrator probes (probes.rs):
//!     /health, /health/live → always 200
//!     /health/ready         → 200, or 503 once Shutdown is draining
//!
//! Metadata (info.rs):
//!     /info → Settings + host name
//!     /     → welcome message and docs link
//! ```

pub mod info;
pub mod probes;
