//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Settings → Telemetry → State → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Readiness fails → Drain delay → Stop accepting
//!     → In-flight requests finish → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
