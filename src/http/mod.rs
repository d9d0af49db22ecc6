//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request id)
//!     → extract.rs (JSON/query/path parsing, 422 on rejection)
//!     → items.rs / health / docs.rs (handlers)
//!     → error.rs (structured error body)
//!     → Send to client
//! ```

pub mod docs;
pub mod extract;
pub mod items;
pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
