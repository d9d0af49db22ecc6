//! Item storage subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → item.rs (NewItem::validate, all field errors at once)
//!     → memory.rs (ItemStore: id assignment, ordered map)
//!     → Item (total_value derived on read)
//! ```
//!
//! # Design Decisions
//! - Ids come from a monotonic counter and are never reused
//! - Validation happens before the lock is taken; failures change nothing
//! - No durability: the store lives and dies with the process

pub mod item;
pub mod memory;
pub mod pagination;

use thiserror::Error;

pub use item::{FieldError, Item, NewItem};
pub use memory::ItemStore;
pub use pagination::Page;

/// Errors returned by store operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("item with ID {0} not found")]
    NotFound(u64),
}

fn join_fields(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
