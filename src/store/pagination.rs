//! Offset/limit windows over the item listing.

use crate::store::item::FieldError;

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// A validated `items[skip .. skip + limit]` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    skip: usize,
    limit: usize,
}

impl Page {
    /// Build a window, rejecting `skip < 0` and `limit` outside `[1, 100]`.
    pub fn new(skip: i64, limit: i64) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        if skip < 0 {
            errors.push(FieldError::new("skip", "must be greater than or equal to 0"));
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            errors.push(FieldError::new(
                "limit",
                format!("must be between 1 and {MAX_LIMIT}"),
            ));
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            skip: usize::try_from(skip).unwrap_or(usize::MAX),
            limit: usize::try_from(limit).unwrap_or(usize::MAX),
        })
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT as usize,
        }
    }
}
