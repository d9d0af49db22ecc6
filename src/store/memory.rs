//! In-memory item store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::store::item::{Item, NewItem};
use crate::store::pagination::Page;
use crate::store::StoreError;

#[derive(Debug, Default)]
struct Inner {
    /// Keyed by id. Ids are assigned in increasing order, so key order is
    /// insertion order.
    items: BTreeMap<u64, Item>,
    /// Last id handed out. Never decreases.
    last_id: u64,
}

/// Process-local item store.
///
/// Every operation holds the lock for its whole body and never across an
/// `.await`, so operations are atomic relative to each other.
#[derive(Debug, Default)]
pub struct ItemStore {
    inner: Mutex<Inner>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // No operation can leave the map half-written, so a poisoned lock
        // still guards consistent data.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and store a new item, assigning the next id.
    pub fn create(&self, new: NewItem) -> Result<Item, StoreError> {
        new.validate().map_err(StoreError::Validation)?;

        let mut inner = self.lock();
        inner.last_id += 1;
        let item = Item {
            id: inner.last_id,
            name: new.name,
            description: new.description,
            price: new.price,
            quantity: new.quantity.unsigned_abs(),
        };
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    pub fn get(&self, id: u64) -> Result<Item, StoreError> {
        self.lock()
            .items
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Items in insertion order, windowed by `page`.
    pub fn list(&self, page: Page) -> Vec<Item> {
        self.lock()
            .items
            .values()
            .skip(page.skip())
            .take(page.limit())
            .cloned()
            .collect()
    }

    /// Remove an item. Its id is never handed out again.
    pub fn delete(&self, id: u64) -> Result<(), StoreError> {
        self.lock()
            .items
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
