//! Keyed object store.
//!
//! A narrow identifier -> object capability. [`VertexEdgeCache`] depends only on
//! the [`KeyedObjectStore`] trait, so the backing container can be swapped
//! (hash table, arena with an index, ...) without touching merge logic.
//!
//! There is no eviction and no capacity bound: a store accumulates entries for
//! the lifetime of one exploration session.
//!
//! [`VertexEdgeCache`]: crate::cache::VertexEdgeCache

use std::collections::HashMap;

use crate::error::{Result, StoreError};

/// Identifier -> object mapping with point lookups.
///
/// No ordering is guaranteed across entries.
///
/// Entries are updated in place through [`get_mut`](Self::get_mut), and the
/// cache never calls [`set`](Self::set) again after mutating a borrowed entry.
/// A backend that hands out copies and only persists on `set` cannot
/// implement this trait.
pub trait KeyedObjectStore<T> {
    /// True iff an entry exists for `id`.
    fn has(&self, id: &str) -> bool;

    /// Borrow the entry for `id`.
    ///
    /// Returns [`StoreError::NotFound`] when `has(id)` is false.
    fn get(&self, id: &str) -> Result<&T>;

    /// Mutably borrow the entry for `id`.
    ///
    /// Changes made through the borrow must be visible to later lookups.
    fn get_mut(&mut self, id: &str) -> Result<&mut T>;

    /// Insert or overwrite the entry for `id`.
    fn set(&mut self, id: String, value: T);

    /// Remove the entry for `id`, returning it. No-op for unknown ids.
    fn delete(&mut self, id: &str) -> Option<T>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// True when nothing is stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate `(id, entry)` pairs in unspecified order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &T)> + '_>;

    /// Drop every entry.
    fn clear(&mut self);
}

/// In-memory [`KeyedObjectStore`] backed by a `HashMap`.
#[derive(Debug, Clone)]
pub struct MemoryStore<T> {
    entries: HashMap<String, T>,
}

impl<T> MemoryStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Create an empty store pre-sized for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> KeyedObjectStore<T> for MemoryStore<T> {
    fn has(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    fn get(&self, id: &str) -> Result<&T> {
        self.entries.get(id).ok_or_else(|| StoreError::not_found(id))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut T> {
        self.entries
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn set(&mut self, id: String, value: T) {
        self.entries.insert(id, value);
    }

    fn delete(&mut self, id: &str) -> Option<T> {
        self.entries.remove(id)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = (&str, &T)> + '_> {
        Box::new(self.entries.iter().map(|(id, value)| (id.as_str(), value)))
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}
