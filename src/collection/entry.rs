//! Collection entry: one key and its value.
//!
//! Entries live contiguously in the collection's backing array, in
//! insertion order for unordered collections and key order for ordered
//! ones. Moving an entry moves both key and value together.

use crate::types::{CollectionKey, Value};

/// A key/value slot in the backing array.
#[derive(Debug)]
pub struct Entry<K: CollectionKey, D> {
    /// The entry key (owned)
    pub key: K,

    /// The typed value
    pub value: Value<D>,
}

impl<K: CollectionKey, D> Entry<K, D> {
    /// Create a new entry
    #[inline]
    pub fn new(key: K, value: Value<D>) -> Self {
        Self { key, value }
    }

    /// Get the key in lookup form
    #[inline]
    pub fn lookup(&self) -> &K::Lookup {
        self.key.as_lookup()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
