//! String-keyed list.
//!
//! Keys are ordered by locale collation, so an ordered `SList` iterates in
//! the order a reader of the configured locale expects.

use crate::collection::{Collection, Cursor};

/// Collection keyed by locale-collated strings
pub type SList<D = ()> = Collection<String, D>;

impl<D> Collection<String, D> {
    /// Key at slot `idx` as a string slice
    pub fn get_key_str_by_index(&self, idx: usize) -> Option<&str> {
        self.get_key_by_index(idx).map(String::as_str)
    }

    /// Step forward and return the key as a string slice
    pub fn iterate_key_str(&mut self, cursor: &mut Cursor) -> Option<&str> {
        self.iterate_key(cursor).map(String::as_str)
    }

    /// Step forward and return the slot index of the visited entry
    pub fn iterate_index(&mut self, cursor: &mut Cursor) -> Option<usize> {
        self.iterate_key(cursor)?;
        self.cursor_index(cursor)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
