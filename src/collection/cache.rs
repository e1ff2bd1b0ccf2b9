//! Single-slot position cache.
//!
//! Remembers the last resolved `(key, index)` pair so that repeated access to
//! the same key skips the search. Callers usually touch one key several times
//! in a row (get, then set, then get again), which this catches.
//!
//! The cache affects speed only. Dropping it changes no result; the owning
//! collection clears it whenever slot positions change.

use crate::types::CollectionKey;

/// Last resolved key and its slot index, plus hit counters.
#[derive(Debug, Clone)]
pub struct PositionCache<K: CollectionKey> {
    slot: Option<(K, usize)>,
    read_hits: u64,
    write_hits: u64,
}

impl<K: CollectionKey> Default for PositionCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CollectionKey> PositionCache<K> {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            slot: None,
            read_hits: 0,
            write_hits: 0,
        }
    }

    /// Return the cached index if `key` is the cached key.
    ///
    /// Does not count a hit; the caller decides whether it was a read or write.
    #[inline]
    pub fn check(&self, key: &K::Lookup) -> Option<usize> {
        match &self.slot {
            Some((cached, idx)) if cached.matches(key) => Some(*idx),
            _ => None,
        }
    }

    /// Remember `key` at `idx`
    #[inline]
    pub fn store(&mut self, key: K, idx: usize) {
        self.slot = Some((key, idx));
    }

    /// Forget the cached position
    #[inline]
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Check whether `key` is currently cached
    #[inline]
    pub fn contains(&self, key: &K::Lookup) -> bool {
        self.check(key).is_some()
    }

    /// Cached slot index, if any
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.slot.as_ref().map(|(_, idx)| *idx)
    }

    #[inline]
    pub fn record_read_hit(&mut self) {
        self.read_hits += 1;
    }

    #[inline]
    pub fn record_write_hit(&mut self) {
        self.write_hits += 1;
    }

    #[inline]
    pub fn read_hits(&self) -> u64 {
        self.read_hits
    }

    #[inline]
    pub fn write_hits(&self) -> u64 {
        self.write_hits
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
