//! Indirect (two-level) integer-keyed list.
//!
//! ## Layout
//!
//! ```text
//! IList "dances"
//!   ├─ 0 -> NList "dances-item-0" { 1: "Waltz", 2: 90 }
//!   ├─ 1 -> NList "dances-item-1" { 1: "Tango", 2: 64 }
//!   └─ ...
//! ```
//!
//! The outer key is a record index; the inner key is a field index. The
//! record list is created on the first set for its outer key. Reads never
//! create records.

use crate::collection::{Collection, Cursor, ListOrder};
use crate::types::CollectionKey;
use crate::views::{NList, SList};

/// Records keyed by integer, each holding integer-keyed fields
pub struct IList<D = ()> {
    list: NList<D>,
}

impl<D> IList<D> {
    /// Create an empty indirect list
    pub fn new(name: impl Into<String>, order: ListOrder) -> Self {
        Self {
            list: NList::new(name, order),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.list.name()
    }

    #[inline]
    pub fn order(&self) -> ListOrder {
        self.list.order()
    }

    /// Number of records
    #[inline]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.list.capacity()
    }

    pub fn reserve(&mut self, n: usize) {
        self.list.reserve(n);
    }

    #[inline]
    pub fn version(&self) -> i32 {
        self.list.version()
    }

    pub fn set_version(&mut self, version: i32) {
        self.list.set_version(version);
    }

    // ========================================================================
    // Fields
    // ========================================================================

    pub fn set_str(&mut self, ikey: i64, lidx: i64, value: &str) {
        if let Some(record) = self.record_or_create(ikey) {
            record.set_str(&lidx, value);
        }
    }

    pub fn set_num(&mut self, ikey: i64, lidx: i64, value: i64) {
        if let Some(record) = self.record_or_create(ikey) {
            record.set_num(&lidx, value);
        }
    }

    pub fn set_double(&mut self, ikey: i64, lidx: i64, value: f64) {
        if let Some(record) = self.record_or_create(ikey) {
            record.set_double(&lidx, value);
        }
    }

    pub fn set_data(&mut self, ikey: i64, lidx: i64, data: D) {
        if let Some(record) = self.record_or_create(ikey) {
            record.set_data(&lidx, data);
        }
    }

    /// Store a nested collection of either key kind in a field
    pub fn set_list<L: CollectionKey>(&mut self, ikey: i64, lidx: i64, list: Collection<L, D>) {
        if let Some(record) = self.record_or_create(ikey) {
            record.set_list(&lidx, list);
        }
    }

    pub fn get_str(&mut self, ikey: i64, lidx: i64) -> Option<&str> {
        self.record_mut(ikey)?.get_str(&lidx)
    }

    pub fn get_num(&mut self, ikey: i64, lidx: i64) -> Option<i64> {
        let value = self.record_mut(ikey)?.get_num(&lidx);
        tracing::trace!(list = %self.name(), ikey, lidx, ?value, "ilist get");
        value
    }

    pub fn get_double(&mut self, ikey: i64, lidx: i64) -> Option<f64> {
        self.record_mut(ikey)?.get_double(&lidx)
    }

    pub fn get_data(&mut self, ikey: i64, lidx: i64) -> Option<&D> {
        self.record_mut(ikey)?.get_data(&lidx)
    }

    pub fn get_list(&mut self, ikey: i64, lidx: i64) -> Option<&NList<D>> {
        self.record_mut(ikey)?.get_list(&lidx)
    }

    pub fn get_slist(&mut self, ikey: i64, lidx: i64) -> Option<&SList<D>> {
        self.record_mut(ikey)?.get_slist(&lidx)
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// Check whether a record exists for `ikey`
    pub fn exists(&mut self, ikey: i64) -> bool {
        self.list.get_list(&ikey).is_some()
    }

    /// Fields of the record at `ikey`
    pub fn record(&mut self, ikey: i64) -> Option<&NList<D>> {
        self.list.get_list(&ikey)
    }

    /// Delete the record at `ikey` with all its fields (ordered lists only)
    pub fn delete(&mut self, ikey: i64) -> bool {
        self.list.delete(&ikey)
    }

    /// Sort records by outer key
    pub fn sort(&mut self) -> u64 {
        self.list.sort()
    }

    pub fn start_iterator(&self) -> Cursor {
        self.list.start_iterator()
    }

    /// Step to the next record and return its outer key
    pub fn iterate_key(&mut self, cursor: &mut Cursor) -> Option<i64> {
        self.list.iterate_key(cursor).copied()
    }

    pub fn dump_info(&self) {
        self.list.dump_info();
    }

    /// Content digest over all records and fields
    pub fn content_digest_hex(&self) -> String {
        self.list.content_digest_hex()
    }

    fn record_mut(&mut self, ikey: i64) -> Option<&mut NList<D>> {
        self.list.get_list_mut(&ikey)
    }

    fn record_or_create(&mut self, ikey: i64) -> Option<&mut NList<D>> {
        if self.list.get_list(&ikey).is_none() {
            let name = format!("{}-item-{}", self.list.name(), ikey);
            self.list.set_nlist(&ikey, NList::new(name, ListOrder::Ordered));
        }
        self.list.get_list_mut(&ikey)
    }
}

impl<D> std::fmt::Debug for IList<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IList").field(&self.list).finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
