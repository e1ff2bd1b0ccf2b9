//! Keyed collection engine.
//!
//! ## Architecture
//!
//! A [`Collection`] is a contiguous array of `(key, value)` entries:
//!
//! - **Ordered** collections keep entries sorted by key. Lookups binary
//!   search; a new key is inserted at its sorted position; duplicates are
//!   impossible because setting an existing key replaces its value.
//! - **Unordered** collections keep insertion order. Every set appends, so a
//!   key may appear more than once, unless replace mode is on, in which case
//!   an existing key is found by linear scan and updated in place.
//!
//! ## Growth
//!
//! The backing array grows by [`GROWTH_INCREMENT`] slots at a time instead of
//! doubling. The application holds very many small collections, and peak
//! memory matters more there than amortized copy cost. [`Collection::reserve`]
//! pre-sizes when the final count is known.
//!
//! ## Position Cache
//!
//! A single `(key, index)` slot remembers the last lookup and, on ordered
//! collections, the last iterator step. Inserts, deletes and sorts clear it.
//! An in-place replace leaves it alone since no slot moves. Keys repeat in
//! unordered collections, so there only lookups fill the slot and the slot
//! always names the first match.
//!
//! ## Iteration
//!
//! Iteration uses an external [`Cursor`]. Stepping past either end returns
//! `None` once, and the following call starts over from the opposite end.
//! Callers stop on `None`; they never need to restart the cursor.
//!
//! ## Example
//!
//! ```
//! use jukebox_collections::collection::{Collection, ListOrder};
//!
//! let mut list: Collection<i64> = Collection::new("ratings", ListOrder::Ordered);
//! list.set_num(&30, 3);
//! list.set_num(&10, 1);
//! list.set_num(&20, 2);
//!
//! assert_eq!(list.get_num(&20), Some(2));
//! assert_eq!(list.get_key_by_index(0), Some(&10));
//!
//! let mut cursor = list.start_iterator();
//! let mut keys = Vec::new();
//! while let Some(key) = list.iterate_key(&mut cursor) {
//!     keys.push(*key);
//! }
//! assert_eq!(keys, vec![10, 20, 30]);
//! ```

use std::fmt;
use std::time::Instant;

use crate::collection::cache::PositionCache;
use crate::collection::entry::Entry;
use crate::collection::search;
use crate::types::{CollectionKey, KeyKind, NestedList, Value};

/// Slots added each time the backing array is full
pub const GROWTH_INCREMENT: usize = 5;

/// Version carried by a freshly created collection
pub const DEFAULT_VERSION: i32 = 1;

/// Callback that releases opaque `Data` values
pub type Destructor<D> = Box<dyn FnMut(D)>;

/// Entry ordering mode.
///
/// The only transition is `Unordered` to `Ordered`, via [`Collection::sort`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListOrder {
    /// Insertion order
    #[default]
    Unordered,
    /// Sorted by key
    Ordered,
}

/// External iteration position.
///
/// Starts before the first entry (forward) or after the last (reverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: isize,
}

impl Cursor {
    /// Position before the first entry
    const BEFORE_FIRST: isize = -1;

    /// Create a cursor positioned before the first entry
    #[inline]
    pub fn new() -> Self {
        Self {
            pos: Self::BEFORE_FIRST,
        }
    }

    #[inline]
    fn after_last(len: usize) -> Self {
        Self { pos: len as isize }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// Growable keyed collection.
///
/// `K` is the key type ([`String`] or [`i64`]); `D` is the opaque data type
/// stored by `Data` values.
pub struct Collection<K: CollectionKey, D = ()> {
    /// Diagnostic name
    name: String,

    /// Caller-owned format version tag
    version: i32,

    order: ListOrder,

    /// Unordered sets update an existing key instead of appending
    replace: bool,

    entries: Vec<Entry<K, D>>,

    /// Slots allocated so far, grown by GROWTH_INCREMENT
    alloc_count: usize,

    /// Widest key passed to set
    max_key_width: usize,

    /// Widest string value passed to set, in code points
    max_data_width: usize,

    cache: PositionCache<K>,

    destructor: Option<Destructor<D>>,
}

impl<K: CollectionKey, D> Collection<K, D> {
    /// Create an empty collection
    pub fn new(name: impl Into<String>, order: ListOrder) -> Self {
        let name = name.into();
        tracing::debug!(list = %name, key_kind = %K::KIND, ?order, "list alloc");

        Self {
            name,
            version: DEFAULT_VERSION,
            order,
            replace: false,
            entries: Vec::new(),
            alloc_count: 0,
            max_key_width: 0,
            max_data_width: 0,
            cache: PositionCache::new(),
            destructor: None,
        }
    }

    /// Create an empty collection whose `Data` values are released through
    /// `destructor`
    pub fn with_destructor(
        name: impl Into<String>,
        order: ListOrder,
        destructor: impl FnMut(D) + 'static,
    ) -> Self {
        let mut list = Self::new(name, order);
        list.destructor = Some(Box::new(destructor));
        list
    }

    /// Replace the value destructor
    pub fn set_destructor(&mut self, destructor: impl FnMut(D) + 'static) {
        self.destructor = Some(Box::new(destructor));
    }

    // ========================================================================
    // Properties
    // ========================================================================

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn key_kind(&self) -> KeyKind {
        K::KIND
    }

    #[inline]
    pub fn order(&self) -> ListOrder {
        self.order
    }

    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.order == ListOrder::Ordered
    }

    /// Number of entries
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocated slot count
    #[inline]
    pub fn capacity(&self) -> usize {
        self.alloc_count
    }

    /// Grow the allocation to at least `n` slots now
    pub fn reserve(&mut self, n: usize) {
        if n > self.alloc_count {
            self.entries.reserve_exact(n - self.entries.len());
            self.alloc_count = n;
        }
    }

    #[inline]
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Set the format version tag. Stored as-is, never validated.
    #[inline]
    pub fn set_version(&mut self, version: i32) {
        self.version = version;
    }

    /// Enable or disable replace mode for unordered collections.
    ///
    /// With replace mode on, setting an existing key updates it in place.
    /// Each such set scans the whole collection.
    #[inline]
    pub fn set_replace(&mut self, replace: bool) {
        self.replace = replace;
    }

    #[inline]
    pub fn is_replace(&self) -> bool {
        self.replace
    }

    /// Widest key seen by set
    #[inline]
    pub fn max_key_width(&self) -> usize {
        self.max_key_width
    }

    /// Recompute the widest key from the current entries
    pub fn calc_max_key_width(&mut self) -> usize {
        self.max_key_width = self
            .entries
            .iter()
            .map(|entry| K::width(entry.lookup()))
            .max()
            .unwrap_or(0);
        self.max_key_width
    }

    /// Widest string value seen by set, in code points
    #[inline]
    pub fn max_data_width(&self) -> usize {
        self.max_data_width
    }

    /// Recompute the widest string value from the current entries
    pub fn calc_max_data_width(&mut self) -> usize {
        self.max_data_width = self
            .entries
            .iter()
            .filter_map(|entry| entry.value.as_str())
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0);
        self.max_data_width
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Set `key` to `value`.
    ///
    /// Ordered: replaces the value of an existing key in place, otherwise
    /// inserts at the sorted position. Unordered: appends, unless replace
    /// mode is on and the key already exists.
    pub fn set(&mut self, key: &K::Lookup, value: Value<D>) {
        self.max_key_width = self.max_key_width.max(K::width(key));
        if let Value::Str(s) = &value {
            self.max_data_width = self.max_data_width.max(s.chars().count());
        }

        if let Some(idx) = self.cache.check(key) {
            self.cache.record_write_hit();
            if self.order == ListOrder::Ordered || self.replace {
                self.replace_at(idx, value);
                return;
            }
        }

        match self.order {
            ListOrder::Ordered => {
                match search::binary_search_by(&self.entries, |entry| entry.key.compare(key)) {
                    Ok(idx) => self.replace_at(idx, value),
                    Err(idx) => self.insert_at(idx, K::from_lookup(key), value),
                }
            }
            ListOrder::Unordered => {
                if self.replace {
                    if let Some(idx) = self.linear_scan(key) {
                        self.replace_at(idx, value);
                        return;
                    }
                }
                let end = self.entries.len();
                self.insert_at(end, K::from_lookup(key), value);
            }
        }
    }

    /// Set a key with no value
    pub fn set_empty(&mut self, key: &K::Lookup) {
        self.set(key, Value::None);
    }

    pub fn set_data(&mut self, key: &K::Lookup, data: D) {
        self.set(key, Value::Data(data));
    }

    pub fn set_str(&mut self, key: &K::Lookup, value: &str) {
        self.set(key, Value::Str(value.to_string()));
    }

    pub fn set_num(&mut self, key: &K::Lookup, value: i64) {
        self.set(key, Value::Num(value));
    }

    pub fn set_double(&mut self, key: &K::Lookup, value: f64) {
        self.set(key, Value::Double(value));
    }

    /// Store a nested collection of either key kind; it is owned by this
    /// entry from now on
    pub fn set_list<L: CollectionKey>(&mut self, key: &K::Lookup, list: Collection<L, D>) {
        self.set(key, Value::from(list));
    }

    pub fn set_slist(&mut self, key: &K::Lookup, list: Collection<String, D>) {
        self.set_list(key, list);
    }

    pub fn set_nlist(&mut self, key: &K::Lookup, list: Collection<i64, D>) {
        self.set_list(key, list);
    }

    /// Delete `key` and release its value.
    ///
    /// Only ordered collections support deletion; on an unordered
    /// collection this does nothing and returns `false`.
    pub fn delete(&mut self, key: &K::Lookup) -> bool {
        if self.order != ListOrder::Ordered {
            tracing::warn!(list = %self.name, "delete on unordered list ignored");
            return false;
        }

        match self.get_index(key) {
            Some(idx) => self.delete_by_index(idx),
            None => false,
        }
    }

    /// Delete the entry at slot `idx` and release its value (ordered only)
    pub fn delete_by_index(&mut self, idx: usize) -> bool {
        if self.order != ListOrder::Ordered {
            tracing::warn!(list = %self.name, "delete on unordered list ignored");
            return false;
        }
        if idx >= self.entries.len() {
            return false;
        }

        self.cache.clear();
        let entry = self.entries.remove(idx);
        self.release(entry.value);

        tracing::debug!(list = %self.name, idx, "list delete");
        true
    }

    /// Sort by key and switch to ordered mode.
    ///
    /// Returns the number of swaps the merge sort performed; zero when the
    /// entries were already in order.
    pub fn sort(&mut self) -> u64 {
        let started = Instant::now();

        self.order = ListOrder::Ordered;
        self.cache.clear();
        let swaps = search::merge_sort_by(&mut self.entries, &mut |a: &Entry<K, D>, b: &Entry<K, D>| {
            a.key.compare(b.lookup())
        });

        tracing::debug!(
            list = %self.name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            swaps,
            "list sort"
        );
        swaps
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve `key` to its slot index, consulting the position cache.
    ///
    /// Ordered collections binary search; unordered ones scan from the
    /// start and return the first match.
    pub fn get_index(&mut self, key: &K::Lookup) -> Option<usize> {
        if let Some(idx) = self.cache.check(key) {
            self.cache.record_read_hit();
            return Some(idx);
        }

        let found = match self.order {
            ListOrder::Ordered => {
                search::binary_search_by(&self.entries, |entry| entry.key.compare(key)).ok()
            }
            ListOrder::Unordered => self.linear_scan(key),
        };

        self.cache.clear();
        if let Some(idx) = found {
            self.cache.store(self.entries[idx].key.clone(), idx);
        }

        tracing::trace!(list = %self.name, ?key, idx = ?found, "list lookup");
        found
    }

    /// Check whether `key` exists
    pub fn contains_key(&mut self, key: &K::Lookup) -> bool {
        self.get_index(key).is_some()
    }

    pub fn get_value(&mut self, key: &K::Lookup) -> Option<&Value<D>> {
        let idx = self.get_index(key)?;
        Some(&self.entries[idx].value)
    }

    pub fn get_value_mut(&mut self, key: &K::Lookup) -> Option<&mut Value<D>> {
        let idx = self.get_index(key)?;
        Some(&mut self.entries[idx].value)
    }

    pub fn get_data(&mut self, key: &K::Lookup) -> Option<&D> {
        self.get_value(key).and_then(Value::as_data)
    }

    pub fn get_data_mut(&mut self, key: &K::Lookup) -> Option<&mut D> {
        self.get_value_mut(key).and_then(Value::as_data_mut)
    }

    pub fn get_str(&mut self, key: &K::Lookup) -> Option<&str> {
        self.get_value(key).and_then(Value::as_str)
    }

    pub fn get_num(&mut self, key: &K::Lookup) -> Option<i64> {
        self.get_value(key).and_then(Value::as_num)
    }

    pub fn get_double(&mut self, key: &K::Lookup) -> Option<f64> {
        self.get_value(key).and_then(Value::as_double)
    }

    /// Nested collection of either key kind
    pub fn get_nested(&mut self, key: &K::Lookup) -> Option<&NestedList<D>> {
        self.get_value(key).and_then(Value::as_nested)
    }

    /// Nested collection with this collection's key type
    pub fn get_list(&mut self, key: &K::Lookup) -> Option<&Collection<K, D>> {
        self.get_value(key).and_then(|value| value.as_list::<K>())
    }

    pub fn get_list_mut(&mut self, key: &K::Lookup) -> Option<&mut Collection<K, D>> {
        self.get_value_mut(key).and_then(|value| value.as_list_mut::<K>())
    }

    pub fn get_slist(&mut self, key: &K::Lookup) -> Option<&Collection<String, D>> {
        self.get_value(key).and_then(|value| value.as_list::<String>())
    }

    pub fn get_slist_mut(&mut self, key: &K::Lookup) -> Option<&mut Collection<String, D>> {
        self.get_value_mut(key).and_then(|value| value.as_list_mut::<String>())
    }

    pub fn get_nlist(&mut self, key: &K::Lookup) -> Option<&Collection<i64, D>> {
        self.get_value(key).and_then(|value| value.as_list::<i64>())
    }

    pub fn get_nlist_mut(&mut self, key: &K::Lookup) -> Option<&mut Collection<i64, D>> {
        self.get_value_mut(key).and_then(|value| value.as_list_mut::<i64>())
    }

    // ========================================================================
    // Access by slot index (no cache involvement)
    // ========================================================================

    pub fn get_key_by_index(&self, idx: usize) -> Option<&K> {
        self.entries.get(idx).map(|entry| &entry.key)
    }

    pub fn get_value_by_index(&self, idx: usize) -> Option<&Value<D>> {
        self.entries.get(idx).map(|entry| &entry.value)
    }

    pub fn get_data_by_index(&self, idx: usize) -> Option<&D> {
        self.get_value_by_index(idx).and_then(Value::as_data)
    }

    pub fn get_str_by_index(&self, idx: usize) -> Option<&str> {
        self.get_value_by_index(idx).and_then(Value::as_str)
    }

    pub fn get_num_by_index(&self, idx: usize) -> Option<i64> {
        self.get_value_by_index(idx).and_then(Value::as_num)
    }

    pub fn get_double_by_index(&self, idx: usize) -> Option<f64> {
        self.get_value_by_index(idx).and_then(Value::as_double)
    }

    pub fn get_list_by_index(&self, idx: usize) -> Option<&Collection<K, D>> {
        self.get_value_by_index(idx).and_then(|value| value.as_list::<K>())
    }

    pub fn get_nested_by_index(&self, idx: usize) -> Option<&NestedList<D>> {
        self.get_value_by_index(idx).and_then(Value::as_nested)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Cursor for forward iteration
    pub fn start_iterator(&self) -> Cursor {
        Cursor::new()
    }

    /// Cursor for reverse iteration
    pub fn start_reverse_iterator(&self) -> Cursor {
        Cursor::after_last(self.entries.len())
    }

    /// Step forward and return the key, or `None` past the last entry
    pub fn iterate_key(&mut self, cursor: &mut Cursor) -> Option<&K> {
        let idx = self.step_forward(cursor)?;
        Some(&self.entries[idx].key)
    }

    /// Step backward and return the key, or `None` past the first entry
    pub fn iterate_key_previous(&mut self, cursor: &mut Cursor) -> Option<&K> {
        let idx = self.step_backward(cursor)?;
        Some(&self.entries[idx].key)
    }

    /// Step forward and return the value, or `None` past the last entry
    pub fn iterate_value(&mut self, cursor: &mut Cursor) -> Option<&Value<D>> {
        let idx = self.step_forward(cursor)?;
        Some(&self.entries[idx].value)
    }

    /// Step backward and return the value, or `None` past the first entry
    pub fn iterate_value_previous(&mut self, cursor: &mut Cursor) -> Option<&Value<D>> {
        let idx = self.step_backward(cursor)?;
        Some(&self.entries[idx].value)
    }

    /// Slot index the cursor currently sits on
    pub fn cursor_index(&self, cursor: &Cursor) -> Option<usize> {
        usize::try_from(cursor.pos)
            .ok()
            .filter(|idx| *idx < self.entries.len())
    }

    /// Plain iterator over `(key, value)` in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Value<D>)> + '_ {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    #[inline]
    pub fn read_cache_hits(&self) -> u64 {
        self.cache.read_hits()
    }

    #[inline]
    pub fn write_cache_hits(&self) -> u64 {
        self.cache.write_hits()
    }

    /// Check whether `key` is in the position cache
    #[inline]
    pub fn is_cached(&self, key: &K::Lookup) -> bool {
        self.cache.contains(key)
    }

    /// Log name, count, key kind and ordering
    pub fn dump_info(&self) {
        tracing::debug!(
            list = %self.name,
            count = self.entries.len(),
            alloc = self.alloc_count,
            key_kind = %K::KIND,
            order = ?self.order,
            "list info"
        );
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn linear_scan(&self, key: &K::Lookup) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key.matches(key))
    }

    fn insert_at(&mut self, idx: usize, key: K, value: Value<D>) {
        self.cache.clear();

        if self.entries.len() >= self.alloc_count {
            self.alloc_count += GROWTH_INCREMENT;
            self.entries.reserve_exact(self.alloc_count - self.entries.len());
        }
        self.entries.insert(idx, Entry::new(key, value));
    }

    fn replace_at(&mut self, idx: usize, value: Value<D>) {
        let old = std::mem::replace(&mut self.entries[idx].value, value);
        self.release(old);
    }

    /// Hand `Data` to the destructor; everything else drops normally
    fn release(&mut self, value: Value<D>) {
        if let Value::Data(data) = value {
            if let Some(destructor) = self.destructor.as_mut() {
                destructor(data);
            }
        }
    }

    /// Remember an iterator step. Unordered collections may hold the key
    /// again in an earlier slot, and a cached lookup must give the first.
    fn cache_step(&mut self, idx: usize) {
        if self.order == ListOrder::Ordered {
            self.cache.store(self.entries[idx].key.clone(), idx);
        }
    }

    fn step_forward(&mut self, cursor: &mut Cursor) -> Option<usize> {
        let next = cursor.pos + 1;
        if next < 0 || next as usize >= self.entries.len() {
            cursor.pos = Cursor::BEFORE_FIRST;
            return None;
        }

        cursor.pos = next;
        let idx = next as usize;
        self.cache_step(idx);
        Some(idx)
    }

    fn step_backward(&mut self, cursor: &mut Cursor) -> Option<usize> {
        let next = cursor.pos - 1;
        if next < 0 || next as usize >= self.entries.len() {
            *cursor = Cursor::after_last(self.entries.len());
            return None;
        }

        cursor.pos = next;
        let idx = next as usize;
        self.cache_step(idx);
        Some(idx)
    }
}

impl<K: CollectionKey, D> Drop for Collection<K, D> {
    fn drop(&mut self) {
        let (reads, writes) = (self.cache.read_hits(), self.cache.write_hits());
        if reads > 0 || writes > 0 {
            tracing::debug!(list = %self.name, reads, writes, "list cache hits");
        }
        tracing::debug!(list = %self.name, count = self.entries.len(), "list free");

        let entries = std::mem::take(&mut self.entries);
        for entry in entries {
            self.release(entry.value);
        }
    }
}

impl<K: CollectionKey, D> fmt::Debug for Collection<K, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &self.name)
            .field("key_kind", &K::KIND)
            .field("order", &self.order)
            .field("count", &self.entries.len())
            .field("alloc", &self.alloc_count)
            .field("version", &self.version)
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
