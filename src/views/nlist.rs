//! Integer-keyed list.
//!
//! ## Probability Tables
//!
//! An ordered `NList` whose values are running totals of weights, e.g.
//!
//! ```text
//! key:    3     7     9
//! value:  0.2   0.7   1.0
//! ```
//!
//! maps a uniform draw in `(0, 1]` to a key: [`search_prob_table`] returns
//! the key of the first entry whose total reaches the draw.
//!
//! [`search_prob_table`]: crate::collection::Collection::search_prob_table

use crate::collection::Collection;
use crate::types::Value;

/// Collection keyed by signed integers
pub type NList<D = ()> = Collection<i64, D>;

impl<D> Collection<i64, D> {
    /// Add one to the number stored at `key`; a missing key counts from 0.
    ///
    /// Returns the new value, which stops at `i64::MAX`.
    pub fn increment(&mut self, key: i64) -> i64 {
        let value = self.get_num(&key).unwrap_or(0).saturating_add(1);
        self.set(&key, Value::Num(value));
        value
    }

    /// Subtract one from the number stored at `key`; a missing key counts from 0.
    ///
    /// Returns the new value, which stops at `i64::MIN`.
    pub fn decrement(&mut self, key: i64) -> i64 {
        let value = self.get_num(&key).unwrap_or(0).saturating_sub(1);
        self.set(&key, Value::Num(value));
        value
    }

    /// Find the key whose cumulative probability bracket holds `p`.
    ///
    /// Entries must hold ascending `Double` values. Returns the key of the
    /// entry `m` with `value[m - 1] < p <= value[m]`, or `None` when `p` is
    /// above the last total or an entry holds no double.
    pub fn search_prob_table(&self, p: f64) -> Option<i64> {
        let mut lo = 0;
        let mut hi = self.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let total = self.get_double_by_index(mid)?;

            if p > total {
                lo = mid + 1;
                continue;
            }
            let above_previous = match mid {
                0 => true,
                _ => p > self.get_double_by_index(mid - 1)?,
            };
            if above_previous {
                return self.get_key_by_index(mid).copied();
            }
            hi = mid;
        }

        None
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::ListOrder;

    fn prob_table() -> NList {
        let mut table: NList = NList::new("prob-table", ListOrder::Ordered);
        table.set_double(&3, 0.2);
        table.set_double(&7, 0.7);
        table.set_double(&9, 1.0);
        table
    }

    #[test]
    fn test_nlist_increment_decrement() {
        let mut counts: NList = NList::new("counts", ListOrder::Ordered);

        assert_eq!(counts.increment(4), 1);
        assert_eq!(counts.increment(4), 2);
        assert_eq!(counts.decrement(4), 1);
        assert_eq!(counts.decrement(8), -1);

        assert_eq!(counts.get_num(&4), Some(1));
        assert_eq!(counts.get_num(&8), Some(-1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_nlist_increment_saturates() {
        let mut counts: NList = NList::new("counts", ListOrder::Ordered);
        counts.set_num(&1, i64::MAX);
        counts.set_num(&2, i64::MIN);

        assert_eq!(counts.increment(1), i64::MAX);
        assert_eq!(counts.get_num(&1), Some(i64::MAX));
        assert_eq!(counts.decrement(2), i64::MIN);
        assert_eq!(counts.get_num(&2), Some(i64::MIN));

        assert_eq!(counts.decrement(1), i64::MAX - 1);
        assert_eq!(counts.increment(2), i64::MIN + 1);
    }

    #[test]
    fn test_nlist_increment_replaces_non_number() {
        let mut counts: NList = NList::new("counts", ListOrder::Ordered);
        counts.set_str(&1, "text");

        assert_eq!(counts.increment(1), 1);
        assert_eq!(counts.get_num(&1), Some(1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn test_prob_table_brackets() {
        let table = prob_table();

        assert_eq!(table.search_prob_table(0.0), Some(3));
        assert_eq!(table.search_prob_table(0.1), Some(3));
        assert_eq!(table.search_prob_table(0.2), Some(3));
        assert_eq!(table.search_prob_table(0.21), Some(7));
        assert_eq!(table.search_prob_table(0.7), Some(7));
        assert_eq!(table.search_prob_table(0.95), Some(9));
        assert_eq!(table.search_prob_table(1.0), Some(9));
    }

    #[test]
    fn test_prob_table_out_of_range() {
        let table = prob_table();
        assert!(table.search_prob_table(1.5).is_none());

        let empty: NList = NList::new("empty", ListOrder::Ordered);
        assert!(empty.search_prob_table(0.5).is_none());
    }

    #[test]
    fn test_prob_table_requires_doubles() {
        let mut table: NList = NList::new("bad", ListOrder::Ordered);
        table.set_num(&1, 1);

        assert!(table.search_prob_table(0.5).is_none());
    }

    #[test]
    fn test_nlist_iterate_previous() {
        let mut list: NList = NList::new("nums", ListOrder::Ordered);
        for key in [20, 10, 30] {
            list.set_num(&key, key);
        }

        let mut cursor = list.start_reverse_iterator();
        let mut keys = Vec::new();
        while let Some(key) = list.iterate_key_previous(&mut cursor) {
            keys.push(*key);
        }
        assert_eq!(keys, vec![30, 20, 10]);
    }
}
