//! Key ordering contract for collections.
//!
//! ## Key Kinds
//!
//! Two key kinds exist:
//!
//! - **String keys** compare by locale collation (see [`collation`](super::collation))
//! - **Integer keys** compare numerically
//!
//! A collection is generic over its key type, so a string-keyed list can never
//! be queried with an integer key. [`KeyKind`] survives only as a diagnostic tag.
//!
//! ## Owned vs Lookup Form
//!
//! Entries own their keys (`String`, `i64`). Lookups borrow (`&str`, `&i64`),
//! so reading or replacing an existing entry never allocates a key.

use std::cmp::Ordering;
use std::fmt;

use sha2::{Digest, Sha256};

use crate::collection::Collection;
use crate::types::collation;
use crate::types::value::NestedList;

/// Key kind tag, reported for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Locale-collated string key
    Str,
    /// Signed integer key
    Num,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Str => write!(f, "str"),
            KeyKind::Num => write!(f, "num"),
        }
    }
}

/// Ordering contract every collection key implements.
///
/// `compare` defines the sort order of ordered collections. `matches` is exact
/// equality, used by the position cache and the unordered linear scan.
pub trait CollectionKey: Clone + fmt::Debug {
    /// Borrowed form used for lookups
    type Lookup: ?Sized + fmt::Debug;

    /// Diagnostic tag
    const KIND: KeyKind;

    /// Borrow this key in lookup form
    fn as_lookup(&self) -> &Self::Lookup;

    /// Create an owned key from its lookup form
    fn from_lookup(lookup: &Self::Lookup) -> Self;

    /// Order this key against a lookup key
    fn compare(&self, other: &Self::Lookup) -> Ordering;

    /// Exact equality against a lookup key
    fn matches(&self, other: &Self::Lookup) -> bool;

    /// Display width of a key: code points for strings, digits for integers
    fn width(lookup: &Self::Lookup) -> usize;

    /// Feed the key bytes into a content digest
    fn digest_into(&self, hasher: &mut Sha256);

    /// Wrap a collection of this key type for nesting
    fn into_nested<D>(list: Collection<Self, D>) -> NestedList<D>;

    /// Borrow a nested collection if it has this key type
    fn nested_ref<D>(list: &NestedList<D>) -> Option<&Collection<Self, D>>;

    fn nested_mut<D>(list: &mut NestedList<D>) -> Option<&mut Collection<Self, D>>;
}

impl CollectionKey for i64 {
    type Lookup = i64;

    const KIND: KeyKind = KeyKind::Num;

    #[inline]
    fn as_lookup(&self) -> &i64 {
        self
    }

    #[inline]
    fn from_lookup(lookup: &i64) -> Self {
        *lookup
    }

    #[inline]
    fn compare(&self, other: &i64) -> Ordering {
        self.cmp(other)
    }

    #[inline]
    fn matches(&self, other: &i64) -> bool {
        self == other
    }

    fn width(lookup: &i64) -> usize {
        lookup.to_string().len()
    }

    fn digest_into(&self, hasher: &mut Sha256) {
        hasher.update(self.to_le_bytes());
    }

    fn into_nested<D>(list: Collection<i64, D>) -> NestedList<D> {
        NestedList::Num(Box::new(list))
    }

    fn nested_ref<D>(list: &NestedList<D>) -> Option<&Collection<i64, D>> {
        match list {
            NestedList::Num(list) => Some(list),
            NestedList::Str(_) => None,
        }
    }

    fn nested_mut<D>(list: &mut NestedList<D>) -> Option<&mut Collection<i64, D>> {
        match list {
            NestedList::Num(list) => Some(list),
            NestedList::Str(_) => None,
        }
    }
}

impl CollectionKey for String {
    type Lookup = str;

    const KIND: KeyKind = KeyKind::Str;

    #[inline]
    fn as_lookup(&self) -> &str {
        self.as_str()
    }

    #[inline]
    fn from_lookup(lookup: &str) -> Self {
        lookup.to_string()
    }

    #[inline]
    fn compare(&self, other: &str) -> Ordering {
        collation::compare(self, other)
    }

    #[inline]
    fn matches(&self, other: &str) -> bool {
        self == other
    }

    fn width(lookup: &str) -> usize {
        lookup.chars().count()
    }

    fn digest_into(&self, hasher: &mut Sha256) {
        hasher.update((self.len() as u64).to_le_bytes());
        hasher.update(self.as_bytes());
    }

    fn into_nested<D>(list: Collection<String, D>) -> NestedList<D> {
        NestedList::Str(Box::new(list))
    }

    fn nested_ref<D>(list: &NestedList<D>) -> Option<&Collection<String, D>> {
        match list {
            NestedList::Str(list) => Some(list),
            NestedList::Num(_) => None,
        }
    }

    fn nested_mut<D>(list: &mut NestedList<D>) -> Option<&mut Collection<String, D>> {
        match list {
            NestedList::Str(list) => Some(list),
            NestedList::Num(_) => None,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering() {
        assert_eq!(5i64.compare(&7), Ordering::Less);
        assert_eq!(7i64.compare(&5), Ordering::Greater);
        assert_eq!((-3i64).compare(&-3), Ordering::Equal);
        assert_eq!(i64::MIN.compare(&i64::MAX), Ordering::Less);
    }

    #[test]
    fn test_string_ordering_collates() {
        let key = "apple".to_string();
        assert_eq!(key.compare("Banana"), Ordering::Less);
        assert_eq!(key.compare("apple"), Ordering::Equal);
        assert!(key.matches("apple"));
        assert!(!key.matches("Apple"));
    }

    #[test]
    fn test_key_width() {
        assert_eq!(<String as CollectionKey>::width("naïve"), 5);
        assert_eq!(<i64 as CollectionKey>::width(&12345), 5);
        assert_eq!(<i64 as CollectionKey>::width(&-7), 2);
    }

    #[test]
    fn test_lookup_roundtrip() {
        assert_eq!(String::from_lookup("key"), "key");
        assert_eq!(i64::from_lookup(&42), 42);
        assert_eq!("x".to_string().as_lookup(), "x");
    }

    #[test]
    fn test_key_kind_display() {
        assert_eq!(KeyKind::Str.to_string(), "str");
        assert_eq!(<i64 as CollectionKey>::KIND, KeyKind::Num);
    }
}
