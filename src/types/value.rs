//! Typed values stored in collection entries.
//!
//! ## Ownership
//!
//! | Variant | Released by |
//! |---------|-------------|
//! | `Data`  | the collection's destructor callback, or plain drop when none is set |
//! | `Str`   | drop |
//! | `Num`, `Double` | nothing to release |
//! | `List`  | recursive drop of the nested collection |
//!
//! Ownership is a strict tree: a nested collection belongs to exactly one entry.
//!
//! ## Nested Key Kinds
//!
//! A nested collection need not share its parent's key kind. A song record
//! keyed by field number can hold a string-keyed tag list, so [`NestedList`]
//! carries either kind and the typed accessors pick one out.

use std::fmt;

use crate::collection::Collection;
use crate::types::key::{CollectionKey, KeyKind};

/// Value kind tag, used in diagnostics and digests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    None,
    Data,
    Str,
    Num,
    Double,
    List,
}

impl ValueKind {
    /// Stable tag byte for content digests
    pub fn to_u8(self) -> u8 {
        match self {
            ValueKind::None => 0,
            ValueKind::Data => 1,
            ValueKind::Str => 2,
            ValueKind::Num => 3,
            ValueKind::Double => 4,
            ValueKind::List => 5,
        }
    }
}

/// A nested collection of either key kind
pub enum NestedList<D> {
    /// String-keyed
    Str(Box<Collection<String, D>>),
    /// Integer-keyed
    Num(Box<Collection<i64, D>>),
}

impl<D> NestedList<D> {
    pub fn name(&self) -> &str {
        match self {
            NestedList::Str(list) => list.name(),
            NestedList::Num(list) => list.name(),
        }
    }

    pub fn key_kind(&self) -> KeyKind {
        match self {
            NestedList::Str(_) => KeyKind::Str,
            NestedList::Num(_) => KeyKind::Num,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NestedList::Str(list) => list.len(),
            NestedList::Num(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Digest of the nested collection's contents
    pub fn content_digest(&self) -> [u8; 32] {
        match self {
            NestedList::Str(list) => list.content_digest(),
            NestedList::Num(list) => list.content_digest(),
        }
    }

    /// The collection, if it is keyed by `K`
    #[inline]
    pub fn as_keyed<K: CollectionKey>(&self) -> Option<&Collection<K, D>> {
        K::nested_ref(self)
    }

    #[inline]
    pub fn as_keyed_mut<K: CollectionKey>(&mut self) -> Option<&mut Collection<K, D>> {
        K::nested_mut(self)
    }
}

impl<K: CollectionKey, D> From<Collection<K, D>> for NestedList<D> {
    fn from(list: Collection<K, D>) -> Self {
        K::into_nested(list)
    }
}

impl<D> fmt::Debug for NestedList<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(match self {
            NestedList::Str(_) => "Str",
            NestedList::Num(_) => "Num",
        })
        .field(&self.name())
        .finish()
    }
}

/// A value held by a collection entry.
///
/// Accessors return `None` when the value is of another kind; reading a
/// string from a numeric entry is a caller mistake, not a failure.
pub enum Value<D> {
    /// Key present without a value
    None,
    /// Opaque caller data
    Data(D),
    /// Owned string
    Str(String),
    /// Signed 64-bit integer
    Num(i64),
    /// Double
    Double(f64),
    /// Nested collection of either key kind
    List(NestedList<D>),
}

impl<D> Value<D> {
    /// Get the kind tag
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::None => ValueKind::None,
            Value::Data(_) => ValueKind::Data,
            Value::Str(_) => ValueKind::Str,
            Value::Num(_) => ValueKind::Num,
            Value::Double(_) => ValueKind::Double,
            Value::List(_) => ValueKind::List,
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[inline]
    pub fn as_data(&self) -> Option<&D> {
        match self {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn as_data_mut(&mut self) -> Option<&mut D> {
        match self {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_num(&self) -> Option<i64> {
        match self {
            Value::Num(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// The nested collection, whatever its key kind
    #[inline]
    pub fn as_nested(&self) -> Option<&NestedList<D>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// The nested collection, if it is keyed by `K`
    #[inline]
    pub fn as_list<K: CollectionKey>(&self) -> Option<&Collection<K, D>> {
        self.as_nested()?.as_keyed()
    }

    #[inline]
    pub fn as_list_mut<K: CollectionKey>(&mut self) -> Option<&mut Collection<K, D>> {
        match self {
            Value::List(list) => list.as_keyed_mut(),
            _ => None,
        }
    }

    /// The nested collection, if it is string-keyed
    #[inline]
    pub fn as_slist(&self) -> Option<&Collection<String, D>> {
        self.as_list()
    }

    /// The nested collection, if it is integer-keyed
    #[inline]
    pub fn as_nlist(&self) -> Option<&Collection<i64, D>> {
        self.as_list()
    }
}

impl<D> From<&str> for Value<D> {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl<D> From<String> for Value<D> {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl<D> From<i64> for Value<D> {
    fn from(value: i64) -> Self {
        Value::Num(value)
    }
}

impl<D> From<f64> for Value<D> {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl<K: CollectionKey, D> From<Collection<K, D>> for Value<D> {
    fn from(value: Collection<K, D>) -> Self {
        Value::List(value.into())
    }
}

impl<D> fmt::Debug for Value<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "None"),
            Value::Data(_) => write!(f, "Data(..)"),
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Num(n) => f.debug_tuple("Num").field(n).finish(),
            Value::Double(d) => f.debug_tuple("Double").field(d).finish(),
            Value::List(list) => f.debug_tuple("List").field(&list.name()).finish(),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
