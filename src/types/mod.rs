//! Core types shared by the collection engine and its views.
//!
//! ## Types
//!
//! - [`CollectionKey`]: ordering contract for keys (`String`, `i64`)
//! - [`KeyKind`]: diagnostic key kind tag
//! - [`Value`]: typed entry value (data, string, number, double, nested list)
//! - [`NestedList`]: nested collection of either key kind
//! - [`collation`]: locale-aware comparison for string keys

pub mod collation;
mod key;
mod value;

// Re-export all types at module level
pub use key::{CollectionKey, KeyKind};
pub use value::{NestedList, Value, ValueKind};
