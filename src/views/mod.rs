//! Typed views over the collection engine.
//!
//! ## Views
//!
//! | View | Key | Notes |
//! |------|-----|-------|
//! | [`SList`] | `String` | locale-collated keys, key width tracking |
//! | [`NList`] | `i64` | counters, probability table search |
//! | [`IList`] | `(i64, i64)` | outer record key, inner field key |
//!
//! `SList` and `NList` are aliases of [`Collection`](crate::collection::Collection)
//! with the key type fixed, so every engine operation is available on them
//! and passing a string key to an integer list does not compile.

mod ilist;
mod nlist;
mod slist;

pub use ilist::IList;
pub use nlist::NList;
pub use slist::SList;
