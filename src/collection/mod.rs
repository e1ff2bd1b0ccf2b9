//! Keyed collection engine.
//!
//! ## Components
//!
//! - [`Collection`]: growable array of key/value entries, ordered or unordered
//! - [`Entry`]: one key and its value
//! - [`PositionCache`]: single-slot `(key, index)` cache
//! - [`search`]: binary search and the swap-counting merge sort
//!
//! The typed views in [`crate::views`] fix the key type.

mod cache;
mod digest;
mod entry;
mod list;
pub mod search;

pub use cache::PositionCache;
pub use entry::Entry;
pub use list::{Collection, Cursor, Destructor, ListOrder, DEFAULT_VERSION, GROWTH_INCREMENT};
