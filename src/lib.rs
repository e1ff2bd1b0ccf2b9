//! # Jukebox Collections
//!
//! Keyed collections and a linked queue behind the song, playlist and
//! configuration data of a dance jukebox.
//!
//! ## Architecture
//!
//! - **Types**: key ordering contract, string collation, typed values
//! - **Collection**: growable keyed array, ordered or unordered, with a
//!   single-slot position cache
//! - **Views**: `SList` (string keys), `NList` (integer keys), `IList`
//!   (record/field integer keys)
//! - **Queue**: doubly-linked list addressed by position
//!
//! ## Design Principles
//!
//! 1. **Fail quiet**: a missing key, wrong value kind or bad index yields `None`
//! 2. **Small footprint**: arrays grow by a fixed increment, not by doubling
//! 3. **Single caller**: no locking; every instance has one owner
//! 4. **Caches are hints**: clearing a cache changes speed, never results
//!
//! ## Example
//!
//! ```
//! use jukebox_collections::{ListOrder, NList, Queue, SList};
//!
//! let mut dances: SList = SList::new("dances", ListOrder::Ordered);
//! dances.set_num("Waltz", 90);
//! dances.set_num("Tango", 64);
//! assert_eq!(dances.get_key_str_by_index(0), Some("Tango"));
//!
//! let mut counts: NList = NList::new("counts", ListOrder::Ordered);
//! counts.increment(3);
//! assert_eq!(counts.get_num(&3), Some(1));
//!
//! let mut queue = Queue::new("music-queue");
//! queue.push("song-a");
//! queue.push("song-b");
//! assert_eq!(queue.get_by_index(1), Some(&"song-b"));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Key ordering, collation and typed values
pub mod types;

/// Keyed collection engine
pub mod collection;

/// String, integer and indirect list views
pub mod views;

/// Position-addressable linked queue
pub mod queue;

/// Collation configuration
pub mod config;

/// Error types
pub mod error;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use collection::{Collection, Cursor, ListOrder};
pub use config::CollationConfig;
pub use error::CollationError;
pub use queue::{Queue, QueueCursor};
pub use types::{CollectionKey, KeyKind, NestedList, Value, ValueKind};
pub use views::{IList, NList, SList};
