//! Doubly-linked, index-addressable queue.
//!
//! ## Components
//!
//! - [`Queue`]: the list, its node cache and its iterator state
//! - [`QueueNode`]: value plus slab-key links
//! - [`QueueCursor`]: external iteration position
//!
//! Independent of the keyed collections.

mod node;
mod linked;

pub use node::QueueNode;
pub use linked::{Queue, QueueCursor};
