//! Queue node for slab-based storage.
//!
//! ## Slab Integration
//!
//! Nodes live in a `Slab` and link to each other by slab key (`usize`):
//! - Keys are returned by `slab.insert()` and may be reused after `slab.remove()`
//! - Insert, remove and lookup are O(1)
//!
//! ## Linked List
//!
//! ```text
//! head <-> node <-> node <-> tail
//! ```
//!
//! - `next`: toward the tail
//! - `prev`: toward the head

/// A value plus its links, stored in the queue's slab.
#[derive(Debug, Clone)]
pub struct QueueNode<T> {
    /// The stored value
    pub value: T,

    /// Next node toward the tail (slab key), None at the tail
    pub next: Option<usize>,

    /// Previous node toward the head (slab key), None at the head
    pub prev: Option<usize>,
}

impl<T> QueueNode<T> {
    /// Create a new unlinked node
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value,
            next: None,
            prev: None,
        }
    }

    /// Check if this node has no neighbours
    #[inline]
    pub fn is_unlinked(&self) -> bool {
        self.next.is_none() && self.prev.is_none()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_node_new() {
        let node = QueueNode::new("aaaa");

        assert_eq!(node.value, "aaaa");
        assert!(node.next.is_none());
        assert!(node.prev.is_none());
        assert!(node.is_unlinked());
    }

    #[test]
    fn test_queue_node_linking() {
        let mut node = QueueNode::new(1u32);

        node.next = Some(2);
        assert!(!node.is_unlinked());

        node.next = None;
        node.prev = Some(0);
        assert!(!node.is_unlinked());
    }
}
