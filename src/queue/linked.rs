//! Slab-backed doubly-linked queue.
//!
//! ## Index Lookup
//!
//! [`Queue::get_by_index`] walks from the nearest of three anchors:
//!
//! | Anchor | Distance to `idx` |
//! |--------|-------------------|
//! | head   | `idx` |
//! | tail   | `count - 1 - idx` |
//! | cache  | `abs(cache_idx - idx)` |
//!
//! Ties go to the head, then the tail. The steps walked are kept as the
//! search distance. A lookup that lands on an interior node caches it; head
//! and tail lookups leave the cache alone, so a cached interior position
//! survives reads at the ends.
//!
//! ## Cache Rules
//!
//! | Operation | Cache |
//! |-----------|-------|
//! | `push` | kept (the tail is never cached) |
//! | `push_head`, `pop`, `remove_by_index`, `clear`, `iterate_remove_current` | cleared |
//! | `insert` | set to the new node at its index |
//! | `move_item` | kept (values swap, nodes stay) |
//!
//! ## Iteration
//!
//! The queue tracks two nodes while iterating: the node the next
//! [`Queue::iterate`] call returns, and the node it returned last ("current").
//! [`Queue::iterate_remove_current`] unlinks the current node.

use slab::Slab;

use crate::queue::QueueNode;

/// Callback that releases values dropped by the queue
pub type QueueDestructor<T> = Box<dyn FnMut(T)>;

/// External iteration position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCursor {
    index: isize,
}

impl QueueCursor {
    /// Index of the last visited value
    pub fn index(&self) -> Option<usize> {
        usize::try_from(self.index).ok()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    Head,
    Tail,
    Cache,
}

/// Located node: slab key, steps walked, starting anchor
struct Located {
    key: usize,
    steps: usize,
    anchor: Anchor,
}

/// Doubly-linked queue addressable by position.
pub struct Queue<T> {
    /// Diagnostic name
    name: String,

    /// Node storage; links are slab keys
    nodes: Slab<QueueNode<T>>,

    head: Option<usize>,
    tail: Option<usize>,

    /// Cached node key and its index
    cache: Option<(usize, usize)>,
    cache_hits: u64,

    /// Steps walked by the last index lookup
    search_distance: usize,

    /// Node the next iterate call returns
    iterator: Option<usize>,

    /// Node the last iterate call returned
    current: Option<usize>,

    destructor: Option<QueueDestructor<T>>,
}

impl<T> Queue<T> {
    /// Create an empty queue
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        tracing::debug!(queue = %name, "queue alloc");

        Self {
            name,
            nodes: Slab::new(),
            head: None,
            tail: None,
            cache: None,
            cache_hits: 0,
            search_distance: 0,
            iterator: None,
            current: None,
            destructor: None,
        }
    }

    /// Create an empty queue whose dropped values go through `destructor`
    pub fn with_destructor(name: impl Into<String>, destructor: impl FnMut(T) + 'static) -> Self {
        let mut queue = Self::new(name);
        queue.destructor = Some(Box::new(destructor));
        queue
    }

    pub fn set_destructor(&mut self, destructor: impl FnMut(T) + 'static) {
        self.destructor = Some(Box::new(destructor));
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Ends
    // ========================================================================

    /// Append at the tail
    pub fn push(&mut self, value: T) {
        let key = self.nodes.insert(QueueNode::new(value));
        self.link_back(key);
    }

    /// Prepend at the head; every existing index shifts, so the cache goes
    pub fn push_head(&mut self, value: T) {
        let key = self.nodes.insert(QueueNode::new(value));
        self.nodes[key].next = self.head;

        match self.head {
            Some(head) => self.nodes[head].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);

        self.invalidate_cache();
    }

    /// Remove and return the head value
    pub fn pop(&mut self) -> Option<T> {
        self.invalidate_cache();
        let head = self.head?;
        Some(self.unlink(head))
    }

    /// Head value; the cache is not touched
    pub fn get_first(&self) -> Option<&T> {
        self.head.map(|key| &self.nodes[key].value)
    }

    // ========================================================================
    // Positional access
    // ========================================================================

    /// Value at `idx`, walking from the nearest anchor
    pub fn get_by_index(&mut self, idx: usize) -> Option<&T> {
        let key = self.resolve(idx)?;
        Some(&self.nodes[key].value)
    }

    pub fn get_by_index_mut(&mut self, idx: usize) -> Option<&mut T> {
        let key = self.resolve(idx)?;
        Some(&mut self.nodes[key].value)
    }

    /// Insert `value` so that it ends up at `idx`.
    ///
    /// `idx == len` appends. A larger index hands the value back.
    pub fn insert(&mut self, idx: usize, value: T) -> Result<(), T> {
        let count = self.len();
        if idx > count {
            return Err(value);
        }

        let before = if idx < count {
            match self.locate(idx) {
                Some(found) => Some(found.key),
                None => return Err(value),
            }
        } else {
            None
        };

        let key = self.nodes.insert(QueueNode::new(value));
        match before {
            Some(next) => {
                let prev = self.nodes[next].prev;
                self.nodes[key].prev = prev;
                self.nodes[key].next = Some(next);
                self.nodes[next].prev = Some(key);
                match prev {
                    Some(prev) => self.nodes[prev].next = Some(key),
                    None => self.head = Some(key),
                }
            }
            None => self.link_back(key),
        }

        self.cache = Some((key, idx));
        Ok(())
    }

    /// Remove and return the value at `idx`; ownership passes to the caller
    pub fn remove_by_index(&mut self, idx: usize) -> Option<T> {
        let found = self.locate(idx)?;
        let value = self.unlink(found.key);
        self.invalidate_cache();
        Some(value)
    }

    /// Swap the values at `from` and `to`.
    ///
    /// Nodes keep their places, so the cache stays valid.
    pub fn move_item(&mut self, from: usize, to: usize) -> bool {
        let (Some(a), Some(b)) = (self.locate(from), self.locate(to)) else {
            return false;
        };
        if a.key == b.key {
            return true;
        }

        match self.nodes.get2_mut(a.key, b.key) {
            Some((a, b)) => {
                std::mem::swap(&mut a.value, &mut b.value);
                true
            }
            None => false,
        }
    }

    /// Drop values from the tail until `keep` remain
    pub fn clear(&mut self, keep: usize) {
        while self.len() > keep {
            let Some(tail) = self.tail else { break };
            let value = self.unlink(tail);
            self.release(value);
        }
        self.invalidate_cache();
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Start iterating from the head
    pub fn start_iterator(&mut self) -> QueueCursor {
        self.iterator = self.head;
        self.current = None;
        QueueCursor { index: -1 }
    }

    /// Next value, or `None` once the tail has been passed
    pub fn iterate(&mut self, cursor: &mut QueueCursor) -> Option<&T> {
        let key = self.iterator?;
        self.current = Some(key);
        self.iterator = self.nodes[key].next;
        cursor.index += 1;
        Some(&self.nodes[key].value)
    }

    /// Remove the value the last [`iterate`](Self::iterate) call returned.
    ///
    /// Iteration continues with the following value. Returns `None` if
    /// nothing was visited since the last removal.
    pub fn iterate_remove_current(&mut self, cursor: &mut QueueCursor) -> Option<T> {
        let key = self.current.take()?;
        let value = self.unlink(key);
        cursor.index -= 1;
        self.invalidate_cache();
        Some(value)
    }

    /// Plain iterator over values, head to tail
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut next = self.head;
        std::iter::from_fn(move || {
            let node = &self.nodes[next?];
            next = node.next;
            Some(&node.value)
        })
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    /// Lookups that started from the cache
    #[inline]
    pub fn cache_hits(&self) -> u64 {
        self.cache_hits
    }

    /// Index held by the cache, if any
    #[inline]
    pub fn cached_index(&self) -> Option<usize> {
        self.cache.map(|(_, idx)| idx)
    }

    /// Steps walked by the last successful index lookup
    #[inline]
    pub fn search_distance(&self) -> usize {
        self.search_distance
    }

    // ========================================================================
    // Internal
    // ========================================================================

    fn link_back(&mut self, key: usize) {
        self.nodes[key].prev = self.tail;
        self.nodes[key].next = None;

        match self.tail {
            Some(tail) => self.nodes[tail].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
    }

    /// Unlink and free the node at `key`, patching the iterator state
    fn unlink(&mut self, key: usize) -> T {
        let node = self.nodes.remove(key);

        match node.prev {
            Some(prev) => self.nodes[prev].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.nodes[next].prev = node.prev,
            None => self.tail = node.prev,
        }

        if self.iterator == Some(key) {
            self.iterator = node.next;
        }
        if self.current == Some(key) {
            self.current = None;
        }

        node.value
    }

    fn invalidate_cache(&mut self) {
        self.cache = None;
    }

    fn release(&mut self, value: T) {
        if let Some(destructor) = self.destructor.as_mut() {
            destructor(value);
        }
    }

    /// Find the node at `idx` from the nearest anchor. Pure; no cache update.
    fn locate(&self, idx: usize) -> Option<Located> {
        let count = self.len();
        if idx >= count {
            return None;
        }

        let mut anchor = Anchor::Head;
        let mut start = (self.head?, 0);
        let mut best = idx;

        let tail_distance = count - 1 - idx;
        if tail_distance < best {
            anchor = Anchor::Tail;
            start = (self.tail?, count - 1);
            best = tail_distance;
        }

        if let Some((key, cached_idx)) = self.cache {
            let cache_distance = cached_idx.abs_diff(idx);
            if cache_distance < best {
                anchor = Anchor::Cache;
                start = (key, cached_idx);
                best = cache_distance;
            }
        }

        let (mut key, mut pos) = start;
        while pos < idx {
            key = self.nodes[key].next?;
            pos += 1;
        }
        while pos > idx {
            key = self.nodes[key].prev?;
            pos -= 1;
        }

        Some(Located {
            key,
            steps: best,
            anchor,
        })
    }

    /// Locate `idx` and update the lookup diagnostics and cache
    fn resolve(&mut self, idx: usize) -> Option<usize> {
        let found = self.locate(idx)?;

        self.search_distance = found.steps;
        if found.anchor == Anchor::Cache {
            self.cache_hits += 1;
        }
        if idx != 0 && idx != self.len() - 1 {
            self.cache = Some((found.key, idx));
        }

        tracing::trace!(
            queue = %self.name,
            idx,
            anchor = ?found.anchor,
            steps = found.steps,
            "queue lookup"
        );
        Some(found.key)
    }
}

impl<T> Drop for Queue<T> {
    fn drop(&mut self) {
        if self.cache_hits > 0 {
            tracing::debug!(queue = %self.name, hits = self.cache_hits, "queue cache hits");
        }
        tracing::debug!(queue = %self.name, count = self.len(), "queue free");

        while let Some(head) = self.head {
            let value = self.unlink(head);
            self.release(value);
        }
    }
}

impl<T> std::fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queue")
            .field("name", &self.name)
            .field("count", &self.len())
            .field("cached_index", &self.cached_index())
            .finish()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn lettered(n: usize) -> Queue<String> {
        let mut q = Queue::new("letters");
        for i in 0..n {
            let c = (b'a' + i as u8) as char;
            q.push(c.to_string().repeat(4));
        }
        q
    }

    fn values(q: &Queue<String>) -> Vec<&str> {
        q.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_queue_new() {
        let q: Queue<u32> = Queue::new("empty");

        assert_eq!(q.name(), "empty");
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
        assert!(q.get_first().is_none());
        assert!(q.cached_index().is_none());
    }

    #[test]
    fn test_queue_push_pop_fifo() {
        let mut q = Queue::new("fifo");
        q.push(1);
        q.push(2);
        q.push(3);

        assert_eq!(q.get_first(), Some(&1));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_queue_push_head() {
        let mut q = lettered(3);
        q.get_by_index(1);
        assert_eq!(q.cached_index(), Some(1));

        q.push_head("zzzz".to_string());

        assert_eq!(values(&q), vec!["zzzz", "aaaa", "bbbb", "cccc"]);
        assert!(q.cached_index().is_none());
    }

    #[test]
    fn test_queue_push_keeps_cache() {
        let mut q = lettered(5);
        q.get_by_index(2);

        q.push("ffff".to_string());

        assert_eq!(q.cached_index(), Some(2));
        assert_eq!(q.get_by_index(2).map(String::as_str), Some("cccc"));
        assert_eq!(q.search_distance(), 0);
    }

    #[test]
    fn test_queue_get_two_items_from_tail() {
        let mut q = lettered(2);

        assert_eq!(q.get_by_index(1).map(String::as_str), Some("bbbb"));
        assert_eq!(q.search_distance(), 0);
        assert!(q.get_by_index(2).is_none());
    }

    #[test]
    fn test_queue_get_uses_cache() {
        let mut q = lettered(9);

        assert_eq!(q.get_by_index(4).map(String::as_str), Some("eeee"));
        assert_eq!(q.search_distance(), 4);
        assert_eq!(q.cached_index(), Some(4));

        assert_eq!(q.get_by_index(5).map(String::as_str), Some("ffff"));
        assert_eq!(q.search_distance(), 1);
        assert_eq!(q.cache_hits(), 1);
        assert_eq!(q.cached_index(), Some(5));
    }

    #[test]
    fn test_queue_ends_leave_cache() {
        let mut q = lettered(9);
        q.get_by_index(3);

        assert_eq!(q.get_by_index(0).map(String::as_str), Some("aaaa"));
        assert_eq!(q.get_by_index(8).map(String::as_str), Some("iiii"));
        assert_eq!(q.cached_index(), Some(3));
    }

    #[test]
    fn test_queue_get_mut() {
        let mut q = lettered(3);
        q.get_by_index_mut(1).unwrap().push('!');

        assert_eq!(values(&q), vec!["aaaa", "bbbb!", "cccc"]);
    }

    #[test]
    fn test_queue_insert() {
        let mut q = lettered(3);

        q.insert(1, "xxxx".to_string()).unwrap();
        assert_eq!(values(&q), vec!["aaaa", "xxxx", "bbbb", "cccc"]);
        assert_eq!(q.cached_index(), Some(1));
        assert_eq!(q.get_by_index(1).map(String::as_str), Some("xxxx"));
        assert_eq!(q.search_distance(), 0);

        q.insert(0, "head".to_string()).unwrap();
        assert_eq!(q.get_first().map(String::as_str), Some("head"));

        q.insert(5, "tail".to_string()).unwrap();
        assert_eq!(q.len(), 6);
        assert_eq!(q.iter().last().map(String::as_str), Some("tail"));

        assert_eq!(q.insert(9, "bad".to_string()), Err("bad".to_string()));
        assert_eq!(q.len(), 6);
    }

    #[test]
    fn test_queue_insert_into_empty() {
        let mut q = Queue::new("empty");
        q.insert(0, 7).unwrap();

        assert_eq!(q.len(), 1);
        assert_eq!(q.get_first(), Some(&7));
        assert_eq!(q.pop(), Some(7));
    }

    #[test]
    fn test_queue_remove_by_index() {
        let mut q = lettered(5);
        q.get_by_index(3);

        assert_eq!(q.remove_by_index(2).as_deref(), Some("cccc"));
        assert!(q.cached_index().is_none());
        assert_eq!(values(&q), vec!["aaaa", "bbbb", "dddd", "eeee"]);

        assert_eq!(q.remove_by_index(0).as_deref(), Some("aaaa"));
        assert_eq!(q.remove_by_index(2).as_deref(), Some("eeee"));
        assert!(q.remove_by_index(2).is_none());
        assert_eq!(values(&q), vec!["bbbb", "dddd"]);
    }

    #[test]
    fn test_queue_move_keeps_cache() {
        let mut q = lettered(6);
        q.get_by_index(2);

        assert!(q.move_item(2, 4));

        assert_eq!(values(&q), vec!["aaaa", "bbbb", "eeee", "dddd", "cccc", "ffff"]);
        assert_eq!(q.cached_index(), Some(2));
        assert_eq!(q.get_by_index(2).map(String::as_str), Some("eeee"));
        assert_eq!(q.search_distance(), 0);

        assert!(!q.move_item(1, 6));
        assert!(q.move_item(3, 3));
    }

    #[test]
    fn test_queue_clear_keep() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&released);
        let mut q = Queue::with_destructor("owned", move |v: u32| sink.borrow_mut().push(v));
        for v in 1..=5 {
            q.push(v);
        }
        q.get_by_index(1);

        q.clear(2);

        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(*released.borrow(), vec![5, 4, 3]);
        assert!(q.cached_index().is_none());

        q.clear(0);
        assert!(q.is_empty());
    }

    #[test]
    fn test_queue_drop_releases() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&released);
        let mut q = Queue::new("owned");
        q.set_destructor(move |v: u32| sink.borrow_mut().push(v));
        q.push(1);
        q.push(2);

        // Popped values belong to the caller
        assert_eq!(q.pop(), Some(1));
        drop(q);

        assert_eq!(*released.borrow(), vec![2]);
    }

    #[test]
    fn test_queue_iterate() {
        let mut q = lettered(3);
        let mut cursor = q.start_iterator();

        assert_eq!(q.iterate(&mut cursor).map(String::as_str), Some("aaaa"));
        assert_eq!(cursor.index(), Some(0));
        assert_eq!(q.iterate(&mut cursor).map(String::as_str), Some("bbbb"));
        assert_eq!(q.iterate(&mut cursor).map(String::as_str), Some("cccc"));
        assert!(q.iterate(&mut cursor).is_none());
        assert_eq!(cursor.index(), Some(2));
    }

    #[test]
    fn test_queue_iterate_remove_current() {
        let mut q = lettered(4);
        q.get_by_index(2);
        let mut cursor = q.start_iterator();

        // Nothing visited yet
        assert!(q.iterate_remove_current(&mut cursor).is_none());

        q.iterate(&mut cursor);
        q.iterate(&mut cursor);
        assert_eq!(cursor.index(), Some(1));

        assert_eq!(q.iterate_remove_current(&mut cursor).as_deref(), Some("bbbb"));
        assert_eq!(cursor.index(), Some(0));
        assert!(q.cached_index().is_none());
        assert!(q.iterate_remove_current(&mut cursor).is_none());

        // Iteration continues after the removed value
        assert_eq!(q.iterate(&mut cursor).map(String::as_str), Some("cccc"));
        assert_eq!(cursor.index(), Some(1));
        assert_eq!(values(&q), vec!["aaaa", "cccc", "dddd"]);
    }

    #[test]
    fn test_queue_remove_all_while_iterating() {
        let mut q = lettered(3);
        let mut cursor = q.start_iterator();
        let mut removed = Vec::new();

        while q.iterate(&mut cursor).is_some() {
            if let Some(value) = q.iterate_remove_current(&mut cursor) {
                removed.push(value);
            }
        }

        assert_eq!(removed, vec!["aaaa", "bbbb", "cccc"]);
        assert!(q.is_empty());
        assert!(cursor.index().is_none());
    }

    #[test]
    fn test_queue_pop_during_iteration() {
        let mut q = lettered(3);
        let mut cursor = q.start_iterator();

        // Popping the node the iterator would visit next moves it along
        assert_eq!(q.pop().as_deref(), Some("aaaa"));
        assert_eq!(q.iterate(&mut cursor).map(String::as_str), Some("bbbb"));
    }

    #[test]
    fn test_queue_slab_key_reuse() {
        let mut q = Queue::new("reuse");
        q.push(1);
        q.push(2);
        q.push(3);
        q.remove_by_index(1);

        // The freed slab slot is reused by the next node
        q.push(4);
        q.push_head(0);

        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![0, 1, 3, 4]);
        assert_eq!(q.get_by_index(2), Some(&3));
    }
}
