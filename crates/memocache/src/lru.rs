//! LRU (Least Recently Used) index and recency order
//!
//! Nodes live in an arena addressed by `usize` handles; the hash index maps
//! each key to its handle. The doubly-linked order runs head (most recently
//! used) to tail (least recently used). Freed slots are recycled through a
//! free list so handles stay stable for the lifetime of an entry.

use std::collections::HashMap;
use std::hash::Hash;
use ahash::RandomState;

use crate::error::{Error, Result};

/// Node in the LRU doubly-linked list
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// How a lookup was served
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<K> {
    /// Key was present and has been promoted to the head
    Hit,
    /// Key was absent; a new entry was linked at the head, possibly pushing
    /// out the previous tail
    Miss {
        /// Key removed to get back under capacity, if any
        evicted: Option<K>,
    },
}

/// LRU cache with fixed capacity
pub struct LruCache<K, V> {
    map: HashMap<K, usize, RandomState>,
    nodes: Vec<Option<Node<K, V>>>,
    head: Option<usize>,
    tail: Option<usize>,
    free_list: Vec<usize>,
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new LRU cache with the given capacity
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }

        // One spare slot: an insert briefly holds capacity + 1 entries
        Ok(Self {
            map: HashMap::with_capacity_and_hasher(capacity + 1, RandomState::new()),
            nodes: Vec::with_capacity(capacity + 1),
            head: None,
            tail: None,
            free_list: Vec::new(),
            capacity,
        })
    }

    /// Get a value from the cache, promoting it to most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if let Some(&idx) = self.map.get(key) {
            self.move_to_head(idx);
            self.nodes[idx].as_ref().map(|node| &node.value)
        } else {
            None
        }
    }

    /// Return the value for `key`, computing and inserting it on a miss
    ///
    /// Both paths end with the entry at the head of the order. `fetch` runs
    /// exactly once on a miss and never on a hit. At most one entry (the
    /// tail) is evicted.
    pub fn get_or_insert_with<F>(&mut self, key: K, fetch: F) -> (V, Access<K>)
    where
        F: FnOnce(&K) -> V,
    {
        if let Some(value) = self.get(&key).cloned() {
            return (value, Access::Hit);
        }

        let value = fetch(&key);
        let idx = self.alloc_node(Node {
            key: key.clone(),
            value: value.clone(),
            prev: None,
            next: None,
        });
        self.map.insert(key, idx);
        self.attach_head(idx);

        let evicted = self.prune();
        (value, Access::Miss { evicted })
    }

    /// Check membership without touching recency
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Get the current size of the cache
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Maximum number of entries retained
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Walk the order from head to tail and cross-check it against the index
    pub fn check_invariants(&self) -> Result<()> {
        let len = self.map.len();
        if len > self.capacity {
            return Err(Error::Invariant(format!(
                "{} entries exceed capacity {}",
                len, self.capacity
            )));
        }

        let mut seen = 0;
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            let node = self.nodes.get(idx).and_then(Option::as_ref).ok_or_else(|| {
                Error::Invariant(format!("order references empty slot {}", idx))
            })?;

            if node.prev != prev {
                return Err(Error::Invariant(format!("broken back link at slot {}", idx)));
            }
            if self.map.get(&node.key) != Some(&idx) {
                return Err(Error::Invariant(format!(
                    "slot {} is not indexed under its own key",
                    idx
                )));
            }

            seen += 1;
            if seen > len {
                return Err(Error::Invariant("order is longer than index".to_string()));
            }

            prev = Some(idx);
            cursor = node.next;
        }

        if seen != len {
            return Err(Error::Invariant(format!(
                "order holds {} entries, index holds {}",
                seen, len
            )));
        }
        if self.tail != prev {
            return Err(Error::Invariant("tail is not the last reachable node".to_string()));
        }

        Ok(())
    }

    fn move_to_head(&mut self, idx: usize) {
        if self.head == Some(idx) {
            return; // Already at front
        }

        self.detach(idx);
        self.attach_head(idx);
    }

    /// Link an unlinked node in front of the current head
    fn attach_head(&mut self, idx: usize) {
        let old_head = self.head;

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = old_head;
        }

        if let Some(head_idx) = old_head {
            if let Some(head) = &mut self.nodes[head_idx] {
                head.prev = Some(idx);
            }
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = if let Some(node) = &self.nodes[idx] {
            (node.prev, node.next)
        } else {
            return;
        };

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = &mut self.nodes[prev_idx] {
                    prev_node.next = next;
                }
            }
            None => {
                self.head = next;
            }
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = &mut self.nodes[next_idx] {
                    next_node.prev = prev;
                }
            }
            None => {
                self.tail = prev;
            }
        }

        if let Some(node) = &mut self.nodes[idx] {
            node.prev = None;
            node.next = None;
        }
    }

    /// Evict the tail if over capacity
    fn prune(&mut self) -> Option<K> {
        if self.map.len() <= self.capacity {
            return None;
        }

        let tail_idx = self.tail?;
        self.detach(tail_idx);
        let node = self.nodes[tail_idx].take()?;
        self.map.remove(&node.key);
        self.free_list.push(tail_idx);

        Some(node.key)
    }

    fn alloc_node(&mut self, node: Node<K, V>) -> usize {
        if let Some(idx) = self.free_list.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    /// Keys from most to least recently used
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            match &self.nodes[idx] {
                Some(node) => {
                    keys.push(node.key.clone());
                    cursor = node.next;
                }
                None => break,
            }
        }
        keys
    }
}
