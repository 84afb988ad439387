//! MemoCache: LRU memoization in front of a value source

use std::hash::Hash;

use memosource::ValueSource;
use tracing::{debug, trace};

use crate::error::Result;
use crate::lru::{Access, LruCache};
use crate::stats::CacheStats;

/// Fixed-capacity memoizing layer combining an LRU cache with a value source
///
/// The source is consulted exactly once per miss and its result is stored
/// verbatim, sentinel failure values included. Capacity and source are
/// fixed at construction.
pub struct MemoCache<K, V, S> {
    /// Consulted on every miss
    source: S,

    /// LRU index and recency order
    entries: LruCache<K, V>,

    /// Cache statistics
    stats: CacheStats,
}

impl<K, V, S> MemoCache<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: ValueSource<K, V>,
{
    /// Create a new MemoCache with the given capacity
    ///
    /// # Arguments
    /// * `source` - Value source to consult on a miss
    /// * `capacity` - Maximum number of entries kept, at least 1
    ///
    /// # Returns
    /// * `Result<MemoCache>` - `Error::ZeroCapacity` when `capacity` is 0
    pub fn new(source: S, capacity: usize) -> Result<Self> {
        let entries = LruCache::new(capacity)?;
        debug!("Created memo cache with capacity {}", capacity);

        Ok(Self {
            source,
            entries,
            stats: CacheStats::new(),
        })
    }

    /// Get the value for `key` from the cache or the source
    ///
    /// A hit promotes the key to most recently used. A miss fetches from the
    /// source, inserts at the head and evicts the least recently used entry
    /// if the cache went over capacity.
    pub fn get(&mut self, key: K) -> V {
        let source = &mut self.source;
        let stats = &self.stats;

        let (value, access) = self.entries.get_or_insert_with(key, |k| {
            stats.record_miss();
            source.fetch(k)
        });

        match access {
            Access::Hit => {
                self.stats.record_hit();
                trace!("Cache hit ({} entries)", self.entries.len());
            }
            Access::Miss { evicted } => {
                trace!("Cache miss ({} entries)", self.entries.len());
                if evicted.is_some() {
                    self.stats.record_eviction();
                    debug!(
                        "Evicted least recently used entry at capacity {}",
                        self.entries.capacity()
                    );
                }
            }
        }

        debug_assert!(self.entries.check_invariants().is_ok());
        value
    }

    /// Number of misses since construction
    ///
    /// Always equal to the number of source invocations made by this cache.
    pub fn num_misses(&self) -> u64 {
        self.stats.misses()
    }

    /// Check whether `key` is cached, without touching recency
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get the value source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }
}
