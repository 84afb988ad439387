//! # memocache
//!
//! Fixed-capacity LRU memoization over a pluggable value source.
//!
//! ## Architecture
//! - **HashMap**: AHash index from key to arena handle (O(1))
//! - **LRU List**: Doubly-linked list over arena slots for recency and eviction (O(1))
//! - **Integration**: Wraps any [`ValueSource`] for transparent memoization
//!
//! ```
//! use memocache::MemoCache;
//! use memosource::{string_hash, HashedSource};
//!
//! let mut cache = MemoCache::new(HashedSource::new(), 3).unwrap();
//! assert_eq!(cache.get("1".to_string()), string_hash("1"));
//! assert_eq!(cache.get("1".to_string()), string_hash("1"));
//! assert_eq!(cache.num_misses(), 1);
//! ```

#![warn(missing_docs)]

mod cache;
mod error;
mod lru;
mod stats;

pub use cache::MemoCache;
pub use error::{Error, Result};
pub use memosource::ValueSource;
pub use stats::{CacheStats, StatsSnapshot};
