//! Memocache - An in-process cache engine
//!
//! Provides keyed caching with TTL expiration, four eviction strategies
//! (LRU, MRU, FIFO, LFU), per-item size admission, live statistics, and a
//! memoization wrapper for synchronous and asynchronous callables.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use memocache::{Cache, CacheConfig, EvictionStrategy};
//!
//! let cache = Cache::new(
//!     CacheConfig::new(2, Duration::from_secs(60)).with_strategy(EvictionStrategy::Lru),
//! )
//! .unwrap();
//!
//! cache.set("a", 1u64, None);
//! cache.set("b", 2u64, None);
//! cache.get("a");
//! cache.set("c", 3u64, None); // evicts "b"
//!
//! assert_eq!(cache.get("b"), None);
//! assert_eq!(cache.get("a"), Some(1));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod memo;
pub mod tasks;

pub use cache::{
    default_cache, Cache, CacheEntry, CacheStats, CacheStore, DynValue, EstimateSize,
    EvictionStrategy, DEFAULT_SIZE_ESTIMATE,
};
pub use config::{CacheConfig, ConfigUpdate};
pub use error::{CacheError, Result};
pub use memo::{cache_key, memoize, memoize_async, Memoized, MemoizedAsync};
pub use tasks::spawn_cleanup_task;
