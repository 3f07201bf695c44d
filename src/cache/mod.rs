//! Cache Module
//!
//! Provides in-process caching with TTL expiration, four eviction
//! strategies (LRU, MRU, FIFO, LFU), per-item size admission, and live
//! statistics.

mod entry;
mod order;
mod shared;
mod size;
mod stats;
mod store;
pub(crate) mod strategy;


// Re-export public types
pub use entry::CacheEntry;
pub use order::KeyOrder;
pub use shared::{default_cache, Cache, DynValue};
pub use size::{EstimateSize, DEFAULT_SIZE_ESTIMATE};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use strategy::EvictionStrategy;
