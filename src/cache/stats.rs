//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, evictions, and
//! expirations.

use serde::Serialize;

// == Cache Stats ==
/// Cache performance counters plus a size snapshot.
///
/// Counters only grow within an epoch; `clear` and `reset_stats` start a new
/// one. `size` and `max_size` are filled in when a snapshot is taken from
/// the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key missing or expired)
    pub misses: u64,
    /// Number of entries evicted to satisfy the capacity limit
    pub evictions: u64,
    /// Number of entries removed because their TTL elapsed
    pub expirations: u64,
    /// Current number of entries in the cache
    pub size: usize,
    /// Configured maximum number of entries
    pub max_size: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expiration ==
    /// Increments the expiration counter.
    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    // == Reset ==
    /// Zeroes every counter, starting a new epoch.
    pub fn reset(&mut self) {
        *self = Self {
            size: self.size,
            max_size: self.max_size,
            ..Self::default()
        };
    }
}
