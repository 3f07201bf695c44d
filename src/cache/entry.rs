//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry with its access metadata.
///
/// The TTL window is measured from `last_touched`, so every read hit
/// extends an entry's life. `seq` is the store-wide insertion sequence
/// number, assigned once when the key first enters the cache and kept
/// across overwrites; it anchors FIFO ordering and the LFU tie-break.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Instant of the last read hit or write
    last_touched: Instant,
    /// Read hits since the last write
    access_count: u64,
    /// Per-entry TTL, superseding the store default when present
    ttl_override: Option<Duration>,
    /// Insertion sequence number, stable across overwrites
    seq: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_override` - Optional per-entry TTL
    /// * `seq` - Insertion sequence number assigned by the store
    pub fn new(value: V, ttl_override: Option<Duration>, seq: u64) -> Self {
        Self {
            value,
            last_touched: Instant::now(),
            access_count: 0,
            ttl_override,
            seq,
        }
    }

    // == Effective TTL ==
    /// Returns the TTL in force for this entry.
    pub fn effective_ttl(&self, default_ttl: Duration) -> Duration {
        self.ttl_override.unwrap_or(default_ttl)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived its effective TTL.
    ///
    /// An entry expires strictly after the TTL has elapsed since the last
    /// touch; an age exactly equal to the TTL is still alive.
    pub fn is_expired(&self, default_ttl: Duration) -> bool {
        self.last_touched.elapsed() > self.effective_ttl(default_ttl)
    }

    // == Touch ==
    /// Records a read hit: refreshes the TTL window and bumps the access
    /// count.
    pub fn touch(&mut self) {
        self.last_touched = Instant::now();
        self.access_count += 1;
    }

    // == Rewrite ==
    /// Overwrites the entry in place as a fresh write.
    ///
    /// Resets the TTL window and the access count, and replaces the TTL
    /// override with the new call's. The insertion sequence is untouched.
    pub fn rewrite(&mut self, value: V, ttl_override: Option<Duration>) {
        self.value = value;
        self.last_touched = Instant::now();
        self.access_count = 0;
        self.ttl_override = ttl_override;
    }

    // == Accessors ==
    /// Read hits since the last write.
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    /// Insertion sequence number.
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Instant of the last read hit or write.
    pub fn last_touched(&self) -> Instant {
        self.last_touched
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or zero if the entry has expired.
    ///
    /// Useful for debugging and statistics purposes.
    pub fn ttl_remaining(&self, default_ttl: Duration) -> Duration {
        self.effective_ttl(default_ttl)
            .saturating_sub(self.last_touched.elapsed())
    }
}
