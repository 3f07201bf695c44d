//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a per-strategy tracking
//! structure, TTL expiration, and live statistics.

use std::collections::HashMap;
use std::time::Duration;

use tracing::debug;

use crate::cache::strategy::StrategyState;
use crate::cache::{CacheEntry, CacheStats, EstimateSize, EvictionStrategy};
use crate::config::{CacheConfig, ConfigUpdate};
use crate::error::Result;

// == Cache Store ==
/// Main cache storage with configurable eviction and TTL support.
///
/// Values are opaque to the store beyond cloning on read and size
/// estimation on write. The store itself is not synchronized; see
/// [`Cache`](crate::cache::Cache) for the shared thread-safe handle.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Structure backing the active eviction strategy
    strategy_state: StrategyState,
    /// Performance statistics
    stats: CacheStats,
    /// Store configuration
    config: CacheConfig,
    /// Next insertion sequence number
    next_seq: u64,
}

impl<V: Clone + EstimateSize> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore from a validated configuration.
    ///
    /// # Errors
    /// Returns `CacheError::InvalidConfig` for a zero `max_entries` or a
    /// zero `default_ttl`.
    pub fn new(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            entries: HashMap::new(),
            strategy_state: StrategyState::new(config.strategy),
            stats: CacheStats::new(),
            config,
            next_seq: 0,
        })
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A missing key is a miss. A key whose effective TTL has elapsed since
    /// its last touch is removed, counted as an expiration and a miss, and
    /// reported as absent. A hit refreshes the entry's TTL window, bumps its
    /// access count, and updates the strategy structure (FIFO ordering is
    /// never changed by reads).
    pub fn get(&mut self, key: &str) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.config.default_ttl),
            None => {
                if self.config.stats_enabled {
                    self.stats.record_miss();
                }
                return None;
            }
        };

        if expired {
            self.entries.remove(key);
            self.strategy_state.remove(key);
            debug!("Removed expired key '{}' on read", key);
            if self.config.stats_enabled {
                self.stats.record_expiration();
                self.stats.record_miss();
            }
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        entry.touch();
        let value = entry.value.clone();
        self.strategy_state.record_access(key);
        if self.config.stats_enabled {
            self.stats.record_hit();
        }
        Some(value)
    }

    // == Set ==
    /// Stores a key-value pair with an optional per-entry TTL.
    ///
    /// An existing key is overwritten in place: its TTL window and access
    /// count reset, its recency/frequency position refreshes as freshly
    /// written, and its FIFO position stays where the key first entered.
    /// Inserting a new key at capacity evicts exactly one victim first.
    ///
    /// Returns `false` without mutating anything when `item_size_limit` is
    /// configured and the value's estimated size exceeds it.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> bool {
        let key = key.into();

        if let Some(limit) = self.config.item_size_limit {
            let estimated = value.estimate_size();
            if estimated > limit {
                debug!(
                    "Rejected value for key '{}': estimated {} bytes exceeds limit of {}",
                    key, estimated, limit
                );
                return false;
            }
        }

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.rewrite(value, ttl);
            self.strategy_state.record_write(&key);
            return true;
        }

        if self.entries.len() >= self.config.max_entries {
            self.evict_one();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.strategy_state.insert(&key);
        self.entries.insert(key, CacheEntry::new(value, ttl, seq));
        true
    }

    // == Eviction ==
    /// Removes one victim chosen by the active strategy.
    ///
    /// Returns false when there is nothing to evict.
    fn evict_one(&mut self) -> bool {
        let victim = self.strategy_state.victim(self.config.strategy, |k| {
            self.entries.get(k).map(CacheEntry::seq).unwrap_or(u64::MAX)
        });

        let Some(victim) = victim else {
            return false;
        };

        self.entries.remove(&victim);
        self.strategy_state.remove(&victim);
        debug!("Evicted key '{}' ({} at capacity)", victim, self.config.strategy);
        if self.config.stats_enabled {
            self.stats.record_eviction();
        }
        true
    }

    // == Delete ==
    /// Removes an entry by key. Idempotent; returns whether something was
    /// removed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.remove(key).is_some() {
            self.strategy_state.remove(key);
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Empties the cache and, when statistics are enabled, starts a new
    /// counter epoch.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.strategy_state.clear();
        if self.config.stats_enabled {
            self.stats.reset();
        }
    }

    // == Stats ==
    /// Returns a statistics snapshot. Never mutates state.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.size = self.entries.len();
        stats.max_size = self.config.max_entries;
        stats
    }

    /// Zeroes the counters, starting a new epoch.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Reconfiguration ==
    /// Applies a partial configuration update.
    ///
    /// The whole update is validated before anything changes. A strategy
    /// switch re-derives the tracking structure from the live entries
    /// (recency from last-touch times, insertion order from sequence
    /// numbers, frequency from access counts); previously evicted items are
    /// not revisited. Shrinking `max_entries` evicts under the now-current
    /// strategy until the capacity invariant holds.
    ///
    /// Returns the updated configuration.
    pub fn update_config(&mut self, update: ConfigUpdate) -> Result<CacheConfig> {
        let next = update.applied_to(&self.config);
        next.validate()?;

        let strategy_changed = next.strategy != self.config.strategy;
        self.config = next;

        if strategy_changed {
            self.rebuild_strategy_state();
        }

        while self.entries.len() > self.config.max_entries {
            if !self.evict_one() {
                break;
            }
        }

        Ok(self.config.clone())
    }

    /// Re-derives the strategy structure from the entries map.
    fn rebuild_strategy_state(&mut self) {
        self.strategy_state = match self.config.strategy {
            EvictionStrategy::Lru | EvictionStrategy::Mru => {
                let mut keys: Vec<_> = self
                    .entries
                    .iter()
                    .map(|(key, entry)| (entry.last_touched(), entry.seq(), key.clone()))
                    .collect();
                keys.sort();
                let mut state = StrategyState::new(self.config.strategy);
                for (_, _, key) in &keys {
                    state.insert(key);
                }
                state
            }
            EvictionStrategy::Fifo => {
                let mut keys: Vec<_> = self
                    .entries
                    .iter()
                    .map(|(key, entry)| (entry.seq(), key.clone()))
                    .collect();
                keys.sort();
                let mut state = StrategyState::new(EvictionStrategy::Fifo);
                for (_, key) in &keys {
                    state.insert(key);
                }
                state
            }
            EvictionStrategy::Lfu => StrategyState::Frequency(
                self.entries
                    .iter()
                    .map(|(key, entry)| (key.clone(), entry.access_count()))
                    .collect(),
            ),
        };
    }

    // == Cleanup Expired ==
    /// Removes all expired entries, counting each as an expiration.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(self.config.default_ttl))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.strategy_state.remove(&key);
            if self.config.stats_enabled {
                self.stats.record_expiration();
            }
        }

        count
    }

    // == Bookkeeping ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks whether a live (non-expired) entry exists for the key,
    /// without touching it.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired(self.config.default_ttl))
            .unwrap_or(false)
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Checks that the entries map and the strategy structure track the
    /// same key set.
    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.entries.len() == self.strategy_state.len()
            && self.entries.keys().all(|key| self.strategy_state.contains(key))
    }
}
