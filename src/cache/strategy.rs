//! Eviction Strategy Module
//!
//! Defines the available eviction strategies and the per-strategy tracking
//! structure a store keeps alongside its entries.

use std::collections::HashMap;
use std::str::FromStr;

use crate::cache::KeyOrder;
use crate::error::CacheError;

// == Eviction Strategy ==
/// Eviction discipline applied when the cache is at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionStrategy {
    /// Least Recently Used: evicts the entry untouched the longest
    #[default]
    Lru,
    /// Most Recently Used: evicts the entry touched last, for
    /// one-shot-read scan workloads
    Mru,
    /// First In First Out: evicts the earliest-inserted entry,
    /// irrespective of access pattern
    Fifo,
    /// Least Frequently Used: evicts the entry with the fewest read hits;
    /// ties break toward the earliest-inserted key
    Lfu,
}

impl EvictionStrategy {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Mru => "mru",
            Self::Fifo => "fifo",
            Self::Lfu => "lfu",
        }
    }
}

impl std::fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lru" => Ok(Self::Lru),
            "mru" => Ok(Self::Mru),
            "fifo" => Ok(Self::Fifo),
            "lfu" => Ok(Self::Lfu),
            other => Err(CacheError::InvalidStrategy(other.to_string())),
        }
    }
}

// == Strategy State ==
/// The single structure a store maintains for its active strategy.
///
/// Exactly one variant is live at a time; it tracks the same key set as the
/// store's entries map. LRU and MRU share the recency order and differ only
/// in which end the victim comes from.
#[derive(Debug)]
pub(crate) enum StrategyState {
    /// Most-recent-access order for LRU/MRU (front = least recent)
    Recency(KeyOrder),
    /// First-insertion order for FIFO, never reordered by reads
    Insertion(KeyOrder),
    /// Read-hit counts for LFU, mirroring each entry's access count
    Frequency(HashMap<String, u64>),
}

impl StrategyState {
    /// Creates the empty structure for a strategy.
    pub fn new(strategy: EvictionStrategy) -> Self {
        match strategy {
            EvictionStrategy::Lru | EvictionStrategy::Mru => Self::Recency(KeyOrder::new()),
            EvictionStrategy::Fifo => Self::Insertion(KeyOrder::new()),
            EvictionStrategy::Lfu => Self::Frequency(HashMap::new()),
        }
    }

    // == Insert ==
    /// Registers a newly inserted key.
    pub fn insert(&mut self, key: &str) {
        match self {
            Self::Recency(order) | Self::Insertion(order) => order.push_back(key),
            Self::Frequency(freq) => {
                freq.insert(key.to_string(), 0);
            }
        }
    }

    // == Record Access ==
    /// Registers a read hit. FIFO ordering is untouched by reads.
    pub fn record_access(&mut self, key: &str) {
        match self {
            Self::Recency(order) => {
                order.move_to_back(key);
            }
            Self::Insertion(_) => {}
            Self::Frequency(freq) => {
                if let Some(count) = freq.get_mut(key) {
                    *count += 1;
                }
            }
        }
    }

    // == Record Write ==
    /// Registers an overwrite of an existing key: recency refreshes as if
    /// freshly written, the frequency count resets, and the FIFO position
    /// stays where the key first entered.
    pub fn record_write(&mut self, key: &str) {
        match self {
            Self::Recency(order) => {
                order.move_to_back(key);
            }
            Self::Insertion(_) => {}
            Self::Frequency(freq) => {
                if let Some(count) = freq.get_mut(key) {
                    *count = 0;
                }
            }
        }
    }

    // == Remove ==
    /// Drops a key from the structure. Returns whether it was tracked.
    pub fn remove(&mut self, key: &str) -> bool {
        match self {
            Self::Recency(order) | Self::Insertion(order) => order.remove(key),
            Self::Frequency(freq) => freq.remove(key).is_some(),
        }
    }

    // == Victim Selection ==
    /// Picks the eviction victim for the given strategy without removing it.
    ///
    /// `seq_of` resolves a key to its insertion sequence number; LFU uses it
    /// to break frequency ties toward the earliest-inserted key.
    pub fn victim(&self, strategy: EvictionStrategy, seq_of: impl Fn(&str) -> u64) -> Option<String> {
        match (self, strategy) {
            (Self::Recency(order), EvictionStrategy::Lru) => {
                order.front().map(str::to_string)
            }
            (Self::Recency(order), EvictionStrategy::Mru) => {
                order.back().map(str::to_string)
            }
            (Self::Insertion(order), EvictionStrategy::Fifo) => {
                order.front().map(str::to_string)
            }
            (Self::Frequency(freq), EvictionStrategy::Lfu) => freq
                .iter()
                .min_by_key(|(key, &count)| (count, seq_of(key)))
                .map(|(key, _)| key.clone()),
            // Structure and strategy diverged; the store keeps them in sync
            _ => {
                debug_assert!(false, "strategy state does not match strategy");
                None
            }
        }
    }

    // == Bookkeeping ==
    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        match self {
            Self::Recency(order) | Self::Insertion(order) => order.len(),
            Self::Frequency(freq) => freq.len(),
        }
    }

    /// Checks if a key is tracked.
    pub fn contains(&self, key: &str) -> bool {
        match self {
            Self::Recency(order) | Self::Insertion(order) => order.contains(key),
            Self::Frequency(freq) => freq.contains_key(key),
        }
    }

    /// Drops all keys.
    pub fn clear(&mut self) {
        match self {
            Self::Recency(order) | Self::Insertion(order) => order.clear(),
            Self::Frequency(freq) => freq.clear(),
        }
    }
}
