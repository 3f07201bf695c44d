//! Configuration Module
//!
//! Holds the tunable parameters of a cache store and loads them from
//! environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use crate::cache::EvictionStrategy;
use crate::error::{CacheError, Result};

/// Cache store configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. A config is immutable once a store is built from it, except
/// through [`CacheStore::update_config`](crate::cache::CacheStore::update_config).
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL for entries without an explicit override
    pub default_ttl: Duration,
    /// Eviction strategy applied when the cache is at capacity
    pub strategy: EvictionStrategy,
    /// Maximum estimated size in bytes for a single value, None = unlimited
    pub item_size_limit: Option<usize>,
    /// Whether hit/miss/eviction/expiration counters are recorded
    pub stats_enabled: bool,
}

impl CacheConfig {
    /// Creates a config with the given capacity and default TTL, keeping
    /// the remaining fields at their defaults.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            max_entries,
            default_ttl,
            ..Self::default()
        }
    }

    /// Sets the eviction strategy.
    pub fn with_strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the per-item size limit in bytes.
    pub fn with_item_size_limit(mut self, limit: usize) -> Self {
        self.item_size_limit = Some(limit);
        self
    }

    /// Enables or disables statistics recording.
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.stats_enabled = enabled;
        self
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// Unset or unparseable variables fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `EVICTION_STRATEGY` - One of `lru`, `mru`, `fifo`, `lfu` (default: lru)
    /// - `ITEM_SIZE_LIMIT` - Per-item size limit in bytes (default: unlimited)
    /// - `STATS_ENABLED` - Whether to record statistics (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_entries),
            default_ttl: env::var("DEFAULT_TTL")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.default_ttl),
            strategy: env::var("EVICTION_STRATEGY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.strategy),
            item_size_limit: env::var("ITEM_SIZE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok()),
            stats_enabled: env::var("STATS_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.stats_enabled),
        }
    }

    /// Validates the configuration.
    ///
    /// A zero `max_entries` or zero `default_ttl` is rejected; both would
    /// make every insert either impossible or instantly expired.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::InvalidConfig(
                "max_entries must be greater than zero".to_string(),
            ));
        }
        if self.default_ttl.is_zero() {
            return Err(CacheError::InvalidConfig(
                "default_ttl must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: Duration::from_secs(300),
            strategy: EvictionStrategy::Lru,
            item_size_limit: None,
            stats_enabled: true,
        }
    }
}

// == Config Update ==
/// Partial update applied through `update_config`.
///
/// Fields left as `None` keep their current value. The whole update is
/// validated before any field is applied.
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    /// New maximum entry count
    pub max_entries: Option<usize>,
    /// New default TTL
    pub default_ttl: Option<Duration>,
    /// New eviction strategy
    pub strategy: Option<EvictionStrategy>,
}

impl ConfigUpdate {
    /// Creates an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a new maximum entry count.
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Requests a new default TTL.
    pub fn default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = Some(default_ttl);
        self
    }

    /// Requests an eviction strategy switch.
    pub fn strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Returns the config that would result from applying this update.
    pub(crate) fn applied_to(&self, current: &CacheConfig) -> CacheConfig {
        CacheConfig {
            max_entries: self.max_entries.unwrap_or(current.max_entries),
            default_ttl: self.default_ttl.unwrap_or(current.default_ttl),
            strategy: self.strategy.unwrap_or(current.strategy),
            item_size_limit: current.item_size_limit,
            stats_enabled: current.stats_enabled,
        }
    }
}
