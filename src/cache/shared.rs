//! Shared Cache Module
//!
//! Thread-safe handle over a cache store, plus the process-wide default
//! store used by memoized functions that do not bring their own.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, EstimateSize};
use crate::config::{CacheConfig, ConfigUpdate};
use crate::error::Result;

// == Dyn Value ==
/// Type-erased payload stored by the process-wide default cache.
///
/// Memoized results of any `Send + Sync + 'static` type are stored behind
/// this and downcast on the way out.
pub type DynValue = Arc<dyn Any + Send + Sync>;

// == Cache Handle ==
/// Cloneable, thread-safe handle to a cache store.
///
/// Every operation takes the store lock for one short critical section
/// covering the whole state transition (entries, strategy structure, and
/// counters together); the lock is never held across caller code.
#[derive(Debug)]
pub struct Cache<V> {
    inner: Arc<Mutex<CacheStore<V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: Clone + EstimateSize> Cache<V> {
    // == Constructor ==
    /// Creates a new shared cache from a validated configuration.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(CacheStore::new(config)?)),
        })
    }

    /// Creates a shared cache with the default configuration.
    pub fn with_defaults() -> Self {
        Self {
            inner: Arc::new(Mutex::new(
                CacheStore::new(CacheConfig::default()).expect("default config is valid"),
            )),
        }
    }

    // == Store Operations ==
    /// Retrieves a value by key. See [`CacheStore::get`].
    pub fn get(&self, key: &str) -> Option<V> {
        self.inner.lock().get(key)
    }

    /// Stores a key-value pair. See [`CacheStore::set`].
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> bool {
        self.inner.lock().set(key, value, ttl)
    }

    /// Removes an entry by key. See [`CacheStore::delete`].
    pub fn delete(&self, key: &str) -> bool {
        self.inner.lock().delete(key)
    }

    /// Empties the cache. See [`CacheStore::clear`].
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Returns a statistics snapshot.
    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    /// Zeroes the statistics counters.
    pub fn reset_stats(&self) {
        self.inner.lock().reset_stats()
    }

    /// Applies a partial configuration update. See
    /// [`CacheStore::update_config`].
    pub fn update_config(&self, update: ConfigUpdate) -> Result<CacheConfig> {
        self.inner.lock().update_config(update)
    }

    /// Returns a copy of the active configuration.
    pub fn config(&self) -> CacheConfig {
        self.inner.lock().config().clone()
    }

    /// Removes all expired entries. See [`CacheStore::cleanup_expired`].
    pub fn cleanup_expired(&self) -> usize {
        self.inner.lock().cleanup_expired()
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Checks whether a live entry exists for the key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.lock().contains_key(key)
    }
}

// == Default Store ==
// Lazily created on first access, configured from the environment, and
// alive until process exit.
static DEFAULT_CACHE: Lazy<Cache<DynValue>> = Lazy::new(|| {
    Cache::new(CacheConfig::from_env()).unwrap_or_else(|_| Cache::with_defaults())
});

/// Returns a handle to the process-wide default cache.
///
/// All callers share the same underlying store; memoized functions fall
/// back to it when no store of their own is supplied.
pub fn default_cache() -> Cache<DynValue> {
    DEFAULT_CACHE.clone()
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn shared(max_entries: usize) -> Cache<String> {
        Cache::new(CacheConfig::new(max_entries, Duration::from_secs(300))).unwrap()
    }

    #[test]
    fn test_shared_roundtrip() {
        let cache = shared(10);

        assert!(cache.set("key1", "value1".to_string(), None));
        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert!(cache.delete("key1"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let cache = shared(10);
        let other = cache.clone();

        cache.set("key1", "value1".to_string(), None);
        assert_eq!(other.get("key1"), Some("value1".to_string()));

        other.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = shared(100);

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..25 {
                        cache.set(format!("k{}_{}", worker, i), "v".to_string(), None);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 100);
    }

    #[test]
    fn test_default_cache_is_shared() {
        let a = default_cache();
        let b = default_cache();

        let value: DynValue = Arc::new(41u64);
        a.set("shared_handle_probe", value, None);
        let hit = b.get("shared_handle_probe");
        assert!(hit.is_some());

        let number = hit.unwrap().downcast::<u64>().unwrap();
        assert_eq!(*number, 41);

        b.delete("shared_handle_probe");
    }
}
