//! Memoization Wrapper Module
//!
//! Higher-order wrappers that bracket a callable with a cache lookup and a
//! cache store. The lookup and the store are separate critical sections;
//! the callable itself runs unlocked between them, so a slow or cancelled
//! call never holds up the cache. A cancelled async callable simply never
//! reaches the store-side write.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::cache::{default_cache, Cache, DynValue};
use crate::memo::key::cache_key;

type KeyFn<A> = Box<dyn Fn(&A) -> String + Send + Sync>;

// == Sync Wrapper ==
/// Memoizes a synchronous callable.
///
/// Results are stored type-erased in the configured store (the process-wide
/// default store unless overridden) and downcast on the way out. A cached
/// `None` of an `Option` result type is a legitimate hit, distinct from
/// "no entry": the store's own `Option` return carries that difference.
///
/// # Example
/// ```
/// use memocache::Memoized;
///
/// let slow_double = Memoized::new("double", |x: &u64| x * 2);
/// assert_eq!(slow_double.call(21), 42);
/// assert_eq!(slow_double.call(21), 42); // served from cache
/// ```
pub struct Memoized<A, R, F> {
    name: String,
    func: F,
    ttl: Option<Duration>,
    store: Cache<DynValue>,
    key_fn: Option<KeyFn<A>>,
    _result: PhantomData<fn(&A) -> R>,
}

impl<A, R, F> Memoized<A, R, F>
where
    A: Serialize,
    R: Clone + Send + Sync + 'static,
    F: Fn(&A) -> R,
{
    // == Constructor ==
    /// Wraps a callable under the given name, backed by the process-wide
    /// default store.
    ///
    /// The name is the callable's identity in the cache key; two wrappers
    /// sharing a name and argument encoding share cached results.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            ttl: None,
            store: default_cache(),
            key_fn: None,
            _result: PhantomData,
        }
    }

    /// Sets a TTL for results cached by this wrapper.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Uses a dedicated store instead of the process-wide default.
    pub fn with_store(mut self, store: Cache<DynValue>) -> Self {
        self.store = store;
        self
    }

    /// Overrides the default argument encoding with a custom key function.
    pub fn with_key_fn(mut self, key_fn: impl Fn(&A) -> String + Send + Sync + 'static) -> Self {
        self.key_fn = Some(Box::new(key_fn));
        self
    }

    fn key_for(&self, args: &A) -> Option<String> {
        match &self.key_fn {
            Some(key_fn) => Some(key_fn(args)),
            None => cache_key(&self.name, args),
        }
    }

    fn lookup(&self, key: &str) -> Option<R> {
        let hit = self.store.get(key)?;
        // A downcast mismatch means the key collided with a foreign type;
        // treat it as a miss and recompute
        match hit.downcast::<R>() {
            Ok(value) => Some((*value).clone()),
            Err(_) => None,
        }
    }

    // == Call ==
    /// Invokes the wrapped callable through the cache.
    ///
    /// On a hit the callable is not invoked. On a miss the callable runs,
    /// its result is stored under the computed key, and the result is
    /// returned. Arguments that fail to serialize bypass the cache
    /// entirely.
    pub fn call(&self, args: A) -> R {
        let Some(key) = self.key_for(&args) else {
            debug!("Arguments for '{}' did not serialize; calling uncached", self.name);
            return (self.func)(&args);
        };

        if let Some(value) = self.lookup(&key) {
            return value;
        }

        let result = (self.func)(&args);
        self.store
            .set(key, Arc::new(result.clone()) as DynValue, self.ttl);
        result
    }
}

// == Async Wrapper ==
/// Memoizes an asynchronous callable.
///
/// The suspension point is the wrapped call itself; the cache lookup and
/// store bracketing it are synchronous and never held across an await.
pub struct MemoizedAsync<A, F, Fut> {
    name: String,
    func: F,
    ttl: Option<Duration>,
    store: Cache<DynValue>,
    key_fn: Option<KeyFn<A>>,
    _future: PhantomData<fn(A) -> Fut>,
}

impl<A, F, Fut> MemoizedAsync<A, F, Fut>
where
    A: Serialize,
    F: Fn(A) -> Fut,
    Fut: Future,
    Fut::Output: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Wraps an async callable under the given name, backed by the
    /// process-wide default store.
    pub fn new(name: impl Into<String>, func: F) -> Self {
        Self {
            name: name.into(),
            func,
            ttl: None,
            store: default_cache(),
            key_fn: None,
            _future: PhantomData,
        }
    }

    /// Sets a TTL for results cached by this wrapper.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Uses a dedicated store instead of the process-wide default.
    pub fn with_store(mut self, store: Cache<DynValue>) -> Self {
        self.store = store;
        self
    }

    /// Overrides the default argument encoding with a custom key function.
    pub fn with_key_fn(mut self, key_fn: impl Fn(&A) -> String + Send + Sync + 'static) -> Self {
        self.key_fn = Some(Box::new(key_fn));
        self
    }

    fn key_for(&self, args: &A) -> Option<String> {
        match &self.key_fn {
            Some(key_fn) => Some(key_fn(args)),
            None => cache_key(&self.name, args),
        }
    }

    fn lookup(&self, key: &str) -> Option<Fut::Output> {
        let hit = self.store.get(key)?;
        match hit.downcast::<Fut::Output>() {
            Ok(value) => Some((*value).clone()),
            Err(_) => None,
        }
    }

    // == Call ==
    /// Invokes the wrapped async callable through the cache.
    ///
    /// On a hit the future is never created. On a miss the callable is
    /// awaited and its result stored after it returns, so a cancelled call
    /// leaves the cache untouched.
    pub async fn call(&self, args: A) -> Fut::Output {
        let Some(key) = self.key_for(&args) else {
            debug!("Arguments for '{}' did not serialize; calling uncached", self.name);
            return (self.func)(args).await;
        };

        if let Some(value) = self.lookup(&key) {
            return value;
        }

        let result = (self.func)(args).await;
        self.store
            .set(key, Arc::new(result.clone()) as DynValue, self.ttl);
        result
    }
}

// == Free Helpers ==
/// Wraps a synchronous callable with the default store and key encoding.
pub fn memoize<A, R, F>(name: impl Into<String>, func: F) -> Memoized<A, R, F>
where
    A: Serialize,
    R: Clone + Send + Sync + 'static,
    F: Fn(&A) -> R,
{
    Memoized::new(name, func)
}

/// Wraps an asynchronous callable with the default store and key encoding.
pub fn memoize_async<A, F, Fut>(name: impl Into<String>, func: F) -> MemoizedAsync<A, F, Fut>
where
    A: Serialize,
    F: Fn(A) -> Fut,
    Fut: Future,
    Fut::Output: Clone + Send + Sync + 'static,
{
    MemoizedAsync::new(name, func)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread::sleep;

    fn private_store() -> Cache<DynValue> {
        Cache::new(CacheConfig::new(100, Duration::from_secs(300))).unwrap()
    }

    #[test]
    fn test_memoized_single_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let wrapped = Memoized::new("unit_single_invocation", move |x: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x * 2
        })
        .with_store(private_store());

        assert_eq!(wrapped.call(21), 42);
        assert_eq!(wrapped.call(21), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_memoized_distinct_args() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let wrapped = Memoized::new("unit_distinct_args", move |x: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x + 1
        })
        .with_store(private_store());

        assert_eq!(wrapped.call(1), 2);
        assert_eq!(wrapped.call(2), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_memoized_ttl_recomputes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let wrapped = Memoized::new("unit_ttl_recompute", move |x: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            *x
        })
        .with_store(private_store())
        .with_ttl(Duration::from_millis(30));

        wrapped.call(7);
        sleep(Duration::from_millis(60));
        wrapped.call(7);

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_memoized_custom_key_fn() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        // Key only on the first tuple field; the second is a hint
        let wrapped = Memoized::new("unit_custom_key", move |args: &(u64, String)| {
            counter.fetch_add(1, Ordering::SeqCst);
            args.0
        })
        .with_store(private_store())
        .with_key_fn(|args: &(u64, String)| format!("custom:{}", args.0));

        assert_eq!(wrapped.call((5, "first".to_string())), 5);
        assert_eq!(wrapped.call((5, "second".to_string())), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_memoized_caches_none_results() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let wrapped = Memoized::new("unit_caches_none", move |_: &u64| -> Option<String> {
            counter.fetch_add(1, Ordering::SeqCst);
            None
        })
        .with_store(private_store());

        assert_eq!(wrapped.call(1), None);
        assert_eq!(wrapped.call(1), None);
        // A cached None is a hit, not an absent entry
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_memoized_stores_are_isolated() {
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&calls);
        let first = Memoized::new("unit_isolated", move |x: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            *x
        })
        .with_store(private_store());

        let counter = Arc::clone(&calls);
        let second = Memoized::new("unit_isolated", move |x: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            *x
        })
        .with_store(private_store());

        first.call(9);
        second.call(9);
        // Same name, separate stores: both callables ran
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_memoize_helper_uses_default_store() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let wrapped = memoize("unit_default_store_helper", move |x: &u64| {
            counter.fetch_add(1, Ordering::SeqCst);
            x * 3
        });

        assert_eq!(wrapped.call(3), 9);
        assert_eq!(wrapped.call(3), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Leave the shared default store clean for other tests
        default_cache().delete("unit_default_store_helper:3");
    }

    #[tokio::test]
    async fn test_memoized_async_single_invocation() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let wrapped = MemoizedAsync::new("unit_async_single", move |x: u64| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                x * 2
            }
        })
        .with_store(private_store());

        assert_eq!(wrapped.call(10).await, 20);
        assert_eq!(wrapped.call(10).await, 20);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_memoized_async_ttl() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let wrapped = memoize_async("unit_async_ttl", move |x: u64| {
            let counter = Arc::clone(&counter);
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                x
            }
        })
        .with_store(private_store())
        .with_ttl(Duration::from_millis(30));

        wrapped.call(1).await;
        tokio::time::sleep(Duration::from_millis(60)).await;
        wrapped.call(1).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
