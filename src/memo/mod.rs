//! Memoization Module
//!
//! Wraps callables with a cache lookup keyed by a deterministic encoding of
//! their arguments. Synchronous and asynchronous callables are both
//! supported; results land in the process-wide default store unless a
//! dedicated store is supplied.

mod key;
mod wrapper;

// Re-export public types
pub use key::cache_key;
pub use wrapper::{memoize, memoize_async, Memoized, MemoizedAsync};
