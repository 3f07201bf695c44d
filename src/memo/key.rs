//! Cache Key Module
//!
//! Deterministic encoding of a callable's identity and arguments into a
//! cache key.

use serde::Serialize;

// == Cache Key ==
/// Builds the default cache key for a memoized call.
///
/// The key is the callable's name followed by the canonical JSON encoding
/// of its arguments. Arguments pass through `serde_json::to_value`, whose
/// map representation keeps object keys sorted, so equivalent named
/// arguments supplied in different orders collapse onto the same key.
///
/// Returns `None` when the arguments cannot be serialized; callers then
/// proceed without the cache.
pub fn cache_key<A: Serialize>(name: &str, args: &A) -> Option<String> {
    let encoded = serde_json::to_value(args).ok()?;
    Some(format!("{}:{}", name, encoded))
}
