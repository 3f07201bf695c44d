//! Size Estimation Module
//!
//! Best-effort value sizing used by the per-item admission limit.
//!
//! `EstimateSize` is a small capability trait: primitives report their
//! intrinsic size, strings their byte length, collections the recursive sum
//! of their elements, and anything opaque falls back to a fixed constant via
//! the default method. Estimation never fails, so admission stays best
//! effort for exotic value types.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::mem;
use std::sync::Arc;

// == Public Constants ==
/// Fallback size estimate in bytes for opaque values
pub const DEFAULT_SIZE_ESTIMATE: usize = 64;

// == Estimate Size Trait ==
/// Estimates the in-memory size of a value in bytes.
///
/// Opaque types can opt in with an empty impl and inherit the fallback:
///
/// ```
/// use memocache::EstimateSize;
///
/// struct Opaque;
/// impl EstimateSize for Opaque {}
/// ```
pub trait EstimateSize {
    /// Returns the estimated size in bytes.
    fn estimate_size(&self) -> usize {
        DEFAULT_SIZE_ESTIMATE
    }
}

// == Primitive Implementations ==
macro_rules! intrinsic_size_impl {
    ($($ty:ty),* $(,)?) => {
        $(
            impl EstimateSize for $ty {
                fn estimate_size(&self) -> usize {
                    mem::size_of::<$ty>()
                }
            }
        )*
    };
}

intrinsic_size_impl!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char, ()
);

// == String Implementations ==
impl EstimateSize for String {
    fn estimate_size(&self) -> usize {
        self.len()
    }
}

impl EstimateSize for &str {
    fn estimate_size(&self) -> usize {
        self.len()
    }
}

// == Collection Implementations ==
impl<T: EstimateSize> EstimateSize for Option<T> {
    fn estimate_size(&self) -> usize {
        match self {
            Some(value) => value.estimate_size(),
            None => 0,
        }
    }
}

impl<T: EstimateSize> EstimateSize for Vec<T> {
    fn estimate_size(&self) -> usize {
        self.iter().map(EstimateSize::estimate_size).sum()
    }
}

impl<T: EstimateSize> EstimateSize for [T] {
    fn estimate_size(&self) -> usize {
        self.iter().map(EstimateSize::estimate_size).sum()
    }
}

impl<K: EstimateSize, V: EstimateSize> EstimateSize for HashMap<K, V> {
    fn estimate_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| k.estimate_size() + v.estimate_size())
            .sum()
    }
}

impl<K: EstimateSize, V: EstimateSize> EstimateSize for BTreeMap<K, V> {
    fn estimate_size(&self) -> usize {
        self.iter()
            .map(|(k, v)| k.estimate_size() + v.estimate_size())
            .sum()
    }
}

// == JSON Implementation ==
impl EstimateSize for serde_json::Value {
    fn estimate_size(&self) -> usize {
        match self {
            serde_json::Value::Null => 0,
            serde_json::Value::Bool(_) => mem::size_of::<bool>(),
            serde_json::Value::Number(_) => mem::size_of::<f64>(),
            serde_json::Value::String(s) => s.len(),
            serde_json::Value::Array(items) => {
                items.iter().map(EstimateSize::estimate_size).sum()
            }
            serde_json::Value::Object(map) => map
                .iter()
                .map(|(k, v)| k.len() + v.estimate_size())
                .sum(),
        }
    }
}

// == Type-Erased Implementation ==
// The payload of the process-wide default store. Nothing can be known about
// the value behind the Any, so the fallback applies.
impl EstimateSize for Arc<dyn Any + Send + Sync> {}
