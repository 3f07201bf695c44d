//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.
//!
//! Absence is not an error here: a missing or expired key surfaces as
//! `None` from `get` and `false` from `delete`, and an oversized value
//! surfaces as `false` from `set`. The only failures reported through
//! `CacheError` are configuration problems.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Rejected configuration at construction or reconfiguration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unrecognized eviction strategy name
    #[error("Unknown eviction strategy: {0}")]
    InvalidStrategy(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
