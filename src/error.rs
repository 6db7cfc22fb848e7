//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::collections::TryReserveError;

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// A missing key is not represented here: lookups return `Option` and
/// removals return `bool`, since a miss is an expected outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Rejected construction parameters (e.g. zero capacity)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Storage for a new entry could not be reserved; the cache is unchanged
    #[error("Out of memory while reserving room for {requested} more entries")]
    OutOfMemory { requested: usize },

    /// Keys must be non-empty
    #[error("Invalid key: keys must be non-empty")]
    InvalidKey,
}

impl From<TryReserveError> for CacheError {
    fn from(_: TryReserveError) -> Self {
        CacheError::OutOfMemory { requested: 1 }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
