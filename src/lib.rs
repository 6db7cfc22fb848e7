//! LRU Vault - A bounded, thread-safe in-memory cache
//!
//! Fixed-capacity key/value storage with least-recently-used eviction.
//! Evicting, replacing or removing an entry releases its key and value
//! together, and every operation runs under a single scoped lock.

pub mod cache;
pub mod config;
pub mod driver;
pub mod error;

pub use cache::{BoundedCache, CacheStats};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
