//! Configuration Module
//!
//! Handles loading and validating cache configuration from environment variables.

use std::env;

use crate::error::{CacheError, Result};

/// Cache and demo-driver configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// Number of threads used by the concurrent stress scenario
    pub workers: usize,
    /// Operations issued by each stress worker
    pub ops_per_worker: usize,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 5)
    /// - `CACHE_WORKERS` - Stress scenario threads (default: 4)
    /// - `CACHE_OPS_PER_WORKER` - Operations per stress thread (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: env_or("CACHE_CAPACITY", defaults.capacity),
            workers: env_or("CACHE_WORKERS", defaults.workers),
            ops_per_worker: env_or("CACHE_OPS_PER_WORKER", defaults.ops_per_worker),
        }
    }

    /// Checks that the configuration can build a working cache.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.workers == 0 {
            return Err(CacheError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 5,
            workers: 4,
            ops_per_worker: 1000,
        }
    }
}

fn env_or(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
