//! Bounded Cache Module
//!
//! Thread-safe handle over [`LruStore`]: one mutex, held for exactly one operation.

use parking_lot::Mutex;

use crate::cache::{CacheStats, LruStore};
use crate::config::CacheConfig;
use crate::error::Result;

// == Bounded Cache ==
/// Fixed-capacity LRU cache safe to share between threads.
///
/// Every operation, including `get` (which reorders recency), takes the lock
/// for its whole duration through a scoped guard, so operations are
/// linearizable. Values are handed out as owned copies and never borrow
/// from the cache.
///
/// Dropping the cache drops every remaining entry.
///
/// # Example
/// ```
/// use lru_vault::BoundedCache;
///
/// let cache = BoundedCache::new(2).unwrap();
/// cache.put("A", b"1".to_vec()).unwrap();
/// cache.put("B", b"2".to_vec()).unwrap();
/// cache.put("C", b"3".to_vec()).unwrap();
///
/// assert_eq!(cache.get("A"), None);
/// assert_eq!(cache.get("C"), Some(b"3".to_vec()));
/// ```
#[derive(Debug)]
pub struct BoundedCache {
    inner: Mutex<LruStore>,
}

impl BoundedCache {
    // == Constructor ==
    /// Creates an empty cache. Fails with `InvalidConfig` when `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            inner: Mutex::new(LruStore::new(capacity)?),
        })
    }

    /// Creates a cache from validated configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.capacity)
    }

    // == Put ==
    /// Inserts or replaces the value for `key`.
    ///
    /// Returns the key evicted to make room, if any. On error the cache is
    /// unchanged.
    pub fn put(&self, key: impl AsRef<[u8]>, value: impl Into<Vec<u8>>) -> Result<Option<Vec<u8>>> {
        let value = value.into();
        self.inner.lock().put(key.as_ref(), value)
    }

    // == Get ==
    /// Returns a copy of the value for `key` and marks it most recently used.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<Vec<u8>> {
        self.inner.lock().get(key.as_ref())
    }

    // == Remove ==
    /// Removes `key`. Returns whether an entry was dropped.
    pub fn remove(&self, key: impl AsRef<[u8]>) -> bool {
        self.inner.lock().remove(key.as_ref())
    }

    // == Clear ==
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn contains(&self, key: impl AsRef<[u8]>) -> bool {
        self.inner.lock().contains(key.as_ref())
    }

    pub fn peek_lru(&self) -> Option<Vec<u8>> {
        self.inner.lock().peek_lru()
    }

    pub fn keys_by_recency(&self) -> Vec<Vec<u8>> {
        self.inner.lock().keys_by_recency()
    }

    pub fn footprint(&self) -> usize {
        self.inner.lock().footprint()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }
}
