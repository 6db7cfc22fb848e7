//! LRU Store Module
//!
//! Single-owner cache state: a keyed index and a recency list over the same entries.

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{CacheStats, Entry, Handle, RecencyList};
use crate::error::{CacheError, Result};

/// Upper bound on storage reserved up front; larger caches grow on demand.
const PREALLOC_LIMIT: usize = 1024;

// == LRU Store ==
/// Cache storage with LRU eviction.
///
/// Entries are owned by the recency list alone. The index only maps a key
/// to the entry's handle, and every method that adds or drops an entry
/// updates both in the same call.
#[derive(Debug)]
pub struct LruStore {
    /// Key to entry handle
    index: HashMap<Arc<[u8]>, Handle>,
    /// Owned entries in recency order
    recency: RecencyList<Entry>,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl LruStore {
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }

        let prealloc = capacity.min(PREALLOC_LIMIT);
        let mut index = HashMap::new();
        index
            .try_reserve(prealloc)
            .map_err(|_| CacheError::OutOfMemory { requested: prealloc })?;

        Ok(Self {
            index,
            recency: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
        })
    }

    // == Put ==
    /// Stores a value under `key`, taking ownership of it.
    ///
    /// - Present key: the old value is dropped, the entry becomes most recent.
    /// - Absent key with room: a new entry is created.
    /// - Absent key at capacity: the least recently used entry (key and
    ///   value) is dropped first; its key is returned.
    ///
    /// Storage is reserved before anything changes, so on error the store
    /// is exactly as it was.
    pub fn put(&mut self, key: &[u8], value: Vec<u8>) -> Result<Option<Vec<u8>>> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey);
        }

        if let Some(&handle) = self.index.get(key) {
            if let Some(entry) = self.recency.get_mut(handle) {
                entry.replace_value(value);
                self.recency.touch(handle);
                self.stats.record_update();
                return Ok(None);
            }
        }

        let full = self.index.len() >= self.capacity;

        // A removal can leave a tombstone in the table, so the insert after an
        // eviction may still need to grow it; this only allocates when the
        // table has no spare room left.
        self.index.try_reserve(1)?;
        if !full {
            // At capacity the evicted entry's slot is reused instead
            self.recency.try_reserve_slot()?;
        }

        let evicted = if full { self.evict_lru() } else { None };

        let key: Arc<[u8]> = Arc::from(key);
        let handle = self.recency.push_front(Entry::new(key.clone(), value));
        self.index.insert(key, handle);

        self.stats.record_insert();
        self.stats.set_entries(self.index.len());
        Ok(evicted)
    }

    // == Get ==
    /// Returns a copy of the value for `key`, promoting it to most recent.
    pub fn get(&mut self, key: &[u8]) -> Option<Vec<u8>> {
        let value = self.index.get(key).copied().and_then(|handle| {
            self.recency.touch(handle);
            self.recency.get(handle).map(|entry| entry.value.clone())
        });

        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Remove ==
    /// Drops the entry for `key`. Returns whether one existed.
    pub fn remove(&mut self, key: &[u8]) -> bool {
        let Some(handle) = self.index.remove(key) else {
            return false;
        };
        let removed = self.recency.remove(handle).is_some();
        if removed {
            self.stats.record_removals(1);
        }
        self.stats.set_entries(self.index.len());
        removed
    }

    // == Clear ==
    /// Drops every entry.
    pub fn clear(&mut self) {
        let dropped = self.index.len();
        self.index.clear();
        self.recency.clear();
        self.stats.record_removals(dropped);
        self.stats.set_entries(0);
    }

    // == Evict ==
    /// Drops the least recently used entry and returns its key.
    fn evict_lru(&mut self) -> Option<Vec<u8>> {
        let entry = self.recency.pop_back()?;
        self.index.remove(&*entry.key);
        self.stats.record_eviction();
        Some(entry.key.to_vec())
    }

    /// Membership test that leaves recency untouched.
    pub fn contains(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    /// Key of the next eviction candidate.
    pub fn peek_lru(&self) -> Option<Vec<u8>> {
        self.recency.peek_back().map(|entry| entry.key.to_vec())
    }

    /// Keys from most to least recently used.
    pub fn keys_by_recency(&self) -> Vec<Vec<u8>> {
        self.recency.iter().map(|entry| entry.key.to_vec()).collect()
    }

    /// Total key and payload bytes currently held.
    pub fn footprint(&self) -> usize {
        self.recency.iter().map(Entry::footprint).sum()
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_entries(self.index.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(capacity: usize, keys: &[&str]) -> LruStore {
        let mut store = LruStore::new(capacity).unwrap();
        for key in keys {
            store.put(key.as_bytes(), format!("value_{key}").into_bytes()).unwrap();
        }
        store
    }

    #[test]
    fn test_store_new() {
        let store = LruStore::new(100).unwrap();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
    }

    #[test]
    fn test_store_zero_capacity() {
        assert!(matches!(
            LruStore::new(0),
            Err(CacheError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_store_put_and_get() {
        let mut store = LruStore::new(100).unwrap();

        store.put(b"key1", b"value1".to_vec()).unwrap();
        assert_eq!(store.get(b"key1"), Some(b"value1".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = LruStore::new(100).unwrap();
        assert_eq!(store.get(b"nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_empty_key_rejected() {
        let mut store = store_with(2, &["a"]);

        assert_eq!(store.put(b"", b"v".to_vec()), Err(CacheError::InvalidKey));
        assert_eq!(store.len(), 1);
        assert_eq!(store.keys_by_recency(), vec![b"a".to_vec()]);
    }

    #[test]
    fn test_store_empty_value() {
        let mut store = LruStore::new(1).unwrap();

        store.put(b"k", Vec::new()).unwrap();
        assert_eq!(store.get(b"k"), Some(Vec::new()));
    }

    #[test]
    fn test_store_remove() {
        let mut store = store_with(100, &["key1", "key2"]);

        assert!(store.remove(b"key1"));
        assert!(!store.remove(b"key1"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(b"key1"), None);
        assert_eq!(store.keys_by_recency(), vec![b"key2".to_vec()]);
        assert_eq!(store.stats().removals, 1);
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = LruStore::new(1).unwrap();

        store.put(b"A", b"1".to_vec()).unwrap();
        let evicted = store.put(b"A", b"2".to_vec()).unwrap();

        assert_eq!(evicted, None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(b"A"), Some(b"2".to_vec()));
        assert_eq!(store.stats().updates, 1);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_overwrite_promotes() {
        let mut store = store_with(2, &["A", "B"]);

        store.put(b"A", b"again".to_vec()).unwrap();
        let evicted = store.put(b"C", b"3".to_vec()).unwrap();

        assert_eq!(evicted, Some(b"B".to_vec()));
        assert!(store.contains(b"A"));
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = store_with(2, &["A", "B"]);

        let evicted = store.put(b"C", b"3".to_vec()).unwrap();

        assert_eq!(evicted, Some(b"A".to_vec()));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(b"A"), None);
        assert!(store.get(b"B").is_some());
        assert!(store.get(b"C").is_some());
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = store_with(2, &["A", "B"]);

        store.get(b"A").unwrap();
        let evicted = store.put(b"C", b"3".to_vec()).unwrap();

        assert_eq!(evicted, Some(b"B".to_vec()));
        assert!(store.get(b"A").is_some());
        assert_eq!(store.get(b"B"), None);
    }

    #[test]
    fn test_store_contains_does_not_promote() {
        let mut store = store_with(2, &["A", "B"]);

        assert!(store.contains(b"A"));
        assert_eq!(store.peek_lru(), Some(b"A".to_vec()));
        store.put(b"C", b"3".to_vec()).unwrap();
        assert!(!store.contains(b"A"));
    }

    #[test]
    fn test_store_keys_by_recency() {
        let mut store = store_with(3, &["a", "b", "c"]);

        store.get(b"a");
        assert_eq!(
            store.keys_by_recency(),
            vec![b"a".to_vec(), b"c".to_vec(), b"b".to_vec()]
        );
    }

    #[test]
    fn test_store_overflow_by_many() {
        let mut store = LruStore::new(5).unwrap();

        for i in 0..50 {
            store
                .put(format!("temp_key_{i}").as_bytes(), format!("temp_value_{i}").into_bytes())
                .unwrap();
            assert!(store.len() <= 5);
        }

        let stats = store.stats();
        assert_eq!(stats.inserts, 50);
        assert_eq!(stats.evictions, 45);
        assert_eq!(stats.entries, 5);
        assert_eq!(store.peek_lru(), Some(b"temp_key_45".to_vec()));
    }

    #[test]
    fn test_store_eviction_reuses_slot() {
        let mut store = store_with(3, &["a", "b", "c"]);
        assert_eq!(store.recency.slot_count(), 3);

        for i in 0..20 {
            store.put(format!("new_{i}").as_bytes(), vec![0; 8]).unwrap();
        }

        assert_eq!(store.recency.slot_count(), 3);
        assert_eq!(store.stats().evictions, 20);
    }

    #[test]
    fn test_store_clear() {
        let mut store = store_with(3, &["a", "b", "c"]);

        store.clear();

        assert!(store.is_empty());
        assert_eq!(store.footprint(), 0);
        assert!(store.keys_by_recency().is_empty());
        assert_eq!(store.stats().removals, 3);

        // Usable again after a clear
        store.put(b"d", b"4".to_vec()).unwrap();
        assert_eq!(store.get(b"d"), Some(b"4".to_vec()));
    }

    #[test]
    fn test_store_footprint() {
        let mut store = LruStore::new(2).unwrap();

        store.put(b"ab", vec![0; 10]).unwrap();
        store.put(b"cd", vec![0; 20]).unwrap();
        assert_eq!(store.footprint(), 34);

        store.put(b"ef", Vec::new()).unwrap();
        assert_eq!(store.footprint(), 24);
    }

    #[test]
    fn test_store_stats() {
        let mut store = LruStore::new(100).unwrap();

        store.put(b"key1", b"value1".to_vec()).unwrap();
        store.get(b"key1").unwrap();
        let _ = store.get(b"nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.entries, 1);
    }
}
