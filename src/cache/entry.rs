//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::sync::Arc;

// == Cache Entry ==
/// A single cached record: its key and the payload it owns.
///
/// The key allocation is shared with the keyed index (one `Arc`, two
/// handles), so both views point at the same bytes and the allocation is
/// released when the entry leaves both.
#[derive(Debug)]
pub struct Entry {
    /// Immutable identifier, unique within a cache
    pub key: Arc<[u8]>,
    /// Owned payload bytes
    pub value: Vec<u8>,
}

impl Entry {
    // == Constructor ==
    pub fn new(key: Arc<[u8]>, value: Vec<u8>) -> Self {
        Self { key, value }
    }

    // == Replace Value ==
    /// Swaps in a new payload, releasing the old one.
    pub fn replace_value(&mut self, value: Vec<u8>) {
        self.value = value;
    }

    /// Bytes held by this entry (key plus payload).
    pub fn footprint(&self) -> usize {
        self.key.len() + self.value.len()
    }
}
