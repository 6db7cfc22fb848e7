//! Cache Module
//!
//! Bounded in-memory caching with LRU eviction, safe under concurrent access.

mod bounded;
mod entry;
mod recency;
mod stats;
mod store;


// Re-export public types
pub use bounded::BoundedCache;
pub use entry::Entry;
pub use recency::{Handle, RecencyList};
pub use stats::CacheStats;
pub use store::LruStore;
