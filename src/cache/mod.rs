//! Cache Module
//!
//! Provides the bounded in-memory cache with LRU eviction and lazy TTL
//! expiration.

mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::Entry;
pub use lru::{Iter, RecencyList};
pub use stats::CacheStats;
pub use store::LruCache;
