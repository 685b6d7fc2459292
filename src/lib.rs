//! lru_ttl - A bounded in-process key-value cache
//!
//! Keeps at most `capacity` entries, evicting the least recently used one
//! on overflow. Entries may carry a TTL; expiration is checked lazily on
//! read and expired entries stay in place until overwritten, deleted, or
//! evicted.
//!
//! # Example
//! ```
//! use lru_ttl::LruCache;
//!
//! let mut cache = LruCache::new(3).unwrap();
//! cache.set("a", 1, None);
//! cache.set("b", 2, None);
//! cache.set("c", 3, None);
//! cache.set("d", 4, None); // evicts "a"
//!
//! assert_eq!(cache.get("a"), None);
//! assert_eq!(cache.get("b"), Some(&2));
//! ```

pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod shared;

pub use cache::{CacheStats, LruCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use shared::SharedCache;
