//! Shared Cache Module
//!
//! Thread-safe handle around [`LruCache`] for callers that need one cache
//! across threads.

use std::borrow::Borrow;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::cache::{CacheStats, LruCache};
use crate::clock::{Clock, SystemClock};
use crate::error::Result;

// == Shared Cache ==
/// Cloneable handle to a cache guarded by a single mutex.
///
/// Every operation holds the lock for its whole duration, so the index
/// and the recency list are never observed half-updated.
#[derive(Debug)]
pub struct SharedCache<K, V, C = SystemClock> {
    inner: Arc<Mutex<LruCache<K, V, C>>>,
}

impl<K, V, C> Clone for SharedCache<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    /// Creates a shared cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self::from_cache(LruCache::new(capacity)?))
    }
}

impl<K, V, C> SharedCache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Wraps an existing cache.
    pub fn from_cache(cache: LruCache<K, V, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    // Poison is ignored: the engine only panics between its list and index
    // updates if a key's `Hash` or `Eq` implementation panics, which keys
    // stored here must not do.
    fn lock(&self) -> MutexGuard<'_, LruCache<K, V, C>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// See [`LruCache::set`].
    pub fn set(&self, key: K, value: V, ttl: Option<Duration>) -> Option<(K, V)> {
        self.lock().set(key, value, ttl)
    }

    /// See [`LruCache::set_with_default_ttl`].
    pub fn set_with_default_ttl(&self, key: K, value: V) -> Option<(K, V)> {
        self.lock().set_with_default_ttl(key, value)
    }

    /// See [`LruCache::get`]. Returns a clone of the value.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.lock().get(key).cloned()
    }

    /// See [`LruCache::delete`].
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().delete(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lock().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    /// Runs `f` with exclusive access to the cache, for multi-step updates
    /// that must appear atomic.
    pub fn with<R>(&self, f: impl FnOnce(&mut LruCache<K, V, C>) -> R) -> R {
        f(&mut *self.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::thread;

    #[test]
    fn test_shared_basic_operations() {
        let cache: SharedCache<String, u32> = SharedCache::new(2).unwrap();

        cache.set("a".to_string(), 1, None);
        assert_eq!(cache.get("a"), Some(1));
        assert!(cache.contains_key("a"));
        assert!(cache.delete("a"));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_clones_see_same_cache() {
        let cache: SharedCache<String, u32> = SharedCache::new(2).unwrap();
        let other = cache.clone();

        other.set("a".to_string(), 1, None);

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_shared_default_ttl() {
        let clock = ManualClock::new();
        let inner = LruCache::with_clock(2, clock.clone())
            .unwrap()
            .with_default_ttl(Some(Duration::from_secs(1)));
        let cache: SharedCache<String, u32, ManualClock> = SharedCache::from_cache(inner);

        cache.set_with_default_ttl("short".to_string(), 1);
        cache.set("forever".to_string(), 2, None);
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.get("forever"), Some(2));
    }

    #[test]
    fn test_shared_usable_after_panic_in_closure() {
        let cache: SharedCache<String, u32> = SharedCache::new(2).unwrap();
        cache.set("a".to_string(), 1, None);

        let poisoner = cache.clone();
        let result = thread::spawn(move || {
            poisoner.with(|inner| {
                inner.set("b".to_string(), 2, None);
                panic!("closure failed");
            })
        })
        .join();
        assert!(result.is_err());

        assert_eq!(cache.get("a"), Some(1));
        assert_eq!(cache.get("b"), Some(2));
        cache.with(|inner| inner.assert_consistent());
    }

    #[test]
    fn test_shared_concurrent_writers_respect_capacity() {
        let cache: SharedCache<String, usize> = SharedCache::new(16).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        cache.set(format!("{t}-{i}"), i, None);
                        cache.get(&format!("{t}-{}", i / 2));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.len(), 16);
        cache.with(|inner| inner.assert_consistent());
        assert_eq!(cache.stats().evictions, 400 - 16);
    }

    #[test]
    fn test_shared_with_is_atomic() {
        let cache: SharedCache<String, u32> = SharedCache::new(4).unwrap();
        cache.set("counter".to_string(), 0, None);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        cache.with(|inner| {
                            let next = inner.get("counter").copied().unwrap_or(0) + 1;
                            inner.set("counter".to_string(), next, None);
                        });
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cache.get("counter"), Some(400));
    }
}
