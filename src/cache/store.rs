//! Cache Store Module
//!
//! Main cache engine combining HashMap lookup with the recency list and
//! lazy TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::{CacheStats, Entry, RecencyList};
use crate::clock::{Clock, SystemClock};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == LRU Cache ==
/// Bounded key-value cache with LRU eviction and lazy TTL expiration.
///
/// The index maps each key to the slot of its entry in the recency list;
/// both structures are updated together by every operation.
///
/// Expired entries are never purged in the background. A read of an
/// expired entry reports it absent but leaves it in place, where it keeps
/// occupying capacity until overwritten, deleted, or evicted.
#[derive(Debug)]
pub struct LruCache<K, V, C = SystemClock> {
    /// Key to list slot
    index: HashMap<K, usize>,
    /// Entries in recency order
    list: RecencyList<K, V>,
    /// Maximum number of entries allowed
    capacity: usize,
    /// TTL applied by `set_with_default_ttl`
    default_ttl: Option<Duration>,
    /// Performance statistics
    stats: CacheStats,
    clock: C,
}

impl<K, V> LruCache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates a new cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, SystemClock)
    }

    /// Creates a cache from a validated [`CacheConfig`].
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.capacity)?.with_default_ttl(config.default_ttl()))
    }
}

impl<K, V, C> LruCache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Creates a new cache reading time from `clock`.
    ///
    /// # Errors
    /// Returns [`CacheError::InvalidCapacity`] if `capacity` is zero.
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::with_capacity(capacity + 1),
            list: RecencyList::with_capacity(capacity + 1),
            capacity,
            default_ttl: None,
            stats: CacheStats::new(),
            clock,
        })
    }

    /// Sets the TTL applied by [`LruCache::set_with_default_ttl`].
    pub fn with_default_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.default_ttl = ttl;
        self
    }

    // == Set ==
    /// Stores a key-value pair as the most recently used entry.
    ///
    /// An existing entry for `key` is discarded first, TTL included. If the
    /// insertion pushes the cache over capacity, the least recently used
    /// entry is evicted regardless of its expiration state.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL, None = never expires
    ///
    /// # Returns
    /// The evicted key-value pair, if an eviction happened.
    pub fn set(&mut self, key: K, value: V, ttl: Option<Duration>) -> Option<(K, V)> {
        if let Some(slot) = self.index.remove(&key) {
            self.list.remove(slot);
            trace!("Replacing existing entry");
        }

        let entry = Entry::new(key.clone(), value, ttl, self.clock.now());
        let slot = self.list.insert_front(entry);
        self.index.insert(key, slot);
        trace!(len = self.index.len(), ?ttl, "Entry stored");

        self.shrink()
    }

    // == Set With Default TTL ==
    /// Stores a key-value pair using the cache's default TTL.
    ///
    /// Behaves like [`LruCache::set`] with the TTL configured through
    /// [`LruCache::with_default_ttl`]; without one the entry never expires.
    pub fn set_with_default_ttl(&mut self, key: K, value: V) -> Option<(K, V)> {
        self.set(key, value, self.default_ttl)
    }

    // == Shrink ==
    /// Evicts the least recently used entry if the cache is over capacity.
    fn shrink(&mut self) -> Option<(K, V)> {
        if self.index.len() <= self.capacity {
            return None;
        }

        let evicted = self.list.pop_back()?;
        self.index.remove(&evicted.key);
        self.stats.record_eviction();
        debug!(
            capacity = self.capacity,
            was_expired = evicted.is_expired(self.clock.now()),
            "Evicted least recently used entry"
        );
        Some((evicted.key, evicted.value))
    }

    // == Get ==
    /// Retrieves a value by key, promoting it to most recently used.
    ///
    /// Returns None if the key is unknown or its entry has expired. Expired
    /// entries are left where they are.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(&slot) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let now = self.clock.now();
        if self.list.get(slot).map_or(true, |entry| entry.is_expired(now)) {
            self.stats.record_expired();
            debug!("Read of expired entry, left in place");
            return None;
        }

        self.list.move_to_front(slot);
        self.stats.record_hit();
        self.list.get(slot).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Retrieves a live value without changing recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.live_entry(key).map(|entry| &entry.value)
    }

    /// Checks whether a live, unexpired entry exists for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.live_entry(key).is_some()
    }

    // == TTL ==
    /// Returns the remaining TTL of an entry.
    ///
    /// # Returns
    /// - `None` if the key is unknown or has no TTL
    /// - `Some(Duration::ZERO)` if the entry has expired but is still held
    /// - `Some(remaining)` otherwise
    pub fn ttl<Q>(&self, key: &Q) -> Option<Duration>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        self.list.get(slot)?.ttl_remaining(self.clock.now())
    }

    fn live_entry<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let slot = *self.index.get(key)?;
        let entry = self.list.get(slot)?;
        (!entry.is_expired(self.clock.now())).then_some(entry)
    }

    // == Delete ==
    /// Removes an entry by key, expired or not.
    ///
    /// Returns true if an entry was removed, false if the key was absent.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.remove(key) {
            Some(slot) => {
                self.list.remove(slot);
                trace!(len = self.index.len(), "Entry deleted");
                true
            }
            None => false,
        }
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }
}

impl<K, V, C> LruCache<K, V, C> {
    // == Keys ==
    /// Iterates keys from most to least recently used, expired ones included.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.list.iter().map(|entry| &entry.key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Capacity ==
    /// Returns the maximum number of entries the cache holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Length ==
    /// Returns the number of entries held, expired ones included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
impl<K, V, C> LruCache<K, V, C>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
{
    /// Panics unless the index and the list describe the same entries.
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.list.len(), "index/list size mismatch");
        assert!(self.index.len() <= self.capacity, "over capacity");
        for entry in self.list.iter() {
            let slot = self.index.get(&entry.key).copied();
            assert!(slot.is_some(), "listed key {:?} missing from index", entry.key);
            let indexed = slot.and_then(|slot| self.list.get(slot)).map(|e| &e.key);
            assert_eq!(indexed, Some(&entry.key), "index points at wrong slot");
        }
    }
}
