//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

/// Link value marking the absence of a neighbour.
pub(crate) const NIL: usize = usize::MAX;

// == Cache Entry ==
/// A single cached key/value pair with its expiry and list links.
///
/// Entries live in the recency list arena; `prev` and `next` are slot
/// indices of the neighbouring entries, [`NIL`] at either end.
#[derive(Debug, Clone)]
pub struct Entry<K, V> {
    /// Lookup key
    pub key: K,
    /// The stored value
    pub value: V,
    /// Expiration instant, None = no expiration
    pub expire_at: Option<Instant>,
    pub(crate) prev: usize,
    pub(crate) next: usize,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry expiring `ttl` after `now`.
    ///
    /// # Arguments
    /// * `key` - The lookup key
    /// * `value` - The value to store
    /// * `ttl` - Optional time to live, None = never expires
    /// * `now` - The instant the TTL is measured from
    pub fn new(key: K, value: V, ttl: Option<Duration>, now: Instant) -> Self {
        Self {
            key,
            value,
            expire_at: ttl.and_then(|ttl| now.checked_add(ttl)),
            prev: NIL,
            next: NIL,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired only once `now` is strictly past its expiration
    /// instant. Entries without a TTL never expire.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expire_at {
            Some(expire_at) => now > expire_at,
            None => false,
        }
    }

    // == Time To Live ==
    /// Returns the remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` once the TTL has elapsed
    /// - `Some(remaining)` if the TTL hasn't elapsed
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self, now: Instant) -> Option<Duration> {
        self.expire_at
            .map(|expire_at| expire_at.saturating_duration_since(now))
    }
}
