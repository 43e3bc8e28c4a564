//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::tasks::EvictionHandle;

// == Cache Entry ==
/// A single stored value with its measured sizes and expiry metadata.
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Estimated key size in bytes, measured once at insertion
    pub key_size: usize,
    /// Estimated value size in bytes, measured once at insertion
    pub value_size: usize,
    /// Lifetime, zero = no expiration
    ttl: Duration,
    /// Expiration instant, None = no expiration or beyond what `Instant` can represent
    expires_at: Option<Instant>,
    /// Pending timer eviction, if any
    eviction: Option<EvictionHandle>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry expiring `ttl` from now (zero = never).
    pub fn new(value: V, key_size: usize, value_size: usize, ttl: Duration) -> Self {
        Self {
            value,
            key_size,
            value_size,
            ttl,
            expires_at: expiry_from_now(ttl),
            eviction: None,
        }
    }

    /// Returns the configured lifetime (zero = no expiration).
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the expiration instant, if any.
    #[cfg(test)]
    pub fn expires_at(&self) -> Option<Instant> {
        self.expires_at
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a given instant.
    ///
    /// An entry is expired strictly after its expiration instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now > expires,
            None => false,
        }
    }

    // == Set TTL ==
    /// Restarts the lifetime from now with a new TTL (zero = never expire).
    ///
    /// Any pending eviction is cancelled.
    pub fn set_ttl(&mut self, ttl: Duration) {
        self.cancel_eviction();
        self.ttl = ttl;
        self.expires_at = expiry_from_now(ttl);
    }

    // == Eviction Handle ==
    /// Attaches a pending eviction, cancelling any previous one.
    pub fn set_eviction(&mut self, handle: EvictionHandle) {
        self.cancel_eviction();
        self.eviction = Some(handle);
    }

    /// Returns true if a timer eviction is armed for this entry.
    #[cfg(test)]
    pub fn has_eviction(&self) -> bool {
        self.eviction.is_some()
    }

    /// Returns true if `token` identifies the eviction currently armed for this entry.
    pub fn is_armed_with(&self, token: u64) -> bool {
        self.eviction
            .as_ref()
            .is_some_and(|handle| handle.token() == token)
    }

    /// Cancels the pending eviction, if any.
    pub fn cancel_eviction(&mut self) {
        if let Some(handle) = self.eviction.take() {
            handle.cancel();
        }
    }
}

/// Deadline `ttl` from now. A TTL past the clock's range never expires in practice.
fn expiry_from_now(ttl: Duration) -> Option<Instant> {
    if ttl.is_zero() {
        None
    } else {
        Instant::now().checked_add(ttl)
    }
}
