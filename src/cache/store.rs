//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration, the key cap
//! and the statistics ledger.
//!
//! The store itself is not synchronised; [`Cache`](crate::Cache) wraps it in a
//! single `RwLock` and every method here runs under that lock.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, Ttl, TtlChange};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::Evictor;

// == Cache Store ==
/// Key-value storage with TTL support, a key cap and statistics.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Hit/miss and size ledger
    stats: CacheStats,
    /// Immutable configuration
    config: CacheConfig,
    /// Arms timer evictions for TTL-bearing entries
    evictor: Evictor<V>,
}

impl<V> CacheStore<V>
where
    V: Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty store.
    pub fn new(config: CacheConfig, evictor: Evictor<V>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            config,
            evictor,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any existing entry.
    ///
    /// Sizes are measured by the caller so the size oracle never runs under the
    /// lock. Only new keys are subject to the key cap.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: V,
        key_size: usize,
        value_size: usize,
        ttl: Ttl,
    ) -> Result<()> {
        let key = key.into();
        let ttl = ttl.resolve(self.config.default_ttl);
        let arm = self.config.delete_on_expire && !ttl.is_zero();

        match self.entries.get_mut(&key) {
            Some(existing) => {
                let mut entry = CacheEntry::new(value, existing.key_size, value_size, ttl);
                if arm {
                    entry.set_eviction(self.evictor.arm(&key, ttl));
                }

                existing.cancel_eviction();
                self.stats.record_overwrite(existing.value_size, value_size);
                *existing = entry;
            }
            None => {
                if let Some(max_keys) = self.config.max_keys {
                    if self.entries.len() >= max_keys {
                        warn!(key = %key, max_keys, "Rejected insert, cache is full");
                        return Err(CacheError::CacheFull);
                    }
                }

                let mut entry = CacheEntry::new(value, key_size, value_size, ttl);
                if arm {
                    entry.set_eviction(self.evictor.arm(&key, ttl));
                }
                self.stats.record_insert(key_size, value_size);
                self.entries.insert(key, entry);
            }
        }

        Ok(())
    }

    // == Get ==
    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Expired entries count as misses but are never removed here.
    pub fn get(&mut self, key: &str) -> Result<V>
    where
        V: Clone,
    {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                self.stats.record_hit();
                Ok(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                Err(CacheError::KeyNotFound)
            }
        }
    }

    // == Get And Delete ==
    /// Removes a live entry and returns its value, counted as a single hit.
    pub fn get_and_delete(&mut self, key: &str) -> Result<V> {
        let live = self.entries.get(key).is_some_and(|entry| !entry.is_expired());

        match live.then(|| self.remove(key)).flatten() {
            Some(value) => {
                self.stats.record_hit();
                Ok(value)
            }
            None => {
                self.stats.record_miss();
                Err(CacheError::KeyNotFound)
            }
        }
    }

    // == Delete ==
    /// Removes `key` if present, expired or not. Returns true if an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove(key).is_some()
    }

    // == Change TTL ==
    /// Replaces the TTL of a live entry; returns false if the key is absent or expired.
    pub fn change_ttl(&mut self, key: &str, change: TtlChange) -> bool {
        if !self.has(key) {
            return false;
        }

        let ttl = match change {
            TtlChange::Remove => {
                self.remove(key);
                return true;
            }
            TtlChange::Persist => Duration::ZERO,
            TtlChange::Expire(ttl) => ttl,
        };

        if let Some(entry) = self.entries.get_mut(key) {
            entry.set_ttl(ttl);
            if self.config.delete_on_expire && !ttl.is_zero() {
                entry.set_eviction(self.evictor.arm(key, ttl));
            }
        }

        true
    }

    // == Get TTL ==
    /// Returns the stored TTL of a live entry, `Duration::ZERO` if it never expires.
    pub fn get_ttl(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(CacheEntry::ttl)
    }

    // == Has ==
    /// Returns true if `key` is present and not expired.
    pub fn has(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired())
    }

    // == Keys ==
    /// Returns every stored key in lexicographic order, expired ones included.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    // == Clear ==
    /// Cancels all evictions, drops every entry and zeroes the statistics.
    pub fn clear(&mut self) {
        for entry in self.entries.values_mut() {
            entry.cancel_eviction();
        }

        let removed = self.entries.len();
        self.entries.clear();
        self.stats.reset();

        debug!(removed, "Cache cleared");
    }

    // == Clear Stats ==
    /// Zeroes the statistics, leaving entries untouched.
    pub fn clear_stats(&mut self) {
        self.stats.reset();
    }

    // == Stats ==
    /// Returns a snapshot of the current statistics.
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    // == Evict If Armed ==
    /// Removes `key` if its entry still carries the eviction `token`.
    ///
    /// Called by eviction tasks; a stale token means the entry was replaced,
    /// deleted or re-timed after the task was armed.
    pub fn evict_if_armed(&mut self, key: &str, token: u64) -> bool {
        let armed = self
            .entries
            .get(key)
            .is_some_and(|entry| entry.is_armed_with(token));

        armed && self.remove(key).is_some()
    }

    // == Length ==
    /// Returns the number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the configuration the store was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let mut entry = self.entries.remove(key)?;
        entry.cancel_eviction();
        self.stats.record_removal(entry.key_size, entry.value_size);
        Some(entry.value)
    }
}
