//! Shared Cache Handle
//!
//! Thread-safe handle over the cache store, the public entry point of the crate.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tracing::debug;

use crate::cache::{CacheStats, CacheStore, SizeOf, Ttl, TtlChange};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::{shared_timer_handle, Evictor};

// == Cache ==
/// Thread-safe key-value cache with per-entry TTL.
///
/// Cloning is cheap and every clone shares the same store. All operations
/// serialise on one `RwLock`; eviction timers contend for it like any other
/// caller. Dropping the last clone cancels every pending eviction.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_cache::{Cache, CacheConfig, CacheError};
///
/// let cache: Cache<String> = Cache::new(CacheConfig::new().with_max_keys(2));
///
/// cache.set("k1", "value1".to_string()).unwrap();
/// cache.set_with_ttl("k2", "value2".to_string(), Duration::from_secs(60)).unwrap();
///
/// assert_eq!(cache.get("k1").unwrap(), "value1");
/// assert_eq!(cache.set("k3", "value3".to_string()), Err(CacheError::CacheFull));
/// assert_eq!(cache.keys(), vec!["k1", "k2"]);
/// ```
#[derive(Debug)]
pub struct Cache<V> {
    store: Arc<RwLock<CacheStore<V>>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<V> Cache<V>
where
    V: Send + Sync + 'static,
{
    // == Constructors ==
    /// Creates a cache whose eviction timers run on the shared timer runtime.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_runtime(config, shared_timer_handle())
    }

    /// Creates a cache whose eviction timers run on the given tokio runtime.
    ///
    /// The runtime must outlive the cache. Once it shuts down no further
    /// evictions are scheduled and expired entries keep their slots until
    /// deleted.
    pub fn with_runtime(config: CacheConfig, runtime: Handle) -> Self {
        debug!(
            default_ttl_ms = config.default_ttl.as_millis() as u64,
            delete_on_expire = config.delete_on_expire,
            max_keys = ?config.max_keys,
            "Creating cache"
        );

        let store = Arc::new_cyclic(|weak| {
            RwLock::new(CacheStore::new(config, Evictor::new(weak.clone(), runtime)))
        });

        Self { store }
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL.
    ///
    /// Fails with `CacheFull` only when `key` is new and the key cap is reached.
    pub fn set(&self, key: impl Into<String>, value: V) -> Result<()>
    where
        V: SizeOf,
    {
        self.set_with_ttl(key, value, Ttl::UseDefault)
    }

    /// Stores `value` under `key` with an explicit TTL.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: V, ttl: impl Into<Ttl>) -> Result<()>
    where
        V: SizeOf,
    {
        let key = key.into();
        let key_size = key.size_of();
        let value_size = value.size_of();

        self.store
            .write()
            .set(key, value, key_size, value_size, ttl.into())
    }

    // == Get ==
    /// Returns a clone of the live value under `key`.
    ///
    /// Absent and expired keys fail with `KeyNotFound` and count as misses.
    pub fn get(&self, key: &str) -> Result<V>
    where
        V: Clone,
    {
        self.store.write().get(key)
    }

    /// Removes the live entry under `key` and returns its value.
    pub fn get_and_delete(&self, key: &str) -> Result<V> {
        self.store.write().get_and_delete(key)
    }

    // == Delete ==
    /// Removes `key`; returns 1 if an entry was removed, 0 otherwise.
    pub fn delete(&self, key: &str) -> usize {
        usize::from(self.store.write().delete(key))
    }

    /// Removes each of `keys` under one lock and returns how many were removed.
    pub fn delete_many<I, K>(&self, keys: I) -> usize
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let mut keys = keys.into_iter().peekable();
        if keys.peek().is_none() {
            return 0;
        }

        let mut store = self.store.write();
        keys.filter(|key| store.delete(key.as_ref())).count()
    }

    // == TTL ==
    /// Changes the TTL of a live entry; returns false if it is absent or expired.
    pub fn change_ttl(&self, key: &str, change: impl Into<TtlChange>) -> bool {
        self.store.write().change_ttl(key, change.into())
    }

    /// Returns the stored TTL of a live entry.
    ///
    /// `None` if absent or expired, `Some(Duration::ZERO)` if it never expires.
    pub fn get_ttl(&self, key: &str) -> Option<Duration> {
        self.store.read().get_ttl(key)
    }

    // == Queries ==
    /// Returns true if `key` is present and not expired. Does not touch statistics.
    pub fn has(&self, key: &str) -> bool {
        self.store.read().has(key)
    }

    /// Returns all stored keys in lexicographic order, including expired keys
    /// that have not been evicted.
    pub fn keys(&self) -> Vec<String> {
        self.store.read().keys()
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Returns true if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Returns the configuration this cache was built with.
    pub fn config(&self) -> CacheConfig {
        self.store.read().config().clone()
    }

    // == Stats ==
    /// Returns a snapshot of the statistics.
    pub fn stats(&self) -> CacheStats {
        self.store.read().stats()
    }

    /// Zeroes the statistics without touching entries.
    pub fn clear_stats(&self) {
        self.store.write().clear_stats();
    }

    // == Clear ==
    /// Removes every entry, cancels every eviction and zeroes the statistics.
    pub fn clear(&self) {
        self.store.write().clear();
    }
}

impl<V> Default for Cache<V>
where
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
