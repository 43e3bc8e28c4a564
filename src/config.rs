//! Configuration Module
//!
//! Cache configuration record, with loading from environment variables.

use std::env;
use std::time::Duration;

use serde::Deserialize;

/// Cache configuration parameters.
///
/// Immutable once handed to [`Cache::new`](crate::Cache::new).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// TTL applied when a set does not supply its own; zero means never expire
    pub default_ttl: Duration,
    /// Evict expired entries with a timer instead of only flagging them
    pub delete_on_expire: bool,
    /// Maximum number of distinct keys, None = unlimited
    pub max_keys: Option<usize>,
}

impl CacheConfig {
    /// Creates a config with the defaults: no expiry, delete on expire, unlimited keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the default TTL.
    pub fn with_default_ttl(mut self, default_ttl: Duration) -> Self {
        self.default_ttl = default_ttl;
        self
    }

    /// Sets whether expired entries are evicted by timer.
    pub fn with_delete_on_expire(mut self, delete_on_expire: bool) -> Self {
        self.delete_on_expire = delete_on_expire;
        self
    }

    /// Sets the key cap from a signed count; any negative value means unlimited.
    pub fn with_max_keys(mut self, max_keys: i64) -> Self {
        self.max_keys = usize::try_from(max_keys).ok();
        self
    }

    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 0, never expire)
    /// - `CACHE_DELETE_ON_EXPIRE` - `true`/`false`/`1`/`0` (default: true)
    /// - `CACHE_MAX_KEYS` - Maximum keys, negative for unlimited (default: unlimited)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_ttl = lookup("CACHE_DEFAULT_TTL_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.default_ttl);

        let delete_on_expire = lookup("CACHE_DELETE_ON_EXPIRE")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.delete_on_expire);

        let max_keys = match lookup("CACHE_MAX_KEYS").and_then(|v| v.trim().parse::<i64>().ok()) {
            Some(n) => usize::try_from(n).ok(),
            None => defaults.max_keys,
        };

        Self {
            default_ttl,
            delete_on_expire,
            max_keys,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::ZERO,
            delete_on_expire: true,
            max_keys: None,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
