//! Cache Statistics Module
//!
//! Tracks lookup hits and misses plus the key count and byte footprint of stored entries.

use serde::Serialize;

// == Cache Stats ==
/// Cache performance and storage metrics.
///
/// Snapshots handed out by [`Cache::stats`](crate::Cache::stats) are copies;
/// mutating one never touches the live ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of keys currently accounted for
    pub keys: u64,
    /// Total estimated size of stored keys in bytes
    pub key_size: u64,
    /// Total estimated size of stored values in bytes
    pub value_size: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Insert ==
    /// Accounts for a newly inserted key.
    pub fn record_insert(&mut self, key_size: usize, value_size: usize) {
        self.keys += 1;
        self.key_size += key_size as u64;
        self.value_size += value_size as u64;
    }

    // == Record Removal ==
    /// Retracts a removed key.
    ///
    /// Saturates at zero, since the ledger may have been reset while entries
    /// were still stored.
    pub fn record_removal(&mut self, key_size: usize, value_size: usize) {
        self.keys = self.keys.saturating_sub(1);
        self.key_size = self.key_size.saturating_sub(key_size as u64);
        self.value_size = self.value_size.saturating_sub(value_size as u64);
    }

    // == Record Overwrite ==
    /// Swaps the value size of an existing key; key count and key size are unchanged.
    pub fn record_overwrite(&mut self, old_value_size: usize, new_value_size: usize) {
        self.value_size = self
            .value_size
            .saturating_sub(old_value_size as u64)
            .saturating_add(new_value_size as u64);
    }

    // == Reset ==
    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = CacheStats::new();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
        assert_eq!(stats.keys, 0);
        assert_eq!(stats.key_size, 0);
        assert_eq!(stats.value_size, 0);
    }

    #[test]
    fn test_hit_rate_no_requests() {
        let stats = CacheStats::new();
        assert_eq!(stats.hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_insert_and_removal() {
        let mut stats = CacheStats::new();
        stats.record_insert(26, 30);
        stats.record_insert(26, 34);
        assert_eq!(stats.keys, 2);
        assert_eq!(stats.key_size, 52);
        assert_eq!(stats.value_size, 64);

        stats.record_removal(26, 30);
        assert_eq!(stats.keys, 1);
        assert_eq!(stats.key_size, 26);
        assert_eq!(stats.value_size, 34);
    }

    #[test]
    fn test_overwrite_only_touches_value_size() {
        let mut stats = CacheStats::new();
        stats.record_insert(10, 20);
        stats.record_overwrite(20, 5);

        assert_eq!(stats.keys, 1);
        assert_eq!(stats.key_size, 10);
        assert_eq!(stats.value_size, 5);
    }

    #[test]
    fn test_removal_after_reset_saturates() {
        let mut stats = CacheStats::new();
        stats.record_insert(10, 20);
        stats.reset();
        stats.record_removal(10, 20);

        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_stats_serialize() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_insert(3, 4);

        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["hits"], 1);
        assert_eq!(json["misses"], 0);
        assert_eq!(json["keys"], 1);
        assert_eq!(json["key_size"], 3);
        assert_eq!(json["value_size"], 4);
    }
}
