//! Integration Tests for the Cache
//!
//! Exercises the public API end to end: passive expiry under a key cap,
//! active expiry, and callers racing scheduled evictions.

use std::sync::Once;
use std::thread::{self, sleep};
use std::time::Duration;

use ttl_cache::{Cache, CacheConfig, CacheError, CacheStats, SizeOf, Ttl, TtlChange};

// == Helper Functions ==

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "ttl_cache=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

fn value(s: &str) -> String {
    s.to_string()
}

// == Passive Expiry Scenario ==

#[test]
fn test_passive_expiry_with_key_cap() {
    init_tracing();

    let cache: Cache<String> = Cache::new(
        CacheConfig::new()
            .with_default_ttl(Duration::from_millis(500))
            .with_max_keys(3)
            .with_delete_on_expire(false),
    );

    cache.set("k1", value("value1")).unwrap();
    cache
        .set_with_ttl("k2", value("value2"), Duration::from_millis(300))
        .unwrap();
    cache.set_with_ttl("k3", value("value3"), Ttl::NoExpiry).unwrap();
    assert_eq!(cache.set("k4", value("value4")), Err(CacheError::CacheFull));

    assert_eq!(cache.get("k1").unwrap(), "value1");
    assert_eq!(cache.get("k2").unwrap(), "value2");
    assert_eq!(cache.get("k3").unwrap(), "value3");
    assert_eq!(cache.get_and_delete("nonexistent"), Err(CacheError::KeyNotFound));

    let stats = cache.stats();
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.keys, 3);
    let key_size: usize = ["k1", "k2", "k3"].iter().map(|k| k.to_string().size_of()).sum();
    let value_size: usize = ["value1", "value2", "value3"]
        .iter()
        .map(|v| v.to_string().size_of())
        .sum();
    assert_eq!(stats.key_size, key_size as u64);
    assert_eq!(stats.value_size, value_size as u64);

    // k2 has expired, k1 has not
    sleep(Duration::from_millis(350));

    cache.clear_stats();
    let stats = cache.stats();
    assert_eq!(stats.hits, 0);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.keys, 0);
    assert_eq!(stats.key_size, 0);
    assert_eq!(stats.value_size, 0);

    assert_eq!(cache.get("k1").unwrap(), "value1");
    assert_eq!(cache.get("k2"), Err(CacheError::KeyNotFound));
    assert_eq!(cache.get("k3").unwrap(), "value3");

    // Now k1 has expired too
    sleep(Duration::from_millis(200));

    assert_eq!(cache.get("k1"), Err(CacheError::KeyNotFound));
    assert_eq!(cache.get("k2"), Err(CacheError::KeyNotFound));
    assert_eq!(cache.get("k3").unwrap(), "value3");

    assert_eq!(cache.get_ttl("k3"), Some(Duration::ZERO));
    assert!(cache.change_ttl("k3", Duration::from_millis(600)));

    // Expired entries stay in place and keep their slots
    assert_eq!(cache.keys(), vec!["k1", "k2", "k3"]);
    assert!(!cache.has("k1"));
    assert!(cache.has("k3"));
    assert_eq!(cache.set("k4", value("value4")), Err(CacheError::CacheFull));

    let stats = cache.stats();
    assert_eq!(stats.hits, 3);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.keys, 0);

    assert_eq!(cache.delete("nonexistent"), 0);
    assert_eq!(cache.delete("k3"), 1);
    assert!(!cache.has("k3"));

    cache.set("k4", value("value4")).unwrap();
    assert!(!cache.is_empty());

    cache.clear();
    assert!(cache.is_empty());
    assert!(cache.keys().is_empty());
    assert_eq!(cache.stats(), CacheStats::default());

    // Default TTL applies to plain sets
    cache.set("k5", value("value5")).unwrap();
    sleep(Duration::from_millis(550));
    assert_eq!(cache.get_and_delete("k5"), Err(CacheError::KeyNotFound));
    assert_eq!(cache.keys(), vec!["k5"]);
}

// == Active Expiry ==

#[test]
fn test_active_expiry_evicts_and_updates_ledger() {
    init_tracing();

    let cache: Cache<String> = Cache::new(CacheConfig::new().with_max_keys(2));

    cache
        .set_with_ttl("short", value("v"), Duration::from_millis(100))
        .unwrap();
    cache.set("long", value("v")).unwrap();
    assert_eq!(cache.set("third", value("v")), Err(CacheError::CacheFull));

    sleep(Duration::from_millis(200));

    assert_eq!(cache.keys(), vec!["long"]);
    assert_eq!(cache.stats().keys, 1);

    // The evicted slot is free again
    cache.set("third", value("v")).unwrap();
    assert_eq!(cache.keys(), vec!["long", "third"]);
}

#[test]
fn test_change_ttl_restarts_deadline() {
    init_tracing();

    let cache: Cache<String> = Cache::default();
    cache.set("k4", value("value4")).unwrap();
    assert!(cache.change_ttl("k4", Duration::from_millis(300)));

    sleep(Duration::from_millis(100));
    assert!(cache.change_ttl("k4", TtlChange::Expire(Duration::from_millis(500))));
    assert_eq!(cache.get_ttl("k4"), Some(Duration::from_millis(500)));

    sleep(Duration::from_millis(350));
    assert!(cache.has("k4"), "key must outlive the replaced 300ms deadline");

    sleep(Duration::from_millis(300));
    assert!(!cache.has("k4"));
}

// == Races Against Eviction ==

#[test]
fn test_set_racing_eviction_keeps_latest_value() {
    init_tracing();

    let cache: Cache<String> = Cache::default();
    let writers: Vec<_> = (0..4)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                for round in 0..50 {
                    let key = format!("key{}", round % 5);
                    cache
                        .set_with_ttl(key.clone(), format!("w{worker}-r{round}"), Duration::from_millis(5))
                        .unwrap();
                    if round % 7 == 0 {
                        cache.delete(&key);
                    }
                    sleep(Duration::from_millis(1));
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().unwrap();
    }

    // Pin one key forever; stale timers from earlier rounds must not remove it
    cache.set_with_ttl("key0", value("pinned"), Ttl::NoExpiry).unwrap();
    sleep(Duration::from_millis(100));

    assert_eq!(cache.keys(), vec!["key0"]);
    assert_eq!(cache.get("key0").unwrap(), "pinned");
    assert_eq!(cache.stats().keys, 1);
    assert_eq!(cache.stats().key_size, "key0".to_string().size_of() as u64);
}
