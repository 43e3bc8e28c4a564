//! TTL Cache - a thread-safe in-process key-value store
//!
//! Provides per-entry TTL expiration with optional timer eviction, a key cap
//! and hit/miss/size statistics.

mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{Cache, CacheStats, SizeOf, Ttl, TtlChange};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
