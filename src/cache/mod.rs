//! Cache Module
//!
//! Provides the in-memory store with TTL expiration, timer eviction and statistics.

mod entry;
mod shared;
mod size;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub(crate) use entry::CacheEntry;
pub use shared::Cache;
pub use size::SizeOf;
pub use stats::CacheStats;
pub(crate) use store::CacheStore;
pub use ttl::{Ttl, TtlChange};
