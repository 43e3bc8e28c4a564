//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// Both variants are expected outcomes; callers branch on them and decide
/// whether to retry, evict manually or grow capacity.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// Key is absent or its TTL has elapsed
    #[error("key not found")]
    KeyNotFound,

    /// Inserting a new key would exceed the configured maximum
    #[error("the cache is full")]
    CacheFull,
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
