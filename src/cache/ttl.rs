//! TTL Arguments Module
//!
//! Explicit choices for the TTL passed to set and change operations.

use std::time::Duration;

// == Ttl ==
/// TTL requested when storing an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ttl {
    /// Use the cache's configured default TTL
    #[default]
    UseDefault,
    /// The entry never expires
    NoExpiry,
    /// The entry expires after the given duration
    For(Duration),
}

impl Ttl {
    /// Maps a signed millisecond count: negative uses the default, zero never
    /// expires, anything else is a literal lifetime.
    pub fn from_millis(millis: i64) -> Self {
        match u64::try_from(millis) {
            Err(_) => Ttl::UseDefault,
            Ok(0) => Ttl::NoExpiry,
            Ok(ms) => Ttl::For(Duration::from_millis(ms)),
        }
    }

    // == Resolve ==
    /// Resolves to a concrete lifetime, `Duration::ZERO` meaning no expiry.
    pub fn resolve(self, default_ttl: Duration) -> Duration {
        match self {
            Ttl::UseDefault => default_ttl,
            Ttl::NoExpiry => Duration::ZERO,
            Ttl::For(ttl) => ttl,
        }
    }
}

impl From<Duration> for Ttl {
    fn from(ttl: Duration) -> Self {
        if ttl.is_zero() {
            Ttl::NoExpiry
        } else {
            Ttl::For(ttl)
        }
    }
}

// == Ttl Change ==
/// New TTL for an existing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TtlChange {
    /// Delete the entry immediately
    Remove,
    /// Clear the expiry so the entry never expires
    Persist,
    /// Expire the entry after the given duration, counted from now
    Expire(Duration),
}

impl TtlChange {
    /// Maps a signed millisecond count: negative removes, zero persists,
    /// anything else is a literal lifetime.
    pub fn from_millis(millis: i64) -> Self {
        match u64::try_from(millis) {
            Err(_) => TtlChange::Remove,
            Ok(0) => TtlChange::Persist,
            Ok(ms) => TtlChange::Expire(Duration::from_millis(ms)),
        }
    }
}

impl From<Duration> for TtlChange {
    fn from(ttl: Duration) -> Self {
        if ttl.is_zero() {
            TtlChange::Persist
        } else {
            TtlChange::Expire(ttl)
        }
    }
}
