//! Background Tasks Module
//!
//! Timer-driven work that runs alongside cache callers.
//!
//! # Tasks
//! - Scheduled eviction: removes an entry once its TTL elapses
//! - Timer runtime: the shared tokio runtime those timers run on

mod eviction;
mod runtime;

pub(crate) use eviction::{EvictionHandle, Evictor};
pub(crate) use runtime::shared_timer_handle;
