//! Timer Runtime
//!
//! Process-wide tokio runtime that drives eviction timers for caches created
//! without an explicit runtime handle.

use std::sync::OnceLock;

use tokio::runtime::{Builder, Handle, Runtime};
use tracing::info;

static TIMER_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Name of the worker thread backing the shared timer runtime.
pub(crate) const TIMER_THREAD_NAME: &str = "ttl-cache-timer";

/// Returns a handle to the shared timer runtime, starting it on first use.
///
/// The runtime owns a single worker thread and lives for the rest of the
/// process.
///
/// # Panics
/// Panics if the worker thread cannot be spawned, as `std::thread::spawn` does.
pub(crate) fn shared_timer_handle() -> Handle {
    TIMER_RUNTIME
        .get_or_init(|| {
            info!("Starting shared cache timer runtime");
            Builder::new_multi_thread()
                .worker_threads(1)
                .thread_name(TIMER_THREAD_NAME)
                .enable_time()
                .build()
                .expect("failed to start cache timer runtime")
        })
        .handle()
        .clone()
}
