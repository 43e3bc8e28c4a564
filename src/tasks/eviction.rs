//! Scheduled Eviction Task
//!
//! One-shot timer tasks that remove an entry once its TTL has elapsed.
//!
//! Each task behaves like any other caller: after sleeping it takes the store's
//! write lock and removes the key only if the entry still carries the token the
//! task was armed with. A set, delete or TTL change that wins the lock first
//! leaves the task with nothing to do.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::cache::CacheStore;

// == Eviction Handle ==
/// Ownership of one pending eviction task.
///
/// Cancelling or dropping the handle aborts the task.
#[derive(Debug)]
pub struct EvictionHandle {
    token: u64,
    task: JoinHandle<()>,
}

impl EvictionHandle {
    /// Returns the token the task will present to the store when it fires.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Aborts the pending task.
    pub fn cancel(self) {
        self.task.abort();
    }

    /// Returns true once the task has run to completion or been aborted.
    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for EvictionHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// == Evictor ==
/// Arms eviction tasks for one store on a tokio runtime.
#[derive(Debug)]
pub struct Evictor<V> {
    store: Weak<RwLock<CacheStore<V>>>,
    runtime: Handle,
    next_token: u64,
}

impl<V> Evictor<V>
where
    V: Send + Sync + 'static,
{
    /// Creates an evictor for the store behind `store`, spawning on `runtime`.
    pub fn new(store: Weak<RwLock<CacheStore<V>>>, runtime: Handle) -> Self {
        Self {
            store,
            runtime,
            next_token: 0,
        }
    }

    /// Creates an evictor bound to no store; its tasks fire as no-ops.
    pub fn detached(runtime: Handle) -> Self {
        Self::new(Weak::new(), runtime)
    }

    // == Arm ==
    /// Spawns a task that evicts `key` after `ttl`.
    ///
    /// Called with the store's write lock held; spawning does not block.
    ///
    /// A runtime that has already shut down drops the task unrun. That is
    /// logged, and the entry then only expires lazily.
    pub fn arm(&mut self, key: &str, ttl: Duration) -> EvictionHandle {
        self.next_token += 1;
        let token = self.next_token;
        let store = self.store.clone();
        let started = Arc::new(AtomicBool::new(false));
        let task_started = Arc::clone(&started);
        let task_key = key.to_string();

        trace!(key = %key, token, ttl_ms = ttl.as_millis() as u64, "Arming eviction");

        let task = self.runtime.spawn(async move {
            task_started.store(true, Ordering::Release);
            let key = task_key;
            tokio::time::sleep(ttl).await;

            let Some(store) = store.upgrade() else {
                trace!(key = %key, token, "Eviction fired after cache was dropped");
                return;
            };

            let removed = store.write().evict_if_armed(&key, token);

            if removed {
                debug!(key = %key, "Evicted expired entry");
            } else {
                trace!(key = %key, token, "Eviction pre-empted");
            }
        });

        if task.is_finished() && !started.load(Ordering::Acquire) {
            warn!(key = %key, token, "Timer runtime is shut down, eviction will not run");
        }

        EvictionHandle { token, task }
    }
}
