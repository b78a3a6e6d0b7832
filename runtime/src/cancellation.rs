//! Registry of running cancellable effects
//!
//! Each [`EffectId`] maps to at most one running task. Registering a task
//! under an id that is already taken aborts the previous task, which is how
//! timers get torn down and re-created.

use marquee_core::effect::EffectId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::AbortHandle;

/// Running cancellable tasks, keyed by effect id
#[derive(Debug, Default)]
pub struct Cancellations {
    next_token: AtomicU64,
    running: Mutex<HashMap<EffectId, Entry>>,
}

#[derive(Debug)]
struct Entry {
    token: u64,
    handle: AbortHandle,
}

impl Cancellations {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock leaves the map consistent, so poisoning is ignored.
    fn running(&self) -> MutexGuard<'_, HashMap<EffectId, Entry>> {
        self.running.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Abort the task running under `id`, if any
    ///
    /// Returns `true` if a task was aborted.
    pub fn cancel(&self, id: EffectId) -> bool {
        // Abort outside the lock: an aborted task releases its entry on drop.
        let entry = self.running().remove(&id);
        match entry {
            Some(entry) => {
                entry.handle.abort();
                tracing::trace!(effect_id = %id, "Cancelled running effect");
                true
            },
            None => false,
        }
    }

    /// Abort every registered task
    ///
    /// Returns the number of tasks aborted.
    pub fn cancel_all(&self) -> usize {
        let entries: Vec<Entry> = self.running().drain().map(|(_, entry)| entry).collect();
        for entry in &entries {
            entry.handle.abort();
        }
        entries.len()
    }

    /// Number of tasks currently registered
    #[must_use]
    pub fn len(&self) -> usize {
        self.running().len()
    }

    /// Whether no task is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.running().is_empty()
    }

    /// Whether a task is registered under `id`
    #[must_use]
    pub fn is_running(&self, id: EffectId) -> bool {
        self.running().contains_key(&id)
    }

    /// Replace whatever runs under `id` with the task produced by `spawn`
    ///
    /// `spawn` receives a [`Registration`] that must be moved into the task;
    /// dropping it (on completion or abort) releases the id.
    pub fn replace<F>(self: &Arc<Self>, id: EffectId, spawn: F)
    where
        F: FnOnce(Registration) -> AbortHandle,
    {
        self.cancel(id);

        let token = self.next_token.fetch_add(1, Ordering::Relaxed);
        let registration = Registration {
            registry: Arc::clone(self),
            id,
            token,
        };

        // Hold the lock across spawn so a task that finishes immediately
        // cannot release its entry before it is inserted.
        let mut running = self.running();
        let handle = spawn(registration);
        running.insert(id, Entry { token, handle });
    }

    fn release(&self, id: EffectId, token: u64) {
        let mut running = self.running();
        if running.get(&id).is_some_and(|entry| entry.token == token) {
            running.remove(&id);
        }
    }
}

/// Ownership of an id by one spawned task; releases the id on drop
#[derive(Debug)]
pub struct Registration {
    registry: Arc<Cancellations>,
    id: EffectId,
    token: u64,
}

impl Registration {
    /// The id this registration holds
    #[must_use]
    pub const fn id(&self) -> EffectId {
        self.id
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.registry.release(self.id, self.token);
    }
}
