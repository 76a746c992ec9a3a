// ABOUTME: Shared handle over the application snapshot
// ABOUTME: All writes go through dispatch(); each message applies atomically, in dispatch order

use crate::mutation::Mutation;
use crate::state::AppState;
use std::sync::Mutex;
use tokio::sync::watch;
use tracing::warn;

/// Explicit, lifecycle-scoped store handle
///
/// There is no module-level global: construct one per application and
/// share it by reference (or inside an Arc). The snapshot is only ever
/// mutated through dispatch, never written directly.
pub struct Store {
    state: Mutex<AppState>,
    revision: watch::Sender<u64>,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        let (revision, _) = watch::channel(0);
        Store {
            state: Mutex::new(initial),
            revision,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AppState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("store mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Apply one mutation; the message is atomic with respect to observers
    pub fn dispatch(&self, mutation: Mutation) {
        {
            let mut state = self.lock();
            state.apply(mutation);
        }
        self.revision.send_modify(|rev| *rev += 1);
    }

    /// Clone the current snapshot
    pub fn snapshot(&self) -> AppState {
        self.lock().clone()
    }

    /// Read from the current snapshot without cloning it
    pub fn read<T>(&self, f: impl FnOnce(&AppState) -> T) -> T {
        f(&self.lock())
    }

    pub fn is_connected(&self) -> bool {
        self.read(|state| state.connected)
    }

    /// Subscribe to the revision counter; it ticks after every dispatch
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new(AppState::default())
    }
}
