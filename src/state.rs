//! Application state shared by all handlers.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::game::GameStore;

/// The single game store behind a lock
pub type SharedStore = Arc<Mutex<GameStore>>;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
}

impl AppState {
    pub fn new(store: GameStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Lock the store, recovering from a poisoned lock
    pub fn lock_store(&self) -> MutexGuard<'_, GameStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
