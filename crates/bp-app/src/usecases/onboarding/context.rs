//! Shared wizard runtime state.

use std::sync::Arc;

use bp_core::onboarding::WizardState;
use tokio::sync::{Mutex, MutexGuard};

/// Holds the current wizard state plus the dispatch lock that serializes
/// event processing. Cheap to clone via [`WizardContext::arc`].
pub struct WizardContext {
    state: Mutex<WizardState>,
    dispatch_lock: Mutex<()>,
}

impl WizardContext {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(WizardState::RoleSelect),
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub async fn get_state(&self) -> WizardState {
        self.state.lock().await.clone()
    }

    pub async fn set_state(&self, state: WizardState) {
        *self.state.lock().await = state;
    }

    /// Held for the whole of one dispatch so transitions never interleave.
    pub async fn acquire_dispatch_lock(&self) -> MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::new()
    }
}
