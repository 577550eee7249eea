//! Mark onboarding complete use case.

use std::sync::Arc;

use bp_core::ids::AccountId;
use bp_core::onboarding::WizardState;
use bp_core::ports::{OnboardingStatePort, StorageError};
use tracing::info;

/// Flips the persisted completion flag for an account.
///
/// Idempotent, and the flag is monotonic: once completed, repeated calls
/// leave the record untouched and nothing here ever resets it.
pub struct MarkOnboardingComplete {
    store: Arc<dyn OnboardingStatePort>,
}

impl MarkOnboardingComplete {
    pub fn new(store: Arc<dyn OnboardingStatePort>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, account_id: &AccountId) -> Result<(), StorageError> {
        let mut progress = self.store.get(account_id).await?;
        if progress.completed {
            return Ok(());
        }
        progress.completed = true;
        progress.step_index = WizardState::Complete.step_index();
        self.store.set(account_id, &progress).await?;
        info!(account_id = %account_id, "onboarding marked complete");
        Ok(())
    }
}
