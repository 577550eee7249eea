//! Onboarding progress port.
//!
//! Contract for persisting and retrieving per-account onboarding progress.
//! Implementations are provided by the infrastructure layer.

use async_trait::async_trait;

use crate::ids::AccountId;
use crate::onboarding::OnboardingProgress;
use crate::ports::errors::StorageError;

#[async_trait]
pub trait OnboardingStatePort: Send + Sync {
    /// Current progress for the account; default (incomplete, step 0) when
    /// none has been persisted yet.
    async fn get(&self, account_id: &AccountId) -> Result<OnboardingProgress, StorageError>;

    /// Persist the account's progress.
    async fn set(
        &self,
        account_id: &AccountId,
        progress: &OnboardingProgress,
    ) -> Result<(), StorageError>;

    /// Drop the account's progress record (account deletion).
    async fn reset(&self, account_id: &AccountId) -> Result<(), StorageError>;

    /// Whether onboarding is completed for the account.
    async fn is_completed(&self, account_id: &AccountId) -> Result<bool, StorageError> {
        Ok(self.get(account_id).await?.completed)
    }
}
