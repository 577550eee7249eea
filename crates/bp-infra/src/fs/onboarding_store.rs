//! File-based onboarding progress repository.
//!
//! One JSON document per account, so deleting an account drops exactly its
//! own progress record.

use std::path::PathBuf;

use async_trait::async_trait;
use bp_core::ids::AccountId;
use bp_core::onboarding::OnboardingProgress;
use bp_core::ports::{OnboardingStatePort, StorageError};

use super::retry::with_write_retry;
use super::{atomic_write_json, read_json_or, remove_file_if_exists};

pub struct FileOnboardingStateRepository {
    base_dir: PathBuf,
}

impl FileOnboardingStateRepository {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn path_for(&self, account_id: &AccountId) -> PathBuf {
        self.base_dir
            .join(format!("onboarding_{}.json", account_id))
    }
}

#[async_trait]
impl OnboardingStatePort for FileOnboardingStateRepository {
    async fn get(&self, account_id: &AccountId) -> Result<OnboardingProgress, StorageError> {
        read_json_or(&self.path_for(account_id), OnboardingProgress::default).await
    }

    async fn set(
        &self,
        account_id: &AccountId,
        progress: &OnboardingProgress,
    ) -> Result<(), StorageError> {
        let path = self.path_for(account_id);
        with_write_retry("write onboarding progress", || {
            atomic_write_json(&path, progress)
        })
        .await
    }

    async fn reset(&self, account_id: &AccountId) -> Result<(), StorageError> {
        remove_file_if_exists(&self.path_for(account_id)).await?;
        Ok(())
    }
}
