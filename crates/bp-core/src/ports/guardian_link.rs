//! Guardian link port.

use async_trait::async_trait;

use crate::guardian::GuardianLinkRequest;
use crate::ports::errors::StorageError;

/// Append-only store for guardian link requests, persisted independently of
/// the account so a notification collaborator can fulfill them later.
#[async_trait]
pub trait GuardianLinkPort: Send + Sync {
    async fn save(&self, request: &GuardianLinkRequest) -> Result<(), StorageError>;
}
