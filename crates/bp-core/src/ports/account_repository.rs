//! Account repository port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::credential::CredentialEntry;
use crate::ports::errors::StorageError;

/// Stored unit: the account plus its credential entry, keyed by email.
///
/// Credential existence is 1:1 with account existence, so the two are
/// written and removed together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub account: Account,
    pub credential: CredentialEntry,
}

#[async_trait]
pub trait AccountRepositoryPort: Send + Sync {
    /// Look up a record by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StorageError>;

    /// Insert a new record. Fails with [`StorageError::Conflict`] when the
    /// email is already registered, leaving existing records untouched.
    async fn insert(&self, record: &AccountRecord) -> Result<(), StorageError>;

    /// Remove a record, returning it if it existed.
    async fn remove(&self, email: &str) -> Result<Option<AccountRecord>, StorageError>;
}
