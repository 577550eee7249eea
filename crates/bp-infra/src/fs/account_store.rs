//! File-based account repository.
//!
//! Stores all account records in one JSON document keyed by normalized
//! email, which keeps the duplicate check a plain map lookup.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use bp_core::ports::{AccountRecord, AccountRepositoryPort, StorageError};

use super::retry::with_write_retry;
use super::{atomic_write_json, read_json_or};

pub const ACCOUNTS_FILE: &str = "accounts.json";

pub struct FileAccountRepository {
    path: PathBuf,
}

impl FileAccountRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            path: base_dir.join(ACCOUNTS_FILE),
        }
    }

    async fn load(&self) -> Result<BTreeMap<String, AccountRecord>, StorageError> {
        read_json_or(&self.path, BTreeMap::new).await
    }

    async fn store(&self, records: &BTreeMap<String, AccountRecord>) -> Result<(), StorageError> {
        with_write_retry("write accounts", || atomic_write_json(&self.path, records)).await
    }
}

#[async_trait]
impl AccountRepositoryPort for FileAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StorageError> {
        Ok(self.load().await?.get(email).cloned())
    }

    async fn insert(&self, record: &AccountRecord) -> Result<(), StorageError> {
        let mut records = self.load().await?;
        if records.contains_key(&record.account.email) {
            return Err(StorageError::Conflict(record.account.email.clone()));
        }
        records.insert(record.account.email.clone(), record.clone());
        self.store(&records).await
    }

    async fn remove(&self, email: &str) -> Result<Option<AccountRecord>, StorageError> {
        let mut records = self.load().await?;
        let removed = records.remove(email);
        if removed.is_some() {
            self.store(&records).await?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bp_core::account::{Account, Role};
    use bp_core::credential::CredentialEntry;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(email: &str) -> AccountRecord {
        let now = Utc::now();
        AccountRecord {
            account: Account::new(email.to_string(), "Test".to_string(), Role::Learner, now),
            credential: CredentialEntry {
                email: email.to_string(),
                secret_hash: "$argon2id$test".to_string(),
                created_at: now,
            },
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trip() {
        let dir = TempDir::new().unwrap();
        let repo = FileAccountRepository::with_defaults(dir.path().to_path_buf());

        let record = record("alice@example.com");
        repo.insert(&record).await.unwrap();

        let found = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn find_on_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let repo = FileAccountRepository::with_defaults(dir.path().to_path_buf());

        assert_eq!(repo.find_by_email("alice@example.com").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_conflict_and_keeps_the_original() {
        let dir = TempDir::new().unwrap();
        let repo = FileAccountRepository::with_defaults(dir.path().to_path_buf());

        let original = record("alice@example.com");
        repo.insert(&original).await.unwrap();

        let err = repo.insert(&record("alice@example.com")).await.unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));

        let found = repo.find_by_email("alice@example.com").await.unwrap();
        assert_eq!(found, Some(original));
    }

    #[tokio::test]
    async fn remove_returns_the_record_and_deletes_it() {
        let dir = TempDir::new().unwrap();
        let repo = FileAccountRepository::with_defaults(dir.path().to_path_buf());

        let record = record("alice@example.com");
        repo.insert(&record).await.unwrap();

        let removed = repo.remove("alice@example.com").await.unwrap();
        assert_eq!(removed, Some(record));
        assert_eq!(repo.find_by_email("alice@example.com").await.unwrap(), None);

        assert_eq!(repo.remove("alice@example.com").await.unwrap(), None);
    }
}
