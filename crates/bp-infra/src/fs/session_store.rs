//! File-based session repository.
//!
//! At most one session exists at a time; an absent file means signed out.

use std::path::PathBuf;

use async_trait::async_trait;
use bp_core::ports::{SessionRepositoryPort, StorageError};
use bp_core::session::Session;
use tokio::fs;

use super::retry::with_write_retry;
use super::{atomic_write_json, read_json_or, remove_file_if_exists};

pub const CURRENT_SESSION_FILE: &str = "current_session.json";

pub struct FileSessionRepository {
    path: PathBuf,
}

impl FileSessionRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            path: base_dir.join(CURRENT_SESSION_FILE),
        }
    }
}

#[async_trait]
impl SessionRepositoryPort for FileSessionRepository {
    async fn current(&self) -> Result<Option<Session>, StorageError> {
        read_json_or(&self.path, || None).await
    }

    async fn replace(&self, session: &Session) -> Result<(), StorageError> {
        let record = Some(session.clone());
        with_write_retry("write session", || atomic_write_json(&self.path, &record)).await
    }

    async fn clear(&self) -> Result<bool, StorageError> {
        // The file itself is the session record, so clearing is a delete.
        let existed = fs::try_exists(&self.path)
            .await
            .map_err(|e| StorageError::Io(format!("stat {}: {e}", self.path.display())))?;
        if existed {
            remove_file_if_exists(&self.path).await?;
        }
        Ok(existed)
    }
}
