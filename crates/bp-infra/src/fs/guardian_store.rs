//! File-based guardian link store.
//!
//! Append-only list of link requests; a notification collaborator consumes
//! them out of band, nothing here ever rewrites or removes an entry.

use std::path::PathBuf;

use async_trait::async_trait;
use bp_core::guardian::GuardianLinkRequest;
use bp_core::ports::{GuardianLinkPort, StorageError};

use super::retry::with_write_retry;
use super::{atomic_write_json, read_json_or};

pub const GUARDIAN_LINKS_FILE: &str = "guardian_links.json";

pub struct FileGuardianLinkRepository {
    path: PathBuf,
}

impl FileGuardianLinkRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self {
            path: base_dir.join(GUARDIAN_LINKS_FILE),
        }
    }

    /// All recorded link requests, oldest first.
    pub async fn all(&self) -> Result<Vec<GuardianLinkRequest>, StorageError> {
        read_json_or(&self.path, Vec::new).await
    }
}

#[async_trait]
impl GuardianLinkPort for FileGuardianLinkRepository {
    async fn save(&self, request: &GuardianLinkRequest) -> Result<(), StorageError> {
        let mut requests = self.all().await?;
        requests.push(request.clone());
        with_write_retry("write guardian links", || {
            atomic_write_json(&self.path, &requests)
        })
        .await
    }
}
