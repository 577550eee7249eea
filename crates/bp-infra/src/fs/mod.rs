//! File-based storage adapters.
//!
//! Each repository persists one JSON document in the application data
//! directory. Writes go through [`retry::with_write_retry`] and land
//! atomically (temp file then rename), so a crash mid-write leaves either
//! the previous document or the fully written new one.

mod account_store;
mod guardian_store;
mod onboarding_store;
mod retry;
mod session_store;

pub use account_store::{FileAccountRepository, ACCOUNTS_FILE};
pub use guardian_store::{FileGuardianLinkRepository, GUARDIAN_LINKS_FILE};
pub use onboarding_store::FileOnboardingStateRepository;
pub use session_store::{FileSessionRepository, CURRENT_SESSION_FILE};

use std::path::{Path, PathBuf};

use bp_core::ports::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;

/// Default per-user data directory for the app's JSON documents.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("brightpath")
}

async fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::Io(format!("create dir {}: {e}", parent.display())))?;
    }
    Ok(())
}

/// Read and decode a JSON document; a missing or empty file yields the
/// provided default.
async fn read_json_or<T, F>(path: &Path, default: F) -> Result<T, StorageError>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(default()),
        Err(e) => return Err(StorageError::Io(format!("read {}: {e}", path.display()))),
    };
    if content.trim().is_empty() {
        return Ok(default());
    }
    serde_json::from_str(&content)
        .map_err(|e| StorageError::Encode(format!("parse {}: {e}", path.display())))
}

/// Encode and write a JSON document atomically.
async fn atomic_write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    ensure_parent_dir(path).await?;

    let content = serde_json::to_string_pretty(value)
        .map_err(|e| StorageError::Encode(format!("serialize {}: {e}", path.display())))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &content)
        .await
        .map_err(|e| StorageError::Io(format!("write {}: {e}", tmp_path.display())))?;
    fs::rename(&tmp_path, path)
        .await
        .map_err(|e| StorageError::Io(format!("rename to {}: {e}", path.display())))?;

    Ok(())
}

async fn remove_file_if_exists(path: &Path) -> Result<bool, StorageError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(StorageError::Io(format!("remove {}: {e}", path.display()))),
    }
}
