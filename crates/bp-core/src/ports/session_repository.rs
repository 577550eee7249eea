//! Session repository port.

use async_trait::async_trait;

use crate::ports::errors::StorageError;
use crate::session::Session;

/// Persists the single active session for this runtime context.
#[async_trait]
pub trait SessionRepositoryPort: Send + Sync {
    /// The current session, if any.
    async fn current(&self) -> Result<Option<Session>, StorageError>;

    /// Replace whatever session exists with the given one.
    async fn replace(&self, session: &Session) -> Result<(), StorageError>;

    /// Clear the current session. Returns whether one existed; clearing an
    /// already-empty store is a no-op, not an error.
    async fn clear(&self) -> Result<bool, StorageError>;
}
