use thiserror::Error;

/// Durable-storage failure surfaced by repository ports.
///
/// Fatal to the current operation: an adapter must never report success
/// for a partially written record. Transient write failures are retried
/// by the adapter within a bounded budget before surfacing here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(String),

    #[error("storage encoding error: {0}")]
    Encode(String),

    #[error("conflict: {0}")]
    Conflict(String),
}
