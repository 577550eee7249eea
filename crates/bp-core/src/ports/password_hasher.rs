//! Password hashing port.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Hashes and verifies account secrets. Synchronous on purpose: hashing is
/// CPU-bound and callers run it inline under the store's write lock.
pub trait PasswordHasherPort: Send + Sync {
    /// Hash a clear secret into a self-describing (PHC) string.
    fn hash(&self, secret: &str) -> Result<String, HashError>;

    /// Verify a clear secret against a stored hash.
    fn verify(&self, secret: &str, hash: &str) -> Result<bool, HashError>;
}
