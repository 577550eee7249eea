//! Credential domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Association between an email and a hashed secret.
///
/// Exactly one entry exists per account for the lifetime of this subsystem:
/// created at sign-up, never updated (no password-change flow here), and
/// deleted only together with the account. The clear secret is never stored;
/// `secret_hash` carries a PHC-format hash produced by the infrastructure
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialEntry {
    pub email: String,
    pub secret_hash: String,
    pub created_at: DateTime<Utc>,
}
