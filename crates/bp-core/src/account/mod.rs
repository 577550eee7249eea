//! Account domain models.
//!
//! The account is the durable identity record for a registered user.
//! Its email is the natural key and must be unique across all accounts;
//! the identifier never changes after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AccountId;

/// Closed set of roles a registered user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Learner,
    Educator,
    Institution,
    Guardian,
}

impl Role {
    pub fn is_learner(self) -> bool {
        matches!(self, Self::Learner)
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Learner
    }
}

/// Closed, versioned profile metadata.
///
/// Replaces an open attributes map so the set of stored fields stays
/// machine-checkable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileAttributes {
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Durable identity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    /// Normalized email, unique natural key.
    pub email: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub attributes: ProfileAttributes,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account with a fresh identifier.
    ///
    /// `email` must already be normalized via [`normalize_email`].
    pub fn new(email: String, display_name: String, role: Role, now: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::new(),
            email,
            display_name,
            role,
            attributes: ProfileAttributes::default(),
            created_at: now,
        }
    }
}

/// Normalize and structurally validate an email address.
///
/// Returns `None` when the input cannot serve as an account key.
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    if normalized.is_empty() || !normalized.contains('@') {
        return None;
    }
    let parts = normalized.split('@').collect::<Vec<_>>();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }
    Some(normalized)
}

/// Derive a fallback display name from the email's local part.
pub fn display_name_from_email(email: &str) -> String {
    let local = email
        .split('@')
        .next()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("learner");
    local.to_owned()
}
