//! Session domain models.
//!
//! A session is the ephemeral pointer marking which account is currently
//! authenticated in the client. At most one session exists per runtime
//! context (single-device, single-session model), and it always references
//! a currently-existing account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::ids::AccountId;

/// Federated identity providers backed by deterministic demo accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FederatedProvider {
    Google,
    Apple,
    Microsoft,
}

impl FederatedProvider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Apple => "apple",
            Self::Microsoft => "microsoft",
        }
    }

    /// Fixed demo account email for this provider.
    pub fn demo_email(self) -> String {
        format!("demo.{}@brightpath.app", self.as_str())
    }

    /// Fixed demo account display name for this provider.
    pub fn demo_display_name(self) -> String {
        match self {
            Self::Google => "Google Demo Learner".to_string(),
            Self::Apple => "Apple Demo Learner".to_string(),
            Self::Microsoft => "Microsoft Demo Learner".to_string(),
        }
    }
}

impl std::fmt::Display for FederatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the current session was opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    Password,
    Federated(FederatedProvider),
}

/// Ephemeral pointer to exactly one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub account_id: AccountId,
    /// Snapshot of the account at sign-in time.
    pub account: Account,
    pub auth_method: AuthMethod,
    pub opened_at: DateTime<Utc>,
}

impl Session {
    pub fn open(account: Account, auth_method: AuthMethod, now: DateTime<Utc>) -> Self {
        Self {
            account_id: account.id.clone(),
            account,
            auth_method,
            opened_at: now,
        }
    }
}

/// Session lifecycle events delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn { session: Session },
    SignedOut,
}
