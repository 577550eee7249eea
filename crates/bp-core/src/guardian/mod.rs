//! Guardian link domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::AccountId;

/// How the guardian wants to be involved in the learner's progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardianNotificationMode {
    Motivator,
    Monitor,
    SilentWatcher,
}

/// Record capturing a minor learner's chosen guardian contact.
///
/// Created during onboarding and not mutated afterward by this subsystem;
/// persisted independently of the account so an out-of-scope notification
/// collaborator can fulfill it later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardianLinkRequest {
    pub account_id: AccountId,
    pub full_name: String,
    pub phone: String,
    pub relationship: String,
    pub notification_mode: GuardianNotificationMode,
    pub created_at: DateTime<Utc>,
}
