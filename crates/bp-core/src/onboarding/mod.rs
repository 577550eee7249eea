//! Onboarding domain models.
//!
//! This module defines the persisted onboarding progress and the wizard
//! state machine that mutates it. Progress is created alongside the account
//! (defaulting to incomplete), mutated only by the wizard, and marked
//! complete exactly once; the `completed` flag is monotonic.

pub mod wizard;

use serde::{Deserialize, Serialize};

use crate::account::Role;
use crate::guardian::GuardianLinkRequest;

pub use wizard::{
    GuardianField, OnboardingWizard, ProfileField, WizardAction, WizardError, WizardEvent,
    WizardState,
};

/// Bump when the persisted progress layout changes.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

fn current_schema_version() -> u32 {
    CURRENT_SCHEMA_VERSION
}

/// Data collected by the wizard so far, all optional until gathered.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollectedProfile {
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub guardian: Option<GuardianLinkRequest>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Per-account onboarding state persisted across restarts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingProgress {
    #[serde(default = "current_schema_version")]
    pub schema_version: u32,
    /// Monotonic: once true it is never reset by any operation here.
    pub completed: bool,
    /// Index of the wizard step to resume at, see [`WizardState::step_index`].
    pub step_index: u8,
    #[serde(default)]
    pub collected: CollectedProfile,
}

impl Default for OnboardingProgress {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            completed: false,
            step_index: 0,
            collected: CollectedProfile::default(),
        }
    }
}

/// Generated learning path handed back by the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    pub milestones: Vec<String>,
}
