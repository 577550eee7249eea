//! Onboarding wizard state machine.
//!
//! Defines a pure state transition function for the gated onboarding flow.
//! Runtime behaviors like persistence and the learning-path generation call
//! are handled by the application layer.
//!
//! State transitions:
//! ```text
//! RoleSelect
//!  │ ChooseRole
//!  ▼
//! ProfileDetails
//!  ├── SubmitProfile (invalid) ──► ProfileDetails { error: IncompleteProfile }
//!  ├── SubmitProfile (learner, age < 18) ──► GuardianLinking
//!  └── SubmitProfile (otherwise) ─────────► LearningPathGeneration
//!
//! GuardianLinking
//!  ├── SubmitGuardian (invalid) ──► GuardianLinking { error: IncompleteGuardianInfo }
//!  ├── SubmitGuardian (valid) ────► LearningPathGeneration
//!  └── SkipGuardian ──────────────► LearningPathGeneration
//!
//! LearningPathGeneration ── GenerationFinished ──► GamificationSetup
//! GamificationSetup ─────── ChooseGamification ──► Complete (terminal)
//! ```

use serde::{Deserialize, Serialize};

use crate::account::Role;
use crate::guardian::GuardianNotificationMode;
use crate::onboarding::OnboardingProgress;

/// Learners younger than this route through guardian linking.
const ADULT_AGE: u8 = 18;

/// Wizard flow state.
///
/// States that accept user input carry their own field-level error so a
/// failed submit re-presents the same step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardState {
    /// Pick one of the closed set of roles.
    RoleSelect,
    /// Collect full name, age, and (for learners) grade.
    ProfileDetails {
        role: Role,
        error: Option<WizardError>,
    },
    /// Collect guardian contact info for minor learners.
    GuardianLinking { error: Option<WizardError> },
    /// Waiting for the learning-path collaborator to finish.
    LearningPathGeneration,
    /// Pick a gamification theme and avatar (both have defaults).
    GamificationSetup,
    /// Terminal: onboarding is complete and the wizard accepts no more events.
    Complete,
}

impl WizardState {
    /// Persisted step index used to resume an interrupted wizard.
    pub fn step_index(&self) -> u8 {
        match self {
            Self::RoleSelect => 0,
            Self::ProfileDetails { .. } => 1,
            Self::GuardianLinking { .. } => 2,
            Self::LearningPathGeneration => 3,
            Self::GamificationSetup => 4,
            Self::Complete => 5,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Reconstruct the wizard state from persisted progress.
    ///
    /// Falls back toward earlier steps when the collected data a step
    /// depends on is missing, so a corrupt or truncated record restarts
    /// cleanly instead of stranding the user.
    pub fn resume(progress: &OnboardingProgress) -> Self {
        if progress.completed {
            return Self::Complete;
        }
        match progress.step_index {
            0 => Self::RoleSelect,
            1 | 2 => match progress.collected.role {
                Some(role) if progress.step_index == 1 => Self::ProfileDetails { role, error: None },
                Some(_) => Self::GuardianLinking { error: None },
                None => Self::RoleSelect,
            },
            3 => Self::LearningPathGeneration,
            _ => Self::GamificationSetup,
        }
    }
}

/// Events that drive the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    /// User picked a role.
    ChooseRole { role: Role },
    /// User submitted the profile details form. Blank fields arrive as
    /// `None`/empty strings.
    SubmitProfile {
        full_name: String,
        age: Option<u8>,
        grade: Option<String>,
    },
    /// User submitted guardian contact info.
    SubmitGuardian {
        full_name: String,
        phone: String,
        relationship: String,
        notification_mode: GuardianNotificationMode,
    },
    /// User skipped guardian linking; always available on that step.
    SkipGuardian,
    /// The learning-path collaborator signaled completion.
    GenerationFinished,
    /// User picked a theme and avatar.
    ChooseGamification { theme: String, avatar: String },
}

/// Side effects produced by state transitions, executed by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Record the chosen role into the collected profile.
    RecordRole { role: Role },
    /// Record validated profile details into the collected profile.
    RecordProfile {
        full_name: String,
        age: u8,
        grade: Option<String>,
    },
    /// Create and persist a guardian link request.
    CreateGuardianLink {
        full_name: String,
        phone: String,
        relationship: String,
        notification_mode: GuardianNotificationMode,
    },
    /// Ask the learning-path collaborator to generate a path.
    StartLearningPathGeneration,
    /// Record the gamification choices into the collected profile.
    RecordGamification { theme: String, avatar: String },
    /// Flip the persisted completion flag (exactly once).
    MarkOnboardingComplete,
}

/// Profile form fields referenced by validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileField {
    FullName,
    Age,
    Grade,
}

impl ProfileField {
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "full name",
            Self::Age => "age",
            Self::Grade => "grade",
        }
    }
}

/// Guardian form fields referenced by validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardianField {
    FullName,
    Phone,
}

impl GuardianField {
    pub fn name(self) -> &'static str {
        match self {
            Self::FullName => "guardian full name",
            Self::Phone => "guardian phone",
        }
    }
}

/// Validation errors re-presented on the offending step.
///
/// Every failure names the blank fields; the wizard never surfaces a
/// generic failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardError {
    IncompleteProfile { missing: Vec<ProfileField> },
    IncompleteGuardianInfo { missing: Vec<GuardianField> },
}

impl std::fmt::Display for WizardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncompleteProfile { missing } => {
                let fields = missing.iter().map(|m| m.name()).collect::<Vec<_>>();
                write!(f, "incomplete profile, missing: {}", fields.join(", "))
            }
            Self::IncompleteGuardianInfo { missing } => {
                let fields = missing.iter().map(|m| m.name()).collect::<Vec<_>>();
                write!(f, "incomplete guardian info, missing: {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for WizardError {}

/// Pure wizard state machine, no side effects.
pub struct OnboardingWizard;

impl OnboardingWizard {
    pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        match (state, event) {
            (WizardState::RoleSelect, WizardEvent::ChooseRole { role }) => (
                WizardState::ProfileDetails { role, error: None },
                vec![WizardAction::RecordRole { role }],
            ),
            (
                WizardState::ProfileDetails { role, .. },
                WizardEvent::SubmitProfile {
                    full_name,
                    age,
                    grade,
                },
            ) => {
                let grade = grade.filter(|g| !g.trim().is_empty());
                let mut missing = Vec::new();
                if full_name.trim().is_empty() {
                    missing.push(ProfileField::FullName);
                }
                if age.is_none() {
                    missing.push(ProfileField::Age);
                }
                if role.is_learner() && grade.is_none() {
                    missing.push(ProfileField::Grade);
                }
                if !missing.is_empty() {
                    return (
                        WizardState::ProfileDetails {
                            role,
                            error: Some(WizardError::IncompleteProfile { missing }),
                        },
                        Vec::new(),
                    );
                }

                let age = age.unwrap_or_default();
                let record = WizardAction::RecordProfile {
                    full_name: full_name.trim().to_string(),
                    age,
                    grade,
                };
                if role.is_learner() && age < ADULT_AGE {
                    (WizardState::GuardianLinking { error: None }, vec![record])
                } else {
                    (
                        WizardState::LearningPathGeneration,
                        vec![record, WizardAction::StartLearningPathGeneration],
                    )
                }
            }
            (
                WizardState::GuardianLinking { .. },
                WizardEvent::SubmitGuardian {
                    full_name,
                    phone,
                    relationship,
                    notification_mode,
                },
            ) => {
                let mut missing = Vec::new();
                if full_name.trim().is_empty() {
                    missing.push(GuardianField::FullName);
                }
                if phone.trim().is_empty() {
                    missing.push(GuardianField::Phone);
                }
                if !missing.is_empty() {
                    return (
                        WizardState::GuardianLinking {
                            error: Some(WizardError::IncompleteGuardianInfo { missing }),
                        },
                        Vec::new(),
                    );
                }
                (
                    WizardState::LearningPathGeneration,
                    vec![
                        WizardAction::CreateGuardianLink {
                            full_name: full_name.trim().to_string(),
                            phone: phone.trim().to_string(),
                            relationship,
                            notification_mode,
                        },
                        WizardAction::StartLearningPathGeneration,
                    ],
                )
            }
            (WizardState::GuardianLinking { .. }, WizardEvent::SkipGuardian) => (
                WizardState::LearningPathGeneration,
                vec![WizardAction::StartLearningPathGeneration],
            ),
            (WizardState::LearningPathGeneration, WizardEvent::GenerationFinished) => {
                (WizardState::GamificationSetup, Vec::new())
            }
            (WizardState::GamificationSetup, WizardEvent::ChooseGamification { theme, avatar }) => (
                WizardState::Complete,
                vec![
                    WizardAction::RecordGamification { theme, avatar },
                    WizardAction::MarkOnboardingComplete,
                ],
            ),
            // Complete is terminal, and unmatched (state, event) pairs are
            // no-ops with no side effects.
            (state, _event) => (state, Vec::new()),
        }
    }
}
