//! Onboarding wizard orchestrator.
//!
//! Runtime driver for the pure wizard state machine: dispatches events,
//! executes the resulting actions against ports, persists progress after
//! every transition, and emits state changes so route guards can react.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, info_span, Instrument};

use bp_core::account::Role;
use bp_core::guardian::{GuardianLinkRequest, GuardianNotificationMode};
use bp_core::ids::AccountId;
use bp_core::onboarding::{
    CollectedProfile, OnboardingProgress, OnboardingWizard, WizardAction, WizardEvent, WizardState,
    CURRENT_SCHEMA_VERSION,
};
use bp_core::ports::{
    GuardianLinkPort, LearningPathPort, OnboardingStatePort, StorageError, WizardEventPort,
};

use super::context::WizardContext;
use super::mark_complete::MarkOnboardingComplete;

#[derive(Debug, thiserror::Error)]
pub enum OnboardingError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("learning path generation failed: {0}")]
    LearningPath(#[source] anyhow::Error),
}

/// Drives one account's wizard.
///
/// State is seeded lazily from persisted progress on first use, so an
/// interrupted wizard resumes at the step it left off instead of restarting.
pub struct OnboardingOrchestrator {
    account_id: AccountId,
    context: Arc<WizardContext>,
    collected: Mutex<CollectedProfile>,
    /// Monotonic completion cache, mirrors the persisted flag.
    completed: AtomicBool,
    seeded: AtomicBool,
    progress_store: Arc<dyn OnboardingStatePort>,
    guardian_links: Arc<dyn GuardianLinkPort>,
    learning_paths: Arc<dyn LearningPathPort>,
    mark_complete: MarkOnboardingComplete,
    events: Arc<dyn WizardEventPort>,
}

impl OnboardingOrchestrator {
    pub fn new(
        account_id: AccountId,
        progress_store: Arc<dyn OnboardingStatePort>,
        guardian_links: Arc<dyn GuardianLinkPort>,
        learning_paths: Arc<dyn LearningPathPort>,
        events: Arc<dyn WizardEventPort>,
    ) -> Self {
        Self {
            account_id,
            context: WizardContext::arc(),
            collected: Mutex::new(CollectedProfile::default()),
            completed: AtomicBool::new(false),
            seeded: AtomicBool::new(false),
            mark_complete: MarkOnboardingComplete::new(progress_store.clone()),
            progress_store,
            guardian_links,
            learning_paths,
            events,
        }
    }

    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Current wizard state, seeding from persisted progress first.
    pub async fn state(&self) -> Result<WizardState, OnboardingError> {
        self.ensure_seeded().await?;
        Ok(self.context.get_state().await)
    }

    pub async fn choose_role(&self, role: Role) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::ChooseRole { role }).await
    }

    pub async fn submit_profile(
        &self,
        full_name: impl Into<String>,
        age: Option<u8>,
        grade: Option<String>,
    ) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::SubmitProfile {
            full_name: full_name.into(),
            age,
            grade,
        })
        .await
    }

    pub async fn submit_guardian(
        &self,
        full_name: impl Into<String>,
        phone: impl Into<String>,
        relationship: impl Into<String>,
        notification_mode: GuardianNotificationMode,
    ) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::SubmitGuardian {
            full_name: full_name.into(),
            phone: phone.into(),
            relationship: relationship.into(),
            notification_mode,
        })
        .await
    }

    pub async fn skip_guardian(&self) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::SkipGuardian).await
    }

    pub async fn choose_gamification(
        &self,
        theme: impl Into<String>,
        avatar: impl Into<String>,
    ) -> Result<WizardState, OnboardingError> {
        self.dispatch(WizardEvent::ChooseGamification {
            theme: theme.into(),
            avatar: avatar.into(),
        })
        .await
    }

    /// Feed one event through the state machine, then any follow-up events
    /// produced by action execution, and return the settled state.
    pub async fn dispatch(&self, event: WizardEvent) -> Result<WizardState, OnboardingError> {
        self.ensure_seeded().await?;
        let _dispatch = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.onboarding.dispatch", account_id = %self.account_id);
        async {
            let mut pending = VecDeque::from([event]);
            let mut state = self.context.get_state().await;

            while let Some(event) = pending.pop_front() {
                let (next, actions) = OnboardingWizard::transition(state.clone(), event);
                debug!(?next, action_count = actions.len(), "wizard transition");

                self.execute_actions(actions, &mut pending).await?;
                self.persist_progress(&next).await?;
                self.set_state_and_emit(next.clone()).await;
                state = next;
            }

            Ok(state)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<WizardAction>,
        pending: &mut VecDeque<WizardEvent>,
    ) -> Result<(), OnboardingError> {
        for action in actions {
            match action {
                WizardAction::RecordRole { role } => {
                    self.collected.lock().await.role = Some(role);
                }
                WizardAction::RecordProfile {
                    full_name,
                    age,
                    grade,
                } => {
                    let mut collected = self.collected.lock().await;
                    collected.full_name = Some(full_name);
                    collected.age = Some(age);
                    collected.grade = grade;
                }
                WizardAction::CreateGuardianLink {
                    full_name,
                    phone,
                    relationship,
                    notification_mode,
                } => {
                    let request = GuardianLinkRequest {
                        account_id: self.account_id.clone(),
                        full_name,
                        phone,
                        relationship,
                        notification_mode,
                        created_at: Utc::now(),
                    };
                    self.guardian_links.save(&request).await?;
                    info!(account_id = %self.account_id, "guardian link request saved");
                    self.collected.lock().await.guardian = Some(request);
                }
                WizardAction::StartLearningPathGeneration => {
                    let profile = self.collected.lock().await.clone();
                    let path = self
                        .learning_paths
                        .generate(&profile)
                        .await
                        .map_err(OnboardingError::LearningPath)?;
                    info!(milestones = path.milestones.len(), "learning path generated");
                    pending.push_back(WizardEvent::GenerationFinished);
                }
                WizardAction::RecordGamification { theme, avatar } => {
                    let mut collected = self.collected.lock().await;
                    collected.theme = Some(theme);
                    collected.avatar = Some(avatar);
                }
                WizardAction::MarkOnboardingComplete => {
                    self.mark_complete.execute(&self.account_id).await?;
                    self.completed.store(true, Ordering::SeqCst);
                }
            }
        }
        Ok(())
    }

    async fn persist_progress(&self, state: &WizardState) -> Result<(), OnboardingError> {
        let progress = OnboardingProgress {
            schema_version: CURRENT_SCHEMA_VERSION,
            completed: self.completed.load(Ordering::SeqCst),
            step_index: state.step_index(),
            collected: self.collected.lock().await.clone(),
        };
        self.progress_store.set(&self.account_id, &progress).await?;
        Ok(())
    }

    async fn set_state_and_emit(&self, state: WizardState) {
        self.context.set_state(state.clone()).await;
        self.events.emit_state_changed(&self.account_id, state).await;
    }

    /// Seed runtime state from persisted progress exactly once.
    async fn ensure_seeded(&self) -> Result<(), OnboardingError> {
        if self.seeded.load(Ordering::SeqCst) {
            return Ok(());
        }
        let _dispatch = self.context.acquire_dispatch_lock().await;
        if self.seeded.load(Ordering::SeqCst) {
            return Ok(());
        }

        let progress = self.progress_store.get(&self.account_id).await?;
        let state = WizardState::resume(&progress);
        info!(account_id = %self.account_id, step_index = progress.step_index, "wizard seeded from persisted progress");

        *self.collected.lock().await = progress.collected;
        self.completed.store(progress.completed, Ordering::SeqCst);
        self.set_state_and_emit(state).await;
        self.seeded.store(true, Ordering::SeqCst);
        Ok(())
    }
}
