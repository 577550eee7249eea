//! End-to-end onboarding flow against the real file-backed adapters.

use std::path::Path;
use std::sync::Arc;

use bp_app::{AuthService, OnboardingOrchestrator, SignUpRequest};
use bp_core::account::Role;
use bp_core::guardian::GuardianNotificationMode;
use bp_core::ids::AccountId;
use bp_core::onboarding::WizardState;
use bp_core::ports::OnboardingStatePort;
use bp_core::routing::{decide, Destination, IdentitySnapshot, RouteDecision};
use bp_infra::{
    Argon2PasswordHasher, BroadcastWizardEvents, FileAccountRepository,
    FileGuardianLinkRepository, FileOnboardingStateRepository, FileSessionRepository, LogNotifier,
    StaticLearningPathGenerator,
};
use tempfile::TempDir;

fn auth(data_dir: &Path) -> AuthService {
    AuthService::new(
        Arc::new(FileAccountRepository::with_defaults(data_dir.to_path_buf())),
        Arc::new(FileSessionRepository::with_defaults(data_dir.to_path_buf())),
        Arc::new(FileOnboardingStateRepository::new(data_dir.to_path_buf())),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(LogNotifier::new()),
    )
}

fn orchestrator(data_dir: &Path, account_id: AccountId) -> OnboardingOrchestrator {
    OnboardingOrchestrator::new(
        account_id,
        Arc::new(FileOnboardingStateRepository::new(data_dir.to_path_buf())),
        Arc::new(FileGuardianLinkRepository::with_defaults(
            data_dir.to_path_buf(),
        )),
        Arc::new(StaticLearningPathGenerator::new()),
        Arc::new(BroadcastWizardEvents::new()),
    )
}

#[tokio::test]
async fn sixteen_year_old_learner_onboards_end_to_end() {
    let dir = TempDir::new().unwrap();

    let auth = auth(dir.path());
    auth.sign_up(SignUpRequest::new("alice@example.com", "secret123"))
        .await
        .unwrap();
    let session = auth.sign_in("alice@example.com", "secret123").await.unwrap();

    // Freshly signed in, the dashboard is gated behind onboarding.
    let identity = IdentitySnapshot::signed_in(session.clone(), false);
    assert_eq!(
        decide(&identity, &Destination::Dashboard),
        RouteDecision::RedirectToOnboarding
    );

    let wizard = orchestrator(dir.path(), session.account_id.clone());
    wizard.choose_role(Role::Learner).await.unwrap();
    let state = wizard
        .submit_profile("Alice", Some(16), Some("Grade 10".to_string()))
        .await
        .unwrap();
    assert_eq!(state, WizardState::GuardianLinking { error: None });

    let state = wizard
        .submit_guardian(
            "Pat Doe",
            "+1 555 0100",
            "parent",
            GuardianNotificationMode::Motivator,
        )
        .await
        .unwrap();
    assert_eq!(state, WizardState::GamificationSetup);

    let state = wizard.choose_gamification("explorer", "fox").await.unwrap();
    assert_eq!(state, WizardState::Complete);

    let progress_store = FileOnboardingStateRepository::new(dir.path().to_path_buf());
    assert!(progress_store
        .is_completed(&session.account_id)
        .await
        .unwrap());

    let guardian_links =
        FileGuardianLinkRepository::with_defaults(dir.path().to_path_buf());
    let links = guardian_links.all().await.unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].account_id, session.account_id);

    // With onboarding complete the dashboard renders.
    let identity = IdentitySnapshot::signed_in(session, true);
    assert_eq!(
        decide(&identity, &Destination::Dashboard),
        RouteDecision::Render
    );
}

#[tokio::test]
async fn interrupted_wizard_resumes_at_the_persisted_step() {
    let dir = TempDir::new().unwrap();
    let account_id = AccountId::new();

    let wizard = orchestrator(dir.path(), account_id.clone());
    wizard.choose_role(Role::Learner).await.unwrap();
    let state = wizard
        .submit_profile("Alice", Some(16), Some("Grade 10".to_string()))
        .await
        .unwrap();
    assert_eq!(state, WizardState::GuardianLinking { error: None });

    // Restart: a fresh orchestrator over the same data dir picks up where
    // the previous one stopped.
    let restarted = orchestrator(dir.path(), account_id);
    assert_eq!(
        restarted.state().await.unwrap(),
        WizardState::GuardianLinking { error: None }
    );

    let state = restarted.skip_guardian().await.unwrap();
    assert_eq!(state, WizardState::GamificationSetup);
}

#[tokio::test]
async fn adult_learner_never_sees_guardian_linking() {
    let dir = TempDir::new().unwrap();
    let wizard = orchestrator(dir.path(), AccountId::new());

    wizard.choose_role(Role::Learner).await.unwrap();
    let state = wizard
        .submit_profile("Bob", Some(20), Some("College".to_string()))
        .await
        .unwrap();
    assert_eq!(state, WizardState::GamificationSetup);

    let guardian_links =
        FileGuardianLinkRepository::with_defaults(dir.path().to_path_buf());
    assert!(guardian_links.all().await.unwrap().is_empty());
}

#[tokio::test]
async fn completion_survives_restart_and_further_events() {
    let dir = TempDir::new().unwrap();
    let account_id = AccountId::new();

    let wizard = orchestrator(dir.path(), account_id.clone());
    wizard.choose_role(Role::Educator).await.unwrap();
    wizard.submit_profile("Kim", Some(35), None).await.unwrap();
    wizard.choose_gamification("mentor", "owl").await.unwrap();

    let restarted = orchestrator(dir.path(), account_id.clone());
    assert_eq!(restarted.state().await.unwrap(), WizardState::Complete);

    // Replayed events are no-ops once complete.
    let state = restarted.choose_role(Role::Learner).await.unwrap();
    assert_eq!(state, WizardState::Complete);

    let progress_store = FileOnboardingStateRepository::new(dir.path().to_path_buf());
    assert!(progress_store.is_completed(&account_id).await.unwrap());
}
