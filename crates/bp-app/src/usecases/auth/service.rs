//! Session store service.
//!
//! The sole authority on "who is currently signed in" and the only writer
//! of account, credential, and session records. Constructed once at app
//! start and injected where needed; there is no ambient global state.
//!
//! Every mutating operation persists its records before returning success,
//! surfaces exactly one success or error notification, and runs under a
//! single write lock so no two mutations on the same stores interleave.
//! All failures are typed results; nothing on this surface panics or throws.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex};
use tracing::{info, info_span, warn, Instrument};

use bp_core::account::{display_name_from_email, normalize_email, Account, Role};
use bp_core::credential::CredentialEntry;
use bp_core::onboarding::OnboardingProgress;
use bp_core::ports::{
    AccountRecord, AccountRepositoryPort, HashError, NotificationKind, NotificationPort,
    OnboardingStatePort, PasswordHasherPort, SessionRepositoryPort, StorageError,
};
use bp_core::session::{AuthMethod, FederatedProvider, Session, SessionEvent};

/// Buffered session events per subscriber; slow subscribers lag, they do
/// not block sign-in.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Errors produced by the session store.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("that email address doesn't look right")]
    InvalidEmail,

    #[error("an account with this email already exists")]
    DuplicateAccount,

    #[error("no account found for this email")]
    NoSuchAccount,

    #[error("incorrect email or password")]
    InvalidCredential,

    #[error("{provider} sign-in failed: {reason}")]
    FederatedAuth {
        provider: FederatedProvider,
        reason: String,
    },

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Sign-up input. Email and secret are required; everything else falls
/// back to sensible defaults.
#[derive(Debug, Clone)]
pub struct SignUpRequest {
    pub email: String,
    pub secret: String,
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub grade: Option<String>,
}

impl SignUpRequest {
    pub fn new(email: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            secret: secret.into(),
            display_name: None,
            role: None,
            grade: None,
        }
    }
}

/// The session store.
pub struct AuthService {
    accounts: Arc<dyn AccountRepositoryPort>,
    sessions: Arc<dyn SessionRepositoryPort>,
    onboarding: Arc<dyn OnboardingStatePort>,
    hasher: Arc<dyn PasswordHasherPort>,
    notifier: Arc<dyn NotificationPort>,
    events: broadcast::Sender<SessionEvent>,
    /// Serializes mutating operations; a sign-in started while a sign-up is
    /// still pending waits instead of interleaving.
    write_lock: Mutex<()>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<dyn AccountRepositoryPort>,
        sessions: Arc<dyn SessionRepositoryPort>,
        onboarding: Arc<dyn OnboardingStatePort>,
        hasher: Arc<dyn PasswordHasherPort>,
        notifier: Arc<dyn NotificationPort>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            accounts,
            sessions,
            onboarding,
            hasher,
            notifier,
            events,
            write_lock: Mutex::new(()),
        }
    }

    /// Register a new account. Does **not** open a session; the caller must
    /// sign in separately once the (implied) email verification is done.
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Account, AuthError> {
        let span = info_span!("usecase.auth.sign_up", email = %request.email);
        async {
            match self.sign_up_inner(request).await {
                Ok(account) => {
                    self.notify_success(&format!(
                        "Account created for {}. Check your inbox to verify your email.",
                        account.email
                    ))
                    .await;
                    Ok(account)
                }
                Err(err) => {
                    warn!(error = %err, "sign up failed");
                    self.notify_error(&err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Open a session for an existing account, replacing any current one.
    pub async fn sign_in(&self, email: &str, secret: &str) -> Result<Session, AuthError> {
        let span = info_span!("usecase.auth.sign_in", email = %email);
        async {
            match self.sign_in_inner(email, secret).await {
                Ok(session) => {
                    self.notify_success(&format!(
                        "Welcome back, {}!",
                        session.account.display_name
                    ))
                    .await;
                    Ok(session)
                }
                Err(err) => {
                    warn!(error = %err, "sign in failed");
                    self.notify_error(&err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Federated sign-in stub: resolves (or lazily creates) the provider's
    /// fixed demo account and opens a session for it. Always returns a
    /// valid session or a [`AuthError::FederatedAuth`] failure — the
    /// contract a real identity-provider exchange must preserve.
    pub async fn sign_in_federated(
        &self,
        provider: FederatedProvider,
    ) -> Result<Session, AuthError> {
        let span = info_span!("usecase.auth.sign_in_federated", provider = %provider);
        async {
            match self.sign_in_federated_inner(provider).await {
                Ok(session) => {
                    self.notify_success(&format!(
                        "Signed in with {} as {}.",
                        provider, session.account.display_name
                    ))
                    .await;
                    Ok(session)
                }
                Err(err) => {
                    warn!(error = %err, "federated sign in failed");
                    self.notify_error(&err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Clear the current session. Idempotent: signing out while signed out
    /// is a no-op, not an error.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        let span = info_span!("usecase.auth.sign_out");
        async {
            match self.sign_out_inner().await {
                Ok(existed) => {
                    info!(existed, "signed out");
                    self.notify_success("Signed out.").await;
                    Ok(())
                }
                Err(err) => {
                    warn!(error = %err, "sign out failed");
                    self.notify_error(&err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Delete an account with its credential, and invalidate the current
    /// session in the same operation when it points at that account.
    pub async fn delete_account(&self, email: &str) -> Result<(), AuthError> {
        let span = info_span!("usecase.auth.delete_account", email = %email);
        async {
            match self.delete_account_inner(email).await {
                Ok(()) => {
                    self.notify_success("Account deleted.").await;
                    Ok(())
                }
                Err(err) => {
                    warn!(error = %err, "delete account failed");
                    self.notify_error(&err).await;
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Pure read of the current session.
    pub async fn current_session(&self) -> Result<Option<Session>, AuthError> {
        Ok(self.sessions.current().await?)
    }

    /// Subscribe to session lifecycle events (sign-in / sign-out).
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    async fn sign_up_inner(&self, request: SignUpRequest) -> Result<Account, AuthError> {
        let email = normalize_email(&request.email).ok_or(AuthError::InvalidEmail)?;

        let _guard = self.write_lock.lock().await;

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateAccount);
        }

        let secret_hash = self.hasher.hash(&request.secret)?;
        let now = Utc::now();
        let display_name = request
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| display_name_from_email(&email));
        let role = request.role.unwrap_or_default();

        let account = Account::new(email.clone(), display_name, role, now);
        let record = AccountRecord {
            account: account.clone(),
            credential: CredentialEntry {
                email,
                secret_hash,
                created_at: now,
            },
        };
        self.accounts.insert(&record).await?;

        // Onboarding progress is created alongside the account, seeded with
        // whatever the sign-up form already knew.
        let mut progress = OnboardingProgress::default();
        progress.collected.role = Some(role);
        progress.collected.grade = request.grade.filter(|g| !g.trim().is_empty());
        self.onboarding.set(&account.id, &progress).await?;

        info!(account_id = %account.id, "account created, verification pending");
        Ok(account)
    }

    async fn sign_in_inner(&self, email: &str, secret: &str) -> Result<Session, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;

        let _guard = self.write_lock.lock().await;

        let record = self
            .accounts
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::NoSuchAccount)?;

        // A failed verification leaves any existing session untouched.
        if !self.hasher.verify(secret, &record.credential.secret_hash)? {
            return Err(AuthError::InvalidCredential);
        }

        let session = Session::open(record.account, AuthMethod::Password, Utc::now());
        self.sessions.replace(&session).await?;
        self.emit(SessionEvent::SignedIn {
            session: session.clone(),
        });
        info!(account_id = %session.account_id, "session opened");
        Ok(session)
    }

    async fn sign_in_federated_inner(
        &self,
        provider: FederatedProvider,
    ) -> Result<Session, AuthError> {
        let result: Result<Session, AuthError> = async {
            let _guard = self.write_lock.lock().await;

            let email = provider.demo_email();
            let account = match self.accounts.find_by_email(&email).await? {
                Some(record) => record.account,
                None => self.create_demo_account(provider, &email).await?,
            };

            let session = Session::open(account, AuthMethod::Federated(provider), Utc::now());
            self.sessions.replace(&session).await?;
            self.emit(SessionEvent::SignedIn {
                session: session.clone(),
            });
            info!(account_id = %session.account_id, provider = %provider, "federated session opened");
            Ok(session)
        }
        .await;

        result.map_err(|err| match err {
            federated @ AuthError::FederatedAuth { .. } => federated,
            other => AuthError::FederatedAuth {
                provider,
                reason: other.to_string(),
            },
        })
    }

    async fn create_demo_account(
        &self,
        provider: FederatedProvider,
        email: &str,
    ) -> Result<Account, AuthError> {
        let now = Utc::now();
        // The demo account keeps the 1:1 credential invariant with an
        // unguessable secret nobody can sign in with directly.
        let secret_hash = self.hasher.hash(&uuid::Uuid::new_v4().to_string())?;
        let account = Account::new(
            email.to_string(),
            provider.demo_display_name(),
            Role::Learner,
            now,
        );
        self.accounts
            .insert(&AccountRecord {
                account: account.clone(),
                credential: CredentialEntry {
                    email: email.to_string(),
                    secret_hash,
                    created_at: now,
                },
            })
            .await?;

        let mut progress = OnboardingProgress::default();
        progress.collected.role = Some(Role::Learner);
        self.onboarding.set(&account.id, &progress).await?;
        Ok(account)
    }

    async fn sign_out_inner(&self) -> Result<bool, AuthError> {
        let _guard = self.write_lock.lock().await;
        let existed = self.sessions.clear().await?;
        if existed {
            self.emit(SessionEvent::SignedOut);
        }
        Ok(existed)
    }

    async fn delete_account_inner(&self, email: &str) -> Result<(), AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidEmail)?;

        let _guard = self.write_lock.lock().await;

        let removed = self
            .accounts
            .remove(&email)
            .await?
            .ok_or(AuthError::NoSuchAccount)?;
        self.onboarding.reset(&removed.account.id).await?;

        let session_matches = self
            .sessions
            .current()
            .await?
            .is_some_and(|session| session.account_id == removed.account.id);
        if session_matches {
            self.sessions.clear().await?;
            self.emit(SessionEvent::SignedOut);
        }

        info!(account_id = %removed.account.id, "account deleted");
        Ok(())
    }

    fn emit(&self, event: SessionEvent) {
        // No subscribers is fine; the channel is best-effort.
        let _ = self.events.send(event);
    }

    async fn notify_success(&self, message: &str) {
        self.notifier
            .notify(NotificationKind::Success, message)
            .await;
    }

    async fn notify_error(&self, err: &AuthError) {
        self.notifier
            .notify(NotificationKind::Error, &err.to_string())
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bp_core::ids::AccountId;
    use std::collections::HashMap;
    use std::sync::Mutex as StdMutex;

    #[derive(Default)]
    struct MemoryAccounts {
        records: StdMutex<HashMap<String, AccountRecord>>,
    }

    #[async_trait]
    impl AccountRepositoryPort for MemoryAccounts {
        async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, StorageError> {
            Ok(self.records.lock().unwrap().get(email).cloned())
        }

        async fn insert(&self, record: &AccountRecord) -> Result<(), StorageError> {
            let mut records = self.records.lock().unwrap();
            if records.contains_key(&record.account.email) {
                return Err(StorageError::Conflict(record.account.email.clone()));
            }
            records.insert(record.account.email.clone(), record.clone());
            Ok(())
        }

        async fn remove(&self, email: &str) -> Result<Option<AccountRecord>, StorageError> {
            Ok(self.records.lock().unwrap().remove(email))
        }
    }

    #[derive(Default)]
    struct MemorySessions {
        current: StdMutex<Option<Session>>,
    }

    #[async_trait]
    impl SessionRepositoryPort for MemorySessions {
        async fn current(&self) -> Result<Option<Session>, StorageError> {
            Ok(self.current.lock().unwrap().clone())
        }

        async fn replace(&self, session: &Session) -> Result<(), StorageError> {
            *self.current.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<bool, StorageError> {
            Ok(self.current.lock().unwrap().take().is_some())
        }
    }

    #[derive(Default)]
    struct MemoryOnboarding {
        progress: StdMutex<HashMap<AccountId, OnboardingProgress>>,
    }

    #[async_trait]
    impl OnboardingStatePort for MemoryOnboarding {
        async fn get(&self, account_id: &AccountId) -> Result<OnboardingProgress, StorageError> {
            Ok(self
                .progress
                .lock()
                .unwrap()
                .get(account_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn set(
            &self,
            account_id: &AccountId,
            progress: &OnboardingProgress,
        ) -> Result<(), StorageError> {
            self.progress
                .lock()
                .unwrap()
                .insert(account_id.clone(), progress.clone());
            Ok(())
        }

        async fn reset(&self, account_id: &AccountId) -> Result<(), StorageError> {
            self.progress.lock().unwrap().remove(account_id);
            Ok(())
        }
    }

    struct PlainHasher;

    impl PasswordHasherPort for PlainHasher {
        fn hash(&self, secret: &str) -> Result<String, HashError> {
            Ok(format!("plain${secret}"))
        }

        fn verify(&self, secret: &str, hash: &str) -> Result<bool, HashError> {
            Ok(hash == format!("plain${secret}"))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notes: StdMutex<Vec<(NotificationKind, String)>>,
    }

    impl RecordingNotifier {
        fn snapshot(&self) -> Vec<(NotificationKind, String)> {
            self.notes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotificationPort for RecordingNotifier {
        async fn notify(&self, kind: NotificationKind, message: &str) {
            self.notes
                .lock()
                .unwrap()
                .push((kind, message.to_string()));
        }
    }

    struct Fixture {
        service: AuthService,
        accounts: Arc<MemoryAccounts>,
        sessions: Arc<MemorySessions>,
        notifier: Arc<RecordingNotifier>,
        onboarding: Arc<MemoryOnboarding>,
    }

    fn build() -> Fixture {
        let accounts = Arc::new(MemoryAccounts::default());
        let sessions = Arc::new(MemorySessions::default());
        let onboarding = Arc::new(MemoryOnboarding::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = AuthService::new(
            accounts.clone(),
            sessions.clone(),
            onboarding.clone(),
            Arc::new(PlainHasher),
            notifier.clone(),
        );
        Fixture {
            service,
            accounts,
            sessions,
            notifier,
            onboarding,
        }
    }

    #[tokio::test]
    async fn sign_up_then_sign_in_binds_session_to_new_account() {
        let fx = build();

        let account = fx
            .service
            .sign_up(SignUpRequest::new("Alice@Example.com", "secret123"))
            .await
            .unwrap();
        assert_eq!(account.email, "alice@example.com");
        assert!(
            fx.service.current_session().await.unwrap().is_none(),
            "sign up must not open a session"
        );

        let session = fx
            .service
            .sign_in("alice@example.com", "secret123")
            .await
            .unwrap();
        assert_eq!(session.account_id, account.id);
        assert_eq!(
            fx.service.current_session().await.unwrap().unwrap().account_id,
            account.id
        );
    }

    #[tokio::test]
    async fn sign_up_never_stores_the_clear_secret() {
        let fx = build();
        fx.service
            .sign_up(SignUpRequest::new("alice@example.com", "secret123"))
            .await
            .unwrap();

        let records = fx.accounts.records.lock().unwrap();
        let record = records.get("alice@example.com").unwrap();
        assert_ne!(record.credential.secret_hash, "secret123");
    }

    #[tokio::test]
    async fn duplicate_sign_up_fails_and_leaves_existing_records_untouched() {
        let fx = build();
        let first = fx
            .service
            .sign_up(
                SignUpRequest::new("alice@example.com", "secret123")
                    .into_named("Alice"),
            )
            .await
            .unwrap();

        let err = fx
            .service
            .sign_up(SignUpRequest::new("alice@example.com", "other-secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::DuplicateAccount));

        let records = fx.accounts.records.lock().unwrap();
        let record = records.get("alice@example.com").unwrap();
        assert_eq!(record.account.id, first.id);
        assert_eq!(record.account.display_name, "Alice");
        assert_eq!(record.credential.secret_hash, "plain$secret123");
    }

    #[tokio::test]
    async fn sign_in_with_wrong_secret_leaves_existing_session_unchanged() {
        let fx = build();
        fx.service
            .sign_up(SignUpRequest::new("alice@example.com", "secret123"))
            .await
            .unwrap();
        let session = fx
            .service
            .sign_in("alice@example.com", "secret123")
            .await
            .unwrap();

        let err = fx
            .service
            .sign_in("alice@example.com", "wrong")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential));
        assert_eq!(
            fx.sessions.current.lock().unwrap().as_ref().unwrap(),
            &session
        );
    }

    #[tokio::test]
    async fn sign_in_with_unknown_email_is_no_such_account() {
        let fx = build();
        let err = fx
            .service
            .sign_in("nobody@example.com", "whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::NoSuchAccount));
    }

    #[tokio::test]
    async fn sign_out_is_idempotent() {
        let fx = build();
        fx.service
            .sign_up(SignUpRequest::new("alice@example.com", "secret123"))
            .await
            .unwrap();
        fx.service
            .sign_in("alice@example.com", "secret123")
            .await
            .unwrap();

        fx.service.sign_out().await.unwrap();
        assert!(fx.service.current_session().await.unwrap().is_none());

        fx.service.sign_out().await.unwrap();
        assert!(fx.service.current_session().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn federated_sign_in_resolves_the_same_demo_account_each_time() {
        let fx = build();

        let first = fx
            .service
            .sign_in_federated(FederatedProvider::Google)
            .await
            .unwrap();
        fx.service.sign_out().await.unwrap();
        let second = fx
            .service
            .sign_in_federated(FederatedProvider::Google)
            .await
            .unwrap();

        assert_eq!(first.account_id, second.account_id);
        assert_eq!(first.account.email, "demo.google@brightpath.app");
        assert!(matches!(
            second.auth_method,
            AuthMethod::Federated(FederatedProvider::Google)
        ));
    }

    #[tokio::test]
    async fn delete_account_invalidates_its_session_in_the_same_operation() {
        let fx = build();
        let account = fx
            .service
            .sign_up(SignUpRequest::new("alice@example.com", "secret123"))
            .await
            .unwrap();
        fx.service
            .sign_in("alice@example.com", "secret123")
            .await
            .unwrap();

        fx.service.delete_account("alice@example.com").await.unwrap();

        assert!(fx.service.current_session().await.unwrap().is_none());
        assert!(fx
            .accounts
            .records
            .lock()
            .unwrap()
            .get("alice@example.com")
            .is_none());
        assert!(fx
            .onboarding
            .progress
            .lock()
            .unwrap()
            .get(&account.id)
            .is_none());
    }

    #[tokio::test]
    async fn every_mutation_notifies_exactly_once() {
        let fx = build();

        fx.service
            .sign_up(SignUpRequest::new("alice@example.com", "secret123"))
            .await
            .unwrap();
        fx.service
            .sign_up(SignUpRequest::new("alice@example.com", "secret123"))
            .await
            .unwrap_err();
        fx.service
            .sign_in("alice@example.com", "secret123")
            .await
            .unwrap();
        fx.service.sign_out().await.unwrap();

        let notes = fx.notifier.snapshot();
        assert_eq!(notes.len(), 4);
        assert_eq!(notes[0].0, NotificationKind::Success);
        assert_eq!(notes[1].0, NotificationKind::Error);
        assert_eq!(notes[2].0, NotificationKind::Success);
        assert_eq!(notes[3].0, NotificationKind::Success);
    }

    #[tokio::test]
    async fn subscribers_see_sign_in_and_sign_out_events() {
        let fx = build();
        let mut rx = fx.service.subscribe();

        fx.service
            .sign_up(SignUpRequest::new("alice@example.com", "secret123"))
            .await
            .unwrap();
        let session = fx
            .service
            .sign_in("alice@example.com", "secret123")
            .await
            .unwrap();
        fx.service.sign_out().await.unwrap();

        assert_eq!(
            rx.try_recv().unwrap(),
            SessionEvent::SignedIn { session }
        );
        assert_eq!(rx.try_recv().unwrap(), SessionEvent::SignedOut);
    }

    impl SignUpRequest {
        fn into_named(mut self, name: &str) -> Self {
            self.display_name = Some(name.to_string());
            self
        }
    }
}
