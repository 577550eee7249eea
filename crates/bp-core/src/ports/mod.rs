//! Port interfaces for the application layer.
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations, keeping the core business logic
//! independent of storage, hashing, and presentation concerns.

pub mod account_repository;
pub mod errors;
pub mod guardian_link;
pub mod learning_path;
pub mod notification;
pub mod onboarding_state;
pub mod password_hasher;
pub mod session_repository;
pub mod wizard_event;

pub use account_repository::{AccountRecord, AccountRepositoryPort};
pub use errors::StorageError;
pub use guardian_link::GuardianLinkPort;
pub use learning_path::LearningPathPort;
pub use notification::{NotificationKind, NotificationPort};
pub use onboarding_state::OnboardingStatePort;
pub use password_hasher::{HashError, PasswordHasherPort};
pub use session_repository::SessionRepositoryPort;
pub use wizard_event::WizardEventPort;
