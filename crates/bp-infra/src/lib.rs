//! Brightpath infrastructure adapters.
//!
//! File-backed implementations of the `bp-core` storage ports plus the
//! password hasher, notification, learning-path, and wizard-event adapters.

pub mod events;
pub mod fs;
pub mod learning;
pub mod notify;
pub mod security;

pub use events::BroadcastWizardEvents;
pub use fs::{
    default_data_dir, FileAccountRepository, FileGuardianLinkRepository,
    FileOnboardingStateRepository, FileSessionRepository,
};
pub use learning::StaticLearningPathGenerator;
pub use notify::LogNotifier;
pub use security::Argon2PasswordHasher;
