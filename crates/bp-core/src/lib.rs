//! # bp-core
//!
//! Core domain models and business logic for Brightpath.
//!
//! This crate contains pure business logic without any infrastructure
//! dependencies: the account/session data model, the onboarding wizard
//! state machine, the route-guard decision function, and the port traits
//! implemented by the infrastructure layer.

// Public module exports
pub mod account;
pub mod credential;
pub mod guardian;
pub mod ids;
pub mod onboarding;
pub mod ports;
pub mod routing;
pub mod session;

// Re-export commonly used types at the crate root
pub use account::{normalize_email, Account, ProfileAttributes, Role};
pub use credential::CredentialEntry;
pub use guardian::{GuardianLinkRequest, GuardianNotificationMode};
pub use ids::AccountId;
pub use onboarding::{CollectedProfile, LearningPath, OnboardingProgress};
pub use routing::{decide, Destination, IdentitySnapshot, RouteDecision};
pub use session::{AuthMethod, FederatedProvider, Session, SessionEvent};
