//! Brightpath application orchestration layer.
//!
//! This crate contains the session store service and the onboarding wizard
//! orchestrator, wired to the `bp-core` ports.

pub mod usecases;

pub use usecases::auth::{AuthError, AuthService, SignUpRequest};
pub use usecases::onboarding::{MarkOnboardingComplete, OnboardingError, OnboardingOrchestrator};
