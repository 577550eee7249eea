//! Onboarding wizard use cases.
//!
//! The orchestrator owns the runtime side of the wizard: it feeds events
//! through the pure state machine, executes the resulting actions, persists
//! progress after every transition, and emits state changes to subscribers.

mod context;
mod mark_complete;
mod orchestrator;

pub use context::WizardContext;
pub use mark_complete::MarkOnboardingComplete;
pub use orchestrator::{OnboardingError, OnboardingOrchestrator};
