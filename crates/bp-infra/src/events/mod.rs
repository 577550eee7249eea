//! Event adapters.

mod broadcast_events;

pub use broadcast_events::BroadcastWizardEvents;
