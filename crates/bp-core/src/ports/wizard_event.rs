//! Wizard state change event port.

use async_trait::async_trait;

use crate::ids::AccountId;
use crate::onboarding::WizardState;

/// Notifies the presentation layer that the wizard moved, so route guards
/// can be re-evaluated without polling.
#[async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn emit_state_changed(&self, account_id: &AccountId, state: WizardState);
}
