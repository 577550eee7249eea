//! Broadcast-backed wizard event adapter.
//!
//! Fans wizard state changes out to any number of subscribers (route
//! guards, progress UI). Lagging subscribers drop old states rather than
//! blocking the wizard.

use async_trait::async_trait;
use bp_core::ids::AccountId;
use bp_core::onboarding::WizardState;
use bp_core::ports::WizardEventPort;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 32;

pub struct BroadcastWizardEvents {
    sender: broadcast::Sender<(AccountId, WizardState)>,
}

impl BroadcastWizardEvents {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<(AccountId, WizardState)> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastWizardEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WizardEventPort for BroadcastWizardEvents {
    async fn emit_state_changed(&self, account_id: &AccountId, state: WizardState) {
        // No subscribers is fine.
        let _ = self.sender.send((account_id.clone(), state));
    }
}
