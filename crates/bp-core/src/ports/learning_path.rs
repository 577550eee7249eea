//! Learning path generation port.

use async_trait::async_trait;

use crate::onboarding::{CollectedProfile, LearningPath};

/// Collaborator that produces a learning path from the collected profile.
///
/// Generation may be simulated or asynchronous; completion is signaled by
/// this call returning, not by any wizard-side validation.
#[async_trait]
pub trait LearningPathPort: Send + Sync {
    async fn generate(&self, profile: &CollectedProfile) -> anyhow::Result<LearningPath>;
}
