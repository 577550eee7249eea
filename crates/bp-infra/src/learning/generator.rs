//! Static learning path generator.
//!
//! Deterministic placeholder for a real curriculum service: the milestones
//! depend only on the collected role and grade, so tests and demo builds
//! get stable output.

use async_trait::async_trait;
use bp_core::account::Role;
use bp_core::onboarding::{CollectedProfile, LearningPath};
use bp_core::ports::LearningPathPort;

#[derive(Default)]
pub struct StaticLearningPathGenerator;

impl StaticLearningPathGenerator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LearningPathPort for StaticLearningPathGenerator {
    async fn generate(&self, profile: &CollectedProfile) -> anyhow::Result<LearningPath> {
        let role = profile.role.unwrap_or_default();
        let mut milestones = vec!["Tour the dashboard".to_string()];

        match role {
            Role::Learner => {
                if let Some(grade) = &profile.grade {
                    milestones.push(format!("Placement check for {grade}"));
                }
                milestones.push("Finish your first lesson".to_string());
                milestones.push("Pass your first quiz".to_string());
            }
            Role::Educator => {
                milestones.push("Create your first class".to_string());
                milestones.push("Invite your learners".to_string());
            }
            Role::Institution => {
                milestones.push("Set up your organization".to_string());
                milestones.push("Add educator accounts".to_string());
            }
            Role::Guardian => {
                milestones.push("Link a learner account".to_string());
                milestones.push("Pick how you want updates".to_string());
            }
        }

        Ok(LearningPath { milestones })
    }
}
