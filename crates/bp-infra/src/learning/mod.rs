//! Learning path generation adapters.

mod generator;

pub use generator::StaticLearningPathGenerator;
