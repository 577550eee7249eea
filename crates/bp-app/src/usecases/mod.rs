//! Use cases.

pub mod auth;
pub mod onboarding;
