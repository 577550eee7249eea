//! Authentication use cases.
//!
//! This module exposes the session store service.

mod service;

pub use service::{AuthError, AuthService, SignUpRequest};
