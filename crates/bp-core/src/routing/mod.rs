//! Route guard decision function.
//!
//! A pure function of (session, onboarding profile, destination) that tells
//! the view-routing layer what to do with a navigation. No I/O, no async:
//! the only "suspension" is the explicit [`RouteDecision::Loading`] outcome
//! returned while the identity sources are still resolving.

use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Navigation targets the guard distinguishes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    SignIn,
    SignUp,
    Onboarding,
    Dashboard,
    /// Any other protected path, kept verbatim so redirects can resume it.
    Other(String),
}

impl Destination {
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" | "/signin" => Self::SignIn,
            "/signup" | "/register" => Self::SignUp,
            "/onboarding" => Self::Onboarding,
            "/dashboard" | "" => Self::Dashboard,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::SignIn => "/login",
            Self::SignUp => "/signup",
            Self::Onboarding => "/onboarding",
            Self::Dashboard => "/dashboard",
            Self::Other(path) => path,
        }
    }

    /// Sign-in and sign-up are reachable without a session.
    fn is_public_auth(&self) -> bool {
        matches!(self, Self::SignIn | Self::SignUp)
    }
}

/// What the guard knows about the current identity when it runs.
///
/// `Loading` covers the window where the session store or the profile
/// source has not answered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySnapshot {
    Loading,
    Ready {
        session: Option<Session>,
        onboarding_completed: bool,
    },
}

impl IdentitySnapshot {
    pub fn signed_out() -> Self {
        Self::Ready {
            session: None,
            onboarding_completed: false,
        }
    }

    pub fn signed_in(session: Session, onboarding_completed: bool) -> Self {
        Self::Ready {
            session: Some(session),
            onboarding_completed,
        }
    }
}

/// Outcome of a route guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Identity still resolving; render a loading indicator, do not redirect.
    Loading,
    Render,
    /// Carries the originally requested destination so it can be resumed
    /// after sign-in.
    RedirectToSignIn { resume: Destination },
    RedirectToOnboarding,
    RedirectToDashboard,
}

/// Decide what to do with a navigation. First match wins, in this order:
///
/// 1. identity still loading → `Loading`
/// 2. signed out + public auth destination → `Render`
/// 3. signed out + anything else → `RedirectToSignIn` (carrying the target)
/// 4. signed in + public auth destination → `RedirectToDashboard`
/// 5. signed in + onboarding incomplete + not the onboarding page →
///    `RedirectToOnboarding`
/// 6. otherwise → `Render`
pub fn decide(identity: &IdentitySnapshot, destination: &Destination) -> RouteDecision {
    let (session, onboarding_completed) = match identity {
        IdentitySnapshot::Loading => return RouteDecision::Loading,
        IdentitySnapshot::Ready {
            session,
            onboarding_completed,
        } => (session, *onboarding_completed),
    };

    match session {
        None if destination.is_public_auth() => RouteDecision::Render,
        None => RouteDecision::RedirectToSignIn {
            resume: destination.clone(),
        },
        Some(_) if destination.is_public_auth() => RouteDecision::RedirectToDashboard,
        Some(_) if !onboarding_completed && *destination != Destination::Onboarding => {
            RouteDecision::RedirectToOnboarding
        }
        Some(_) => RouteDecision::Render,
    }
}
