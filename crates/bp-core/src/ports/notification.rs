//! User notification port.

use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Fire-and-forget user-visible notifications (toasts).
///
/// The session store is the only caller for its own mutations — exactly one
/// notification per mutating operation — so presentation layers must not
/// re-notify on the same outcome.
#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn notify(&self, kind: NotificationKind, message: &str);
}
