//! Log-backed notification adapter.
//!
//! Stands in for a toast surface in headless builds and tests; a UI shell
//! provides its own [`NotificationPort`] implementation.

use async_trait::async_trait;
use bp_core::ports::{NotificationKind, NotificationPort};

#[derive(Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationPort for LogNotifier {
    async fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => log::info!("notify: {message}"),
            NotificationKind::Error => log::warn!("notify: {message}"),
        }
    }
}
