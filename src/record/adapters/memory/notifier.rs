//! Notifier that keeps every notification for later inspection.

use std::sync::{Arc, RwLock};

use crate::record::ports::{Notification, Notifier};

/// Thread-safe notifier recording delivered notifications in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    delivered: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates a notifier with no recorded notifications.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every notification delivered so far.
    #[must_use]
    pub fn delivered(&self) -> Vec<Notification> {
        self.delivered
            .read()
            .map(|delivered| delivered.clone())
            .unwrap_or_default()
    }

    /// Returns only the error notifications delivered so far.
    #[must_use]
    pub fn errors(&self) -> Vec<Notification> {
        self.delivered()
            .into_iter()
            .filter(Notification::is_error)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        if let Ok(mut delivered) = self.delivered.write() {
            delivered.push(notification);
        }
    }
}
