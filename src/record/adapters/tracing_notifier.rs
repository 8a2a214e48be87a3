//! Notifier that forwards notifications to the `tracing` pipeline.

use tracing::{error, info};

use crate::record::ports::{Notification, NotificationLevel, Notifier};

/// Notifier emitting each notification as a structured log event.
///
/// Useful as the default sink when no interactive surface is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Error => error!(
                title = %notification.title,
                message = %notification.message,
                "user notification"
            ),
            NotificationLevel::Success | NotificationLevel::Info => info!(
                level = %notification.level,
                title = %notification.title,
                message = %notification.message,
                "user notification"
            ),
        }
    }
}
