//! Notification sink that writes to the log.

use crate::infrastructure::ports::NotificationSink;

/// Emits every notice as a tracing event. Used by the CLI, where the log is
/// the only place a user sees warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl NotificationSink for TracingNotifier {
    fn warn(&self, message: &str) {
        tracing::warn!(notice = %message, "User warning");
    }
}
