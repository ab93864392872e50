//! Persisted scalar settings.
//!
//! Unlike the record collections these are stored as plain scalars:
//! `weekOffset` as a decimal string, `notifications` as the literal
//! `"true"` or `"false"`.

use crate::storage::{keys, Gateway};

/// Process-wide persisted settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    week_offset: i32,
    notifications_enabled: bool,
}

impl Settings {
    /// Load from the gateway, falling back to defaults per key.
    pub fn load(gateway: &dyn Gateway) -> Self {
        let week_offset = gateway
            .get(keys::WEEK_OFFSET)
            .ok()
            .flatten()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0);
        let notifications_enabled = matches!(
            gateway.get(keys::NOTIFICATIONS).ok().flatten().as_deref(),
            Some("true")
        );
        Self {
            week_offset,
            notifications_enabled,
        }
    }

    /// How many weeks the timetable view is shifted from the real
    /// current week. Unbounded in both directions.
    pub fn week_offset(&self) -> i32 {
        self.week_offset
    }

    pub fn set_week_offset(&mut self, gateway: &dyn Gateway, offset: i32) {
        self.week_offset = offset;
        if let Err(e) = gateway.set(keys::WEEK_OFFSET, &offset.to_string()) {
            tracing::warn!(error = %e, "failed to save week offset");
        }
    }

    /// Whether the notifier may escalate from toast to system
    /// notification.
    pub fn notifications_enabled(&self) -> bool {
        self.notifications_enabled
    }

    pub fn set_notifications_enabled(&mut self, gateway: &dyn Gateway, enabled: bool) {
        self.notifications_enabled = enabled;
        let value = if enabled { "true" } else { "false" };
        if let Err(e) = gateway.set(keys::NOTIFICATIONS, value) {
            tracing::warn!(error = %e, "failed to save notification setting");
        }
    }
}
