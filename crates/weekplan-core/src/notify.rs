//! Notification sink.
//!
//! Every notification produces a transient in-app toast; system-level
//! delivery is an optional extra behind a capability-gated backend.
//! System delivery failures are swallowed: the toast already satisfied
//! the user-visible contract.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::storage::Gateway;
use crate::store::Settings;

/// Platform notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    Granted,
    Denied,
    /// Not yet decided; the user can still be prompted once.
    #[default]
    Default,
}

#[derive(Error, Debug)]
#[error("notification delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Platform notification API.
pub trait SystemBackend {
    fn supported(&self) -> bool;
    fn permission(&self) -> Permission;
    /// Prompt the user and return the resulting permission.
    fn request_permission(&mut self) -> Permission;
    fn deliver(&mut self, title: &str, body: &str) -> Result<(), DeliveryError>;
}

/// Desktop backend using the host notification daemon. Desktop
/// platforms have no permission prompt, so the capability is always
/// granted and failures only surface at delivery time.
#[derive(Debug, Default)]
pub struct DesktopBackend;

impl SystemBackend for DesktopBackend {
    fn supported(&self) -> bool {
        true
    }

    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&mut self) -> Permission {
        Permission::Granted
    }

    fn deliver(&mut self, title: &str, body: &str) -> Result<(), DeliveryError> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| DeliveryError(e.to_string()))
    }
}

/// Recording backend for tests: scriptable permission, shared handle to
/// the delivered notifications.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    pub supported: bool,
    pub permission: Permission,
    /// Permission handed out when the user is prompted.
    pub on_request: Permission,
    pub delivered: Rc<RefCell<Vec<(String, String)>>>,
}

impl MemoryBackend {
    pub fn granted() -> Self {
        Self {
            supported: true,
            permission: Permission::Granted,
            on_request: Permission::Granted,
            delivered: Rc::default(),
        }
    }
}

impl SystemBackend for MemoryBackend {
    fn supported(&self) -> bool {
        self.supported
    }

    fn permission(&self) -> Permission {
        self.permission
    }

    fn request_permission(&mut self) -> Permission {
        self.permission = self.on_request;
        self.permission
    }

    fn deliver(&mut self, title: &str, body: &str) -> Result<(), DeliveryError> {
        self.delivered
            .borrow_mut()
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

/// An in-app toast. Showing a new toast replaces the current one and
/// restarts its dismissal clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub warning: bool,
    pub shown_at: NaiveDateTime,
}

/// The notification sink: toast state plus the optional system backend.
pub struct Notifier {
    backend: Box<dyn SystemBackend>,
    toast: Option<Toast>,
    toast_duration: chrono::Duration,
}

impl Notifier {
    pub fn new(backend: Box<dyn SystemBackend>, toast_duration_ms: u64) -> Self {
        Self {
            backend,
            toast: None,
            toast_duration: chrono::Duration::milliseconds(toast_duration_ms as i64),
        }
    }

    /// Show a toast, replacing any current one.
    pub fn toast(&mut self, now: NaiveDateTime, message: &str, warning: bool) {
        self.toast = Some(Toast {
            message: message.to_string(),
            warning,
            shown_at: now,
        });
    }

    /// The currently visible toast, if it hasn't auto-dismissed yet.
    pub fn current_toast(&self, now: NaiveDateTime) -> Option<&Toast> {
        self.toast
            .as_ref()
            .filter(|t| now - t.shown_at < self.toast_duration)
    }

    /// Deliver a notification: always a toast, plus a system
    /// notification iff `enabled` and the platform permission is
    /// granted. Platform failures are logged and swallowed.
    pub fn notify(&mut self, now: NaiveDateTime, enabled: bool, title: &str, body: &str) {
        let message = if body.is_empty() { title } else { body };
        self.toast(now, message, false);

        if enabled && self.backend.supported() && self.backend.permission() == Permission::Granted
        {
            if let Err(e) = self.backend.deliver(title, body) {
                tracing::debug!(error = %e, "system notification failed, toast shown instead");
            }
        }
    }

    /// Toggle the notification opt-in, prompting for platform
    /// permission when it is still undecided. Returns the new enabled
    /// state; the outcome is reported through a toast either way.
    pub fn toggle(
        &mut self,
        now: NaiveDateTime,
        settings: &mut Settings,
        gateway: &dyn Gateway,
    ) -> bool {
        if !self.backend.supported() {
            self.toast(now, "Notifications are not supported on this platform.", true);
            return settings.notifications_enabled();
        }
        match self.backend.permission() {
            Permission::Granted => {
                let enabled = !settings.notifications_enabled();
                settings.set_notifications_enabled(gateway, enabled);
                let message = if enabled {
                    "Reminders enabled."
                } else {
                    "Reminders disabled."
                };
                self.toast(now, message, false);
            }
            Permission::Denied => {
                self.toast(now, "Notification permission denied.", true);
            }
            Permission::Default => {
                let granted = self.backend.request_permission() == Permission::Granted;
                settings.set_notifications_enabled(gateway, granted);
                if granted {
                    self.toast(now, "Reminders enabled!", false);
                } else {
                    self.toast(now, "Permission denied.", true);
                }
            }
        }
        settings.notifications_enabled()
    }
}
