//! Pinned reminder store.

use chrono::NaiveDateTime;

use crate::error::ValidationError;
use crate::model::{new_id, Pin};
use crate::storage::{keys, Gateway};

/// Ordered collection of pinned reminders, persisted under the `pins`
/// key. A pin is consumed the first time the scheduler takes it as due;
/// pins whose time has already passed stay listed until removed by hand.
#[derive(Debug, Default)]
pub struct PinStore {
    pins: Vec<Pin>,
}

impl PinStore {
    /// Load from the gateway; missing, unreadable or corrupt data yields
    /// an empty store.
    pub fn load(gateway: &dyn Gateway) -> Self {
        let pins = match gateway.get(keys::PINS) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "corrupt pin collection, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load pins, starting empty");
                Vec::new()
            }
        };
        Self { pins }
    }

    fn persist(&self, gateway: &dyn Gateway) {
        match serde_json::to_string(&self.pins) {
            Ok(json) => {
                if let Err(e) = gateway.set(keys::PINS, &json) {
                    tracing::warn!(error = %e, "failed to save pins");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode pins"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pin> {
        self.pins.iter()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Add a pin and persist. Returns the new record.
    pub fn add(
        &mut self,
        gateway: &dyn Gateway,
        title: &str,
        remind_at: NaiveDateTime,
    ) -> Result<Pin, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::invalid("title", "must not be empty"));
        }
        let pin = Pin {
            id: new_id(),
            title: title.to_string(),
            remind_at,
        };
        self.pins.push(pin.clone());
        self.persist(gateway);
        Ok(pin)
    }

    /// Remove the matching pin; idempotent if not found.
    pub fn remove(&mut self, gateway: &dyn Gateway, id: &str) -> bool {
        let before = self.pins.len();
        self.pins.retain(|p| p.id != id);
        let removed = self.pins.len() != before;
        if removed {
            self.persist(gateway);
        }
        removed
    }

    /// Remove and return every pin inside the firing window:
    /// `0 < remind_at - now <= window`. Pins already in the past are
    /// left alone.
    pub fn take_due(
        &mut self,
        gateway: &dyn Gateway,
        now: NaiveDateTime,
        window: chrono::Duration,
    ) -> Vec<Pin> {
        let (due, rest): (Vec<Pin>, Vec<Pin>) = self.pins.drain(..).partition(|p| {
            let until = p.remind_at - now;
            until > chrono::Duration::zero() && until <= window
        });
        self.pins = rest;
        if !due.is_empty() {
            self.persist(gateway);
        }
        due
    }
}
