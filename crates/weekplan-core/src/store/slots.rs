//! Study slot store.

use chrono::{NaiveDate, NaiveTime};

use crate::error::ValidationError;
use crate::model::{new_id, StudySlot};
use crate::storage::{keys, Gateway};

/// Partial update for [`SlotStore::update`]. Unset fields keep their
/// current value.
#[derive(Debug, Clone, Default)]
pub struct SlotPatch {
    pub day: Option<u8>,
    pub start: Option<NaiveTime>,
    pub duration: Option<u32>,
    pub subject: Option<String>,
    pub week_start: Option<NaiveDate>,
}

/// Ordered collection of study slots, persisted under the `slots` key.
#[derive(Debug, Default)]
pub struct SlotStore {
    slots: Vec<StudySlot>,
}

impl SlotStore {
    /// Load from the gateway; missing, unreadable or corrupt data yields
    /// an empty store.
    pub fn load(gateway: &dyn Gateway) -> Self {
        let slots = match gateway.get(keys::SLOTS) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "corrupt slot collection, starting empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to load slots, starting empty");
                Vec::new()
            }
        };
        Self { slots }
    }

    fn persist(&self, gateway: &dyn Gateway) {
        match serde_json::to_string(&self.slots) {
            Ok(json) => {
                if let Err(e) = gateway.set(keys::SLOTS, &json) {
                    tracing::warn!(error = %e, "failed to save slots");
                }
            }
            Err(e) => tracing::warn!(error = %e, "failed to encode slots"),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StudySlot> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&StudySlot> {
        self.slots.iter().find(|s| s.id == id)
    }

    /// Create a slot, append it and persist. Returns the new record.
    pub fn create(
        &mut self,
        gateway: &dyn Gateway,
        day: u8,
        start: NaiveTime,
        duration: u32,
        subject: &str,
        week_start: NaiveDate,
    ) -> Result<StudySlot, ValidationError> {
        let subject = subject.trim();
        validate_day(day)?;
        validate_duration(duration)?;
        validate_subject(subject)?;

        let slot = StudySlot {
            id: new_id(),
            day,
            start,
            duration,
            subject: subject.to_string(),
            done: false,
            week_start: Some(week_start),
        };
        self.slots.push(slot.clone());
        self.persist(gateway);
        Ok(slot)
    }

    /// Overwrite the given fields in place and persist.
    ///
    /// Returns `Ok(false)` when the id is unknown: stale ids from an
    /// out-of-date view are a benign no-op, not an error.
    pub fn update(
        &mut self,
        gateway: &dyn Gateway,
        id: &str,
        patch: SlotPatch,
    ) -> Result<bool, ValidationError> {
        if let Some(day) = patch.day {
            validate_day(day)?;
        }
        if let Some(duration) = patch.duration {
            validate_duration(duration)?;
        }
        if let Some(ref subject) = patch.subject {
            validate_subject(subject.trim())?;
        }

        let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        if let Some(day) = patch.day {
            slot.day = day;
        }
        if let Some(start) = patch.start {
            slot.start = start;
        }
        if let Some(duration) = patch.duration {
            slot.duration = duration;
        }
        if let Some(subject) = patch.subject {
            slot.subject = subject.trim().to_string();
        }
        if let Some(week_start) = patch.week_start {
            slot.week_start = Some(week_start);
        }
        self.persist(gateway);
        Ok(true)
    }

    /// Remove the matching record; idempotent if not found.
    pub fn delete(&mut self, gateway: &dyn Gateway, id: &str) -> bool {
        let before = self.slots.len();
        self.slots.retain(|s| s.id != id);
        let removed = self.slots.len() != before;
        if removed {
            self.persist(gateway);
        }
        removed
    }

    /// Flip the `done` flag. Returns the new value, or `None` for an
    /// unknown id.
    pub fn toggle_done(&mut self, gateway: &dyn Gateway, id: &str) -> Option<bool> {
        let slot = self.slots.iter_mut().find(|s| s.id == id)?;
        slot.done = !slot.done;
        let done = slot.done;
        self.persist(gateway);
        Some(done)
    }

    /// Slots belonging to `week_key`. Week-untagged slots belong to the
    /// real current week only, so they disappear once the viewed week
    /// moves away from it.
    pub fn slots_for_week(
        &self,
        week_key: NaiveDate,
        current_week_key: NaiveDate,
    ) -> Vec<&StudySlot> {
        self.slots
            .iter()
            .filter(|s| s.effective_week(current_week_key) == week_key)
            .collect()
    }
}

fn validate_day(day: u8) -> Result<(), ValidationError> {
    if day > 6 {
        return Err(ValidationError::invalid("day", "must be between 0 and 6"));
    }
    Ok(())
}

fn validate_duration(duration: u32) -> Result<(), ValidationError> {
    if duration == 0 {
        return Err(ValidationError::invalid("duration", "must be positive"));
    }
    Ok(())
}

fn validate_subject(subject: &str) -> Result<(), ValidationError> {
    if subject.is_empty() {
        return Err(ValidationError::invalid("subject", "must not be empty"));
    }
    Ok(())
}
