//! Record types stored by the planner.
//!
//! Serde uses camelCase field names so that collections written by
//! earlier versions of the stored JSON (including week-untagged slots)
//! keep loading unchanged.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A study slot on the weekly timetable.
///
/// `day` indexes the week, 0 = Sunday through 6 = Saturday. `week_start`
/// is the date of day 0 of the concrete week the slot belongs to; a slot
/// without it predates week tagging and is treated as belonging to the
/// real current week whenever it is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySlot {
    pub id: String,
    pub day: u8,
    pub start: NaiveTime,
    /// Duration in minutes, always positive.
    pub duration: u32,
    pub subject: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub week_start: Option<NaiveDate>,
}

impl StudySlot {
    /// Start of the slot as minutes since midnight.
    pub fn start_minute(&self) -> u32 {
        use chrono::Timelike;
        self.start.hour() * 60 + self.start.minute()
    }

    /// The week this slot belongs to, falling back to `current_week` for
    /// slots created before week tagging existed.
    pub fn effective_week(&self, current_week: NaiveDate) -> NaiveDate {
        self.week_start.unwrap_or(current_week)
    }
}

/// A pinned reminder. Consumed (removed) the first time the scheduler
/// observes it inside the firing window; may be removed manually before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pin {
    pub id: String,
    pub title: String,
    pub remind_at: NaiveDateTime,
}

/// Fresh opaque record id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
