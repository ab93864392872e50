//! Events produced by the scheduler and the focus timer.
//!
//! The app layer logs them; the CLI prints them as JSON.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A pinned reminder entered its firing window and was consumed.
    ReminderFired { title: String, at: NaiveDateTime },
    /// A study slot became active for the current minute.
    StudyNowStarted { at: NaiveDateTime },
    /// No study slot is active any more.
    StudyNowEnded { at: NaiveDateTime },
    TimerStarted {
        duration_secs: u32,
        at: NaiveDateTime,
    },
    TimerPaused {
        remaining_secs: u32,
        at: NaiveDateTime,
    },
    TimerResumed {
        remaining_secs: u32,
        at: NaiveDateTime,
    },
    TimerReset { at: NaiveDateTime },
    /// Countdown reached zero; the timer rearmed itself at its
    /// configured duration.
    TimerFinished { at: NaiveDateTime },
}
