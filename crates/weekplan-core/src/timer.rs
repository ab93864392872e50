//! Focus timer.
//!
//! A wall-clock countdown state machine with no internal thread: the
//! caller ticks it, normally once a second. Elapsed time is computed
//! from timestamps, so missed ticks never lose time.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle (finished/reset)
//! ```
//!
//! When the countdown reaches zero the timer rearms at its configured
//! duration and reports the completion; the caller routes that to the
//! notifier.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::events::Event;

pub const DEFAULT_FOCUS_SECS: u32 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Countdown timer. Serializable so the CLI can park it in the
/// key-value store between invocations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    duration_secs: u32,
    remaining_secs: u32,
    state: TimerState,
    /// When the countdown was last advanced; `None` unless running.
    #[serde(default)]
    last_tick: Option<NaiveDateTime>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS)
    }
}

impl FocusTimer {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs: duration_secs.max(1),
            remaining_secs: duration_secs.max(1),
            state: TimerState::Idle,
            last_tick: None,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// `"MM:SS"` display of the remaining time.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }

    /// Replace the countdown duration, stopping any current run.
    pub fn set_duration(&mut self, duration_secs: u32) {
        self.duration_secs = duration_secs.max(1);
        self.remaining_secs = self.duration_secs;
        self.state = TimerState::Idle;
        self.last_tick = None;
    }

    pub fn start(&mut self, now: NaiveDateTime) -> Option<Event> {
        match self.state {
            TimerState::Idle => {
                self.state = TimerState::Running;
                self.last_tick = Some(now);
                Some(Event::TimerStarted {
                    duration_secs: self.remaining_secs,
                    at: now,
                })
            }
            TimerState::Paused => self.resume(now),
            TimerState::Running => None,
        }
    }

    pub fn pause(&mut self, now: NaiveDateTime) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        self.state = TimerState::Paused;
        self.last_tick = None;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: now,
        })
    }

    pub fn resume(&mut self, now: NaiveDateTime) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        self.last_tick = Some(now);
        Some(Event::TimerResumed {
            remaining_secs: self.remaining_secs,
            at: now,
        })
    }

    /// Stop and rearm at the configured duration.
    pub fn reset(&mut self, now: NaiveDateTime) -> Event {
        self.state = TimerState::Idle;
        self.remaining_secs = self.duration_secs;
        self.last_tick = None;
        Event::TimerReset { at: now }
    }

    /// Advance the countdown. Returns the completion event when the
    /// countdown reaches zero; the timer is then idle and rearmed.
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(now);
        if self.remaining_secs == 0 {
            self.state = TimerState::Idle;
            self.remaining_secs = self.duration_secs;
            self.last_tick = None;
            return Some(Event::TimerFinished { at: now });
        }
        None
    }

    fn flush_elapsed(&mut self, now: NaiveDateTime) {
        if let Some(last) = self.last_tick {
            let elapsed = (now - last).num_seconds().max(0) as u32;
            self.remaining_secs = self.remaining_secs.saturating_sub(elapsed);
            self.last_tick = Some(now);
        }
    }
}
