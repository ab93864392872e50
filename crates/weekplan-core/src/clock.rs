//! Clock abstraction.
//!
//! All time math in the crate funnels through [`Clock`] so that the
//! scheduler, week calculator and stores can be exercised in tests with
//! a controlled wall clock. Times are host-local naive timestamps; the
//! planner does no timezone conversion.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, NaiveDateTime};

/// Source of "now" as local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Production clock backed by the host clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Settable clock for tests. Cloned handles share the same instant, so a
/// test can keep one handle and hand another to the component under test.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.now.set(at);
    }

    pub fn advance(&self, delta: chrono::Duration) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn manual_clock_handles_share_time() {
        let start = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();

        handle.advance(chrono::Duration::minutes(15));
        assert_eq!(clock.now(), start + chrono::Duration::minutes(15));
    }
}
