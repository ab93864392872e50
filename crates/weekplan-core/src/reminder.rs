//! Reminder and study-now scheduling.
//!
//! The scheduler has no internal timers; the caller drives it by
//! polling, like the timer engine. A pin fires exactly when a poll
//! observes it inside the lookahead window, so with a 60 second window
//! polled every 30 seconds each pin gets at least one and at most two
//! polls that can see it. That tolerance replaces precise alarms on
//! purpose.
//!
//! ## Pin lifecycle
//!
//! ```text
//! PENDING -> FIRED_AND_REMOVED   (observed inside the window)
//! PENDING -> DELETED             (manual removal)
//! ```
//!
//! Both transitions are terminal; there is no snooze and no re-fire.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::events::Event;
use crate::storage::Gateway;
use crate::store::{PinStore, SlotStore};
use crate::week::week_dates;

/// Result of one study-now poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyNowStatus {
    /// Whether a slot is active right now; the banner mirrors this
    /// unconditionally on every poll.
    pub active: bool,
    /// Whether this poll should escalate to a system notification.
    pub escalate: bool,
}

/// True iff some slot in the real current week covers the current
/// minute on the current day and is not done. The viewed week offset
/// never affects this; it always evaluates at offset zero.
///
/// Minute arithmetic is not wrapped at midnight: a slot whose duration
/// would run past 24:00 simply stops counting as active at 24:00.
pub fn has_active_slot_now(slots: &SlotStore, now: NaiveDateTime) -> bool {
    let today = now.date();
    let current_key = week_dates(today, 0)[0];
    let day = today.weekday().num_days_from_sunday() as u8;
    let minute = now.time().hour() * 60 + now.time().minute();

    slots.iter().any(|slot| {
        if slot.effective_week(current_key) != current_key || slot.day != day || slot.done {
            return false;
        }
        let start = slot.start_minute();
        // Saturate: a duration near u32::MAX must not overflow the end
        // minute, it just runs to midnight like any long slot.
        minute >= start && minute < start.saturating_add(slot.duration)
    })
}

/// Polling scheduler for pins and the study-now banner.
///
/// The only state it holds is the debounce timestamp for study-now
/// escalation, which is deliberately session-local: a restart may
/// escalate again immediately.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    last_escalation: Option<NaiveDateTime>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every pending pin inside `window`. Fired pins are removed
    /// from the store (persisted) and reported as events; the caller
    /// routes them to the notification sink.
    pub fn poll_pins(
        &mut self,
        pins: &mut PinStore,
        gateway: &dyn Gateway,
        now: NaiveDateTime,
        window: chrono::Duration,
    ) -> Vec<Event> {
        pins.take_due(gateway, now, window)
            .into_iter()
            .map(|pin| Event::ReminderFired {
                title: pin.title,
                at: now,
            })
            .collect()
    }

    /// Recompute the banner state and decide whether to escalate.
    ///
    /// Escalation requires an active slot, `enabled == true`, and more
    /// than `debounce` since the previous escalation, so one long slot
    /// produces a single system notification while the banner keeps
    /// showing on every poll.
    pub fn poll_study_now(
        &mut self,
        slots: &SlotStore,
        now: NaiveDateTime,
        enabled: bool,
        debounce: chrono::Duration,
    ) -> StudyNowStatus {
        let active = has_active_slot_now(slots, now);
        if !active || !enabled {
            return StudyNowStatus {
                active,
                escalate: false,
            };
        }
        let due = self
            .last_escalation
            .map_or(true, |last| now - last > debounce);
        if due {
            self.last_escalation = Some(now);
        }
        StudyNowStatus {
            active,
            escalate: due,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryGateway;
    use chrono::{NaiveDate, NaiveTime};

    // Monday 2026-03-02; the week starts Sunday 2026-03-01.
    fn monday(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn week() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn store_with_slot(gw: &MemoryGateway, done: bool) -> SlotStore {
        let mut store = SlotStore::load(gw);
        let slot = store
            .create(gw, 1, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, "Maths", week())
            .unwrap();
        if done {
            store.toggle_done(gw, &slot.id);
        }
        store
    }

    #[test]
    fn active_slot_boundaries() {
        let gw = MemoryGateway::new();
        let store = store_with_slot(&gw, false);

        assert!(!has_active_slot_now(&store, monday(8, 59)));
        assert!(has_active_slot_now(&store, monday(9, 0)));
        assert!(has_active_slot_now(&store, monday(9, 15)));
        assert!(!has_active_slot_now(&store, monday(9, 30)));
    }

    #[test]
    fn huge_duration_does_not_overflow() {
        let gw = MemoryGateway::new();
        let mut store = SlotStore::load(&gw);
        store
            .create(&gw, 1, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), u32::MAX, "Marathon", week())
            .unwrap();

        assert!(!has_active_slot_now(&store, monday(8, 59)));
        assert!(has_active_slot_now(&store, monday(9, 0)));
        assert!(has_active_slot_now(&store, monday(23, 59)));
    }

    #[test]
    fn done_slot_is_never_active() {
        let gw = MemoryGateway::new();
        let store = store_with_slot(&gw, true);
        assert!(!has_active_slot_now(&store, monday(9, 15)));
    }

    #[test]
    fn other_days_and_weeks_are_not_active() {
        let gw = MemoryGateway::new();
        let mut store = SlotStore::load(&gw);
        // Tuesday slot, and a slot pinned to next week's Monday.
        store
            .create(&gw, 2, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, "Tue", week())
            .unwrap();
        store
            .create(
                &gw,
                1,
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                30,
                "Next week",
                NaiveDate::from_ymd_opt(2026, 3, 8).unwrap(),
            )
            .unwrap();
        assert!(!has_active_slot_now(&store, monday(9, 15)));
    }

    #[test]
    fn pin_fires_once_inside_window() {
        let gw = MemoryGateway::new();
        let mut pins = PinStore::load(&gw);
        let now = monday(12, 0);
        pins.add(&gw, "Call the tutor", now + chrono::Duration::seconds(45))
            .unwrap();

        let mut sched = ReminderScheduler::new();
        let window = chrono::Duration::seconds(60);
        let events = sched.poll_pins(&mut pins, &gw, now, window);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            Event::ReminderFired { title, .. } if title == "Call the tutor"
        ));
        assert!(pins.is_empty());

        // A second poll sees nothing.
        let events = sched.poll_pins(&mut pins, &gw, now + chrono::Duration::seconds(30), window);
        assert!(events.is_empty());
    }

    #[test]
    fn far_future_pin_does_not_fire() {
        let gw = MemoryGateway::new();
        let mut pins = PinStore::load(&gw);
        let now = monday(12, 0);
        pins.add(&gw, "Later", now + chrono::Duration::seconds(120))
            .unwrap();

        let mut sched = ReminderScheduler::new();
        let events = sched.poll_pins(&mut pins, &gw, now, chrono::Duration::seconds(60));
        assert!(events.is_empty());
        assert_eq!(pins.len(), 1);
    }

    #[test]
    fn escalation_is_debounced_but_banner_is_not() {
        let gw = MemoryGateway::new();
        let store = store_with_slot(&gw, false);
        let mut sched = ReminderScheduler::new();
        let debounce = chrono::Duration::seconds(60);

        let first = sched.poll_study_now(&store, monday(9, 1), true, debounce);
        assert!(first.active && first.escalate);

        let second = sched.poll_study_now(&store, monday(9, 2), true, debounce);
        assert!(second.active);
        assert!(!second.escalate);

        let third = sched.poll_study_now(&store, monday(9, 3), true, debounce);
        assert!(third.active && third.escalate);
    }

    #[test]
    fn disabled_notifications_never_escalate() {
        let gw = MemoryGateway::new();
        let store = store_with_slot(&gw, false);
        let mut sched = ReminderScheduler::new();

        let status =
            sched.poll_study_now(&store, monday(9, 1), false, chrono::Duration::seconds(60));
        assert!(status.active);
        assert!(!status.escalate);
    }
}
