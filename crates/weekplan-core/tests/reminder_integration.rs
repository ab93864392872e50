//! Reminder firing and study-now escalation through the [`App`] facade.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use weekplan_core::storage::{Config, MemoryGateway};
use weekplan_core::{App, Clock, Event, ManualClock, MemoryBackend};

fn monday(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

struct Harness {
    app: App,
    clock: ManualClock,
    delivered: std::rc::Rc<std::cell::RefCell<Vec<(String, String)>>>,
}

fn harness(at: NaiveDateTime) -> Harness {
    let clock = ManualClock::new(at);
    let backend = MemoryBackend::granted();
    let delivered = backend.delivered.clone();
    let app = App::new(
        Box::new(MemoryGateway::new()),
        Box::new(clock.clone()),
        Box::new(backend),
        Config::default(),
    );
    Harness {
        app,
        clock,
        delivered,
    }
}

#[test]
fn pin_fires_inside_the_window_and_is_consumed() {
    let mut h = harness(monday(12, 0));
    h.app.toggle_notifications();
    h.app
        .add_pin("Call the tutor", monday(12, 0) + Duration::seconds(45))
        .unwrap();

    let events = h.app.poll_pins();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        &events[0],
        Event::ReminderFired { title, .. } if title == "Call the tutor"
    ));
    assert!(h.app.pins.is_empty());

    // System delivery plus an in-app toast.
    assert_eq!(
        *h.delivered.borrow(),
        vec![("Weekplan reminder".to_string(), "Call the tutor".to_string())]
    );
    let toast = h.app.notifier.current_toast(h.clock.now()).unwrap();
    assert_eq!(toast.message, "Call the tutor");

    // The next poll sees nothing.
    h.clock.advance(Duration::seconds(30));
    assert!(h.app.poll_pins().is_empty());
}

#[test]
fn pin_outside_the_window_waits_for_a_later_poll() {
    let mut h = harness(monday(12, 0));
    h.app
        .add_pin("Review notes", monday(12, 0) + Duration::seconds(120))
        .unwrap();

    assert!(h.app.poll_pins().is_empty());
    assert_eq!(h.app.pins.len(), 1);

    h.clock.advance(Duration::seconds(90));
    let events = h.app.poll_pins();
    assert_eq!(events.len(), 1);
    assert!(h.app.pins.is_empty());
}

#[test]
fn removed_pin_never_fires() {
    let mut h = harness(monday(12, 0));
    let pin = h
        .app
        .add_pin("Cancelled", monday(12, 0) + Duration::seconds(30))
        .unwrap();
    assert!(h.app.remove_pin(&pin.id));

    assert!(h.app.poll_pins().is_empty());
}

#[test]
fn study_now_banner_tracks_the_active_slot() {
    let mut h = harness(monday(8, 0));
    h.app
        .add_slot(1, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, "Maths")
        .unwrap();
    assert!(!h.app.study_banner());

    h.clock.set(monday(8, 59));
    assert!(!h.app.poll_study_now().active);

    h.clock.set(monday(9, 0));
    assert!(h.app.poll_study_now().active);
    assert!(h.app.study_banner());

    h.clock.set(monday(9, 30));
    assert!(!h.app.poll_study_now().active);
    assert!(!h.app.study_banner());
}

#[test]
fn escalation_happens_once_per_debounce_window() {
    let mut h = harness(monday(8, 0));
    h.app.toggle_notifications();
    h.app
        .add_slot(1, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, "Maths")
        .unwrap();

    h.clock.set(monday(9, 1));
    assert!(h.app.poll_study_now().escalate);
    assert_eq!(h.delivered.borrow().len(), 1);
    assert_eq!(h.delivered.borrow()[0].0, "Time is running!");

    // One minute later the debounce still holds.
    h.clock.set(monday(9, 2));
    let status = h.app.poll_study_now();
    assert!(status.active);
    assert!(!status.escalate);
    assert_eq!(h.delivered.borrow().len(), 1);

    h.clock.set(monday(9, 3));
    assert!(h.app.poll_study_now().escalate);
    assert_eq!(h.delivered.borrow().len(), 2);
}

#[test]
fn disabled_notifications_keep_the_banner_but_never_escalate() {
    let mut h = harness(monday(8, 0));
    h.app
        .add_slot(1, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, "Maths")
        .unwrap();

    h.clock.set(monday(9, 5));
    let status = h.app.poll_study_now();
    assert!(status.active);
    assert!(!status.escalate);
    assert!(h.delivered.borrow().is_empty());
}

#[test]
fn completing_the_slot_clears_the_banner_immediately() {
    let mut h = harness(monday(9, 5));
    let slot = h
        .app
        .add_slot(1, NaiveTime::from_hms_opt(9, 0, 0).unwrap(), 30, "Maths")
        .unwrap();
    assert!(h.app.study_banner());

    h.app.toggle_done(&slot.id).unwrap();
    assert!(!h.app.study_banner());
}

#[test]
fn finished_timer_notifies() {
    let mut h = harness(monday(10, 0));
    h.app.toggle_notifications();
    h.app.timer.set_duration(60);
    h.app.timer.start(h.clock.now());

    h.clock.advance(Duration::seconds(30));
    assert!(h.app.tick_timer().is_none());

    h.clock.advance(Duration::seconds(31));
    let event = h.app.tick_timer();
    assert!(matches!(event, Some(Event::TimerFinished { .. })));
    assert_eq!(h.delivered.borrow().last().unwrap().0, "Time's up!");
}
