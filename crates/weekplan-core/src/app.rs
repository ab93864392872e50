//! Application context.
//!
//! [`App`] owns the gateway, the clock, every store and the schedulers,
//! replacing scattered globals with one explicitly constructed object.
//! All periodic work runs on a single cooperative task driven by
//! [`App::run`]; each poll runs to completion before the next event is
//! processed, so no locking is needed anywhere in the core.

use std::io::Write;
use std::time::Duration as StdDuration;

use chrono::{NaiveDate, NaiveTime};
use tokio::sync::watch;

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, ValidationError};
use crate::events::Event;
use crate::grid::{self, WeekGrid};
use crate::model::{Pin, StudySlot};
use crate::notify::{DesktopBackend, Notifier, SystemBackend};
use crate::reminder::{self, ReminderScheduler, StudyNowStatus};
use crate::storage::{Config, Database, Gateway};
use crate::store::{PinStore, Settings, SlotPatch, SlotStore};
use crate::timer::FocusTimer;
use crate::week::{week_dates, week_key};
use crate::export;

/// The assembled application: stores, settings, scheduler, notifier
/// and the focus timer, all sharing one persistence gateway and one
/// clock.
pub struct App {
    gateway: Box<dyn Gateway>,
    clock: Box<dyn Clock>,
    config: Config,
    pub slots: SlotStore,
    pub pins: PinStore,
    pub settings: Settings,
    pub notifier: Notifier,
    pub timer: FocusTimer,
    scheduler: ReminderScheduler,
    study_banner: bool,
}

impl App {
    /// Open the production app: SQLite gateway, host clock, desktop
    /// notification backend.
    pub fn open() -> Result<Self, CoreError> {
        let db = Database::open()?;
        let config = Config::load_or_default();
        Ok(Self::new(
            Box::new(db),
            Box::new(SystemClock),
            Box::new(DesktopBackend),
            config,
        ))
    }

    /// Assemble an app from explicit parts. Tests pass a
    /// [`MemoryGateway`](crate::storage::MemoryGateway), a
    /// [`ManualClock`](crate::clock::ManualClock) and a recording
    /// backend.
    pub fn new(
        gateway: Box<dyn Gateway>,
        clock: Box<dyn Clock>,
        backend: Box<dyn SystemBackend>,
        config: Config,
    ) -> Self {
        let slots = SlotStore::load(gateway.as_ref());
        let pins = PinStore::load(gateway.as_ref());
        let settings = Settings::load(gateway.as_ref());
        let notifier = Notifier::new(backend, config.notify.toast_duration_ms);
        let study_banner = reminder::has_active_slot_now(&slots, clock.now());
        Self {
            gateway,
            clock,
            config,
            slots,
            pins,
            settings,
            notifier,
            timer: FocusTimer::default(),
            scheduler: ReminderScheduler::new(),
            study_banner,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn gateway(&self) -> &dyn Gateway {
        self.gateway.as_ref()
    }

    pub fn now(&self) -> chrono::NaiveDateTime {
        self.clock.now()
    }

    /// Whether the "study now" banner is currently showing.
    pub fn study_banner(&self) -> bool {
        self.study_banner
    }

    // ── Timetable ────────────────────────────────────────────────────

    /// The key of the week currently being viewed.
    pub fn viewed_week_key(&self) -> NaiveDate {
        let dates = week_dates(self.clock.now().date(), self.settings.week_offset());
        week_key(&dates)
    }

    /// Render the viewed week.
    pub fn grid(&self) -> WeekGrid {
        grid::build(
            &self.slots,
            self.clock.now().date(),
            self.settings.week_offset(),
            &self.config.grid,
        )
    }

    /// Create a slot in the week currently being viewed.
    pub fn add_slot(
        &mut self,
        day: u8,
        start: NaiveTime,
        duration: u32,
        subject: &str,
    ) -> Result<StudySlot, ValidationError> {
        let week = self.viewed_week_key();
        let slot = self
            .slots
            .create(self.gateway.as_ref(), day, start, duration, subject, week)?;
        tracing::info!(id = %slot.id, subject = %slot.subject, "slot created");
        self.refresh_banner();
        Ok(slot)
    }

    pub fn update_slot(&mut self, id: &str, patch: SlotPatch) -> Result<bool, ValidationError> {
        let changed = self.slots.update(self.gateway.as_ref(), id, patch)?;
        if changed {
            tracing::info!(id, "slot updated");
            self.refresh_banner();
        }
        Ok(changed)
    }

    pub fn delete_slot(&mut self, id: &str) -> bool {
        let removed = self.slots.delete(self.gateway.as_ref(), id);
        if removed {
            tracing::info!(id, "slot deleted");
            self.refresh_banner();
        }
        removed
    }

    /// Flip a slot's done flag. Completion affects active-slot
    /// detection, so the banner is re-evaluated immediately.
    pub fn toggle_done(&mut self, id: &str) -> Option<bool> {
        let done = self.slots.toggle_done(self.gateway.as_ref(), id)?;
        tracing::info!(id, done, "slot toggled");
        self.refresh_banner();
        Some(done)
    }

    pub fn next_week(&mut self) -> i32 {
        let offset = self.settings.week_offset() + 1;
        self.settings.set_week_offset(self.gateway.as_ref(), offset);
        offset
    }

    pub fn prev_week(&mut self) -> i32 {
        let offset = self.settings.week_offset() - 1;
        self.settings.set_week_offset(self.gateway.as_ref(), offset);
        offset
    }

    /// Slots visible in the viewed week, in store order.
    pub fn viewed_slots(&self) -> Vec<&StudySlot> {
        let today = self.clock.now().date();
        let dates = week_dates(today, self.settings.week_offset());
        let current = week_dates(today, 0)[0];
        self.slots.slots_for_week(dates[0], current)
    }

    /// Export the viewed week as CSV.
    pub fn export_week_csv<W: Write>(&self, writer: W) -> Result<(), CoreError> {
        let dates = week_dates(self.clock.now().date(), self.settings.week_offset());
        export::write_week_csv(writer, &self.viewed_slots(), &dates)
    }

    // ── Pins ─────────────────────────────────────────────────────────

    pub fn add_pin(
        &mut self,
        title: &str,
        remind_at: chrono::NaiveDateTime,
    ) -> Result<Pin, ValidationError> {
        let pin = self.pins.add(self.gateway.as_ref(), title, remind_at)?;
        tracing::info!(id = %pin.id, title = %pin.title, "pin added");
        Ok(pin)
    }

    pub fn remove_pin(&mut self, id: &str) -> bool {
        let removed = self.pins.remove(self.gateway.as_ref(), id);
        if removed {
            tracing::info!(id, "pin removed");
        }
        removed
    }

    // ── Notifications ────────────────────────────────────────────────

    /// Toggle the notification opt-in, walking the permission flow.
    pub fn toggle_notifications(&mut self) -> bool {
        let now = self.clock.now();
        self.notifier
            .toggle(now, &mut self.settings, self.gateway.as_ref())
    }

    // ── Polling ──────────────────────────────────────────────────────

    /// One pin poll: fire and consume every pin inside the window.
    pub fn poll_pins(&mut self) -> Vec<Event> {
        let now = self.clock.now();
        let window =
            chrono::Duration::seconds(self.config.reminder.fire_window_secs as i64);
        let events =
            self.scheduler
                .poll_pins(&mut self.pins, self.gateway.as_ref(), now, window);
        for event in &events {
            if let Event::ReminderFired { title, .. } = event {
                tracing::info!(title = %title, "reminder fired");
                self.notifier.notify(
                    now,
                    self.settings.notifications_enabled(),
                    "Weekplan reminder",
                    title,
                );
            }
        }
        events
    }

    /// One study-now poll: recompute the banner, escalate at most once
    /// per debounce window.
    pub fn poll_study_now(&mut self) -> StudyNowStatus {
        let now = self.clock.now();
        let debounce =
            chrono::Duration::seconds(self.config.reminder.escalation_debounce_secs as i64);
        let status = self.scheduler.poll_study_now(
            &self.slots,
            now,
            self.settings.notifications_enabled(),
            debounce,
        );
        if status.active != self.study_banner {
            let event = if status.active {
                Event::StudyNowStarted { at: now }
            } else {
                Event::StudyNowEnded { at: now }
            };
            tracing::debug!(?event, "study-now banner changed");
        }
        self.study_banner = status.active;
        if status.escalate {
            // poll_study_now only escalates when notifications are on.
            self.notifier.notify(
                now,
                true,
                "Time is running!",
                "You have a study slot now. Get to it!",
            );
        }
        status
    }

    /// One focus-timer tick.
    pub fn tick_timer(&mut self) -> Option<Event> {
        let now = self.clock.now();
        let event = self.timer.tick(now)?;
        if matches!(event, Event::TimerFinished { .. }) {
            tracing::info!("focus timer finished");
            self.notifier.notify(
                now,
                self.settings.notifications_enabled(),
                "Time's up!",
                "Take a break or start another focus session.",
            );
        }
        Some(event)
    }

    fn refresh_banner(&mut self) {
        self.study_banner = reminder::has_active_slot_now(&self.slots, self.clock.now());
    }

    /// Drive the periodic polls until `shutdown` flips to true or its
    /// sender is dropped. Everything runs on the calling task; dropping
    /// the returned future cancels all scheduled work.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) {
        let reminder = &self.config.reminder;
        let mut pin_tick =
            tokio::time::interval(StdDuration::from_secs(reminder.pin_poll_secs.max(1)));
        let mut study_tick =
            tokio::time::interval(StdDuration::from_secs(reminder.study_poll_secs.max(1)));
        let mut timer_tick = tokio::time::interval(StdDuration::from_secs(1));

        loop {
            tokio::select! {
                _ = pin_tick.tick() => {
                    self.poll_pins();
                }
                _ = study_tick.tick() => {
                    self.poll_study_now();
                }
                _ = timer_tick.tick() => {
                    self.tick_timer();
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
    }
}
