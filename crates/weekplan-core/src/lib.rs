//! # Weekplan Core Library
//!
//! This library provides the core logic for Weekplan, a personal study
//! planner built around a weekly timetable. All operations are available
//! through the library API; the CLI binary is a thin layer over it.
//!
//! ## Architecture
//!
//! - **Week Calculator**: pure calendar arithmetic mapping a signed week
//!   offset to the seven dates of that week
//! - **Stores**: in-memory slot and pin collections, persisted through a
//!   flat key-value gateway after every mutation
//! - **Grid**: a pure projection of the slot store into a day-by-hour
//!   view model
//! - **Reminder Scheduler**: a caller-driven polling state machine that
//!   fires pinned reminders and the "study now" banner
//! - **Notifier**: toast plus optional system notification, behind a
//!   capability-gated backend trait
//!
//! ## Key Components
//!
//! - [`App`]: application context owning stores, settings and schedulers
//! - [`Database`]: SQLite-backed key-value persistence
//! - [`ReminderScheduler`]: pin firing and study-now escalation
//! - [`FocusTimer`]: wall-clock countdown state machine

pub mod app;
pub mod clock;
pub mod error;
pub mod events;
pub mod export;
pub mod grid;
pub mod model;
pub mod notify;
pub mod reminder;
pub mod storage;
pub mod store;
pub mod timer;
pub mod week;

pub use app::App;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use grid::{SlotCard, WeekGrid};
pub use model::{Pin, StudySlot};
pub use notify::{MemoryBackend, Notifier, Permission, SystemBackend};
pub use reminder::{ReminderScheduler, StudyNowStatus};
pub use storage::{Config, Database, Gateway, MemoryGateway};
pub use store::{PinStore, Settings, SlotStore};
pub use timer::{FocusTimer, TimerState};
