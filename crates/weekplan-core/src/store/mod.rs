//! Persisted collections.
//!
//! Each store exclusively owns its collection, loads it leniently (any
//! storage fault or corrupt JSON falls back to empty, per key), and
//! writes the whole collection back through the gateway after every
//! mutation. Save failures are logged and swallowed; the in-memory
//! state stays authoritative until the next successful save.

mod pins;
mod settings;
mod slots;

pub use pins::PinStore;
pub use settings::Settings;
pub use slots::{SlotPatch, SlotStore};
