pub mod config;
pub mod export;
pub mod pin;
pub mod slot;
pub mod timer;
pub mod watch;
pub mod week;

use chrono::{NaiveDateTime, NaiveTime};

/// Parse an `HH:MM` time argument.
pub fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| format!("invalid time {value:?}, expected HH:MM"))
}

/// Parse a `YYYY-MM-DD HH:MM` timestamp argument.
pub fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M")
        .map_err(|_| format!("invalid time {value:?}, expected YYYY-MM-DD HH:MM"))
}
