//! TOML-based application configuration.
//!
//! Stores the tunables that are not per-user state: the timetable hour
//! range, poll cadences for the reminder scheduler, and the toast
//! duration. Per-user state (week offset, notification opt-in) lives in
//! the key-value store instead.
//!
//! Configuration is stored at `~/.config/weekplan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::error::ConfigError;

/// Timetable grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// First hour row, inclusive.
    #[serde(default = "default_start_hour")]
    pub start_hour: u32,
    /// Last hour row, inclusive.
    #[serde(default = "default_end_hour")]
    pub end_hour: u32,
}

/// Reminder scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Cadence of the pin firing poll.
    #[serde(default = "default_pin_poll_secs")]
    pub pin_poll_secs: u64,
    /// Cadence of the study-now poll.
    #[serde(default = "default_study_poll_secs")]
    pub study_poll_secs: u64,
    /// Lookahead window inside which a pending pin fires.
    #[serde(default = "default_fire_window_secs")]
    pub fire_window_secs: u64,
    /// Minimum gap between study-now system notifications.
    #[serde(default = "default_debounce_secs")]
    pub escalation_debounce_secs: u64,
}

/// Notification sink configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// How long a toast stays visible before auto-dismissing.
    #[serde(default = "default_toast_ms")]
    pub toast_duration_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/weekplan/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub reminder: ReminderConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
}

fn default_start_hour() -> u32 {
    6
}
fn default_end_hour() -> u32 {
    19
}
fn default_pin_poll_secs() -> u64 {
    30
}
fn default_study_poll_secs() -> u64 {
    60
}
fn default_fire_window_secs() -> u64 {
    60
}
fn default_debounce_secs() -> u64 {
    60
}
fn default_toast_ms() -> u64 {
    3500
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            start_hour: default_start_hour(),
            end_hour: default_end_hour(),
        }
    }
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            pin_poll_secs: default_pin_poll_secs(),
            study_poll_secs: default_study_poll_secs(),
            fire_window_secs: default_fire_window_secs(),
            escalation_debounce_secs: default_debounce_secs(),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            toast_duration_ms: default_toast_ms(),
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, ConfigError> {
        let dir = data_dir().map_err(|e| ConfigError::LoadFailed {
            path: PathBuf::from("~/.config/weekplan"),
            message: e.to_string(),
        })?;
        Ok(dir.join("config.toml"))
    }

    /// Load from disk, writing the defaults back if the file is missing.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.grid.start_hour, 6);
        assert_eq!(parsed.grid.end_hour, 19);
        assert_eq!(parsed.reminder.pin_poll_secs, 30);
        assert_eq!(parsed.notify.toast_duration_ms, 3500);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let parsed: Config = toml::from_str("[grid]\nstart_hour = 8\n").unwrap();
        assert_eq!(parsed.grid.start_hour, 8);
        assert_eq!(parsed.grid.end_hour, 19);
        assert_eq!(parsed.reminder.study_poll_secs, 60);
    }
}
