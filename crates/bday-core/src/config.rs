//! TOML-based application configuration.
//!
//! Stores the caller-side parameters of the core: upcoming-window sizes,
//! the reminder cap and fire time, and the default owner the CLI acts
//! for. Configuration is stored at `~/.config/bday/config.toml`.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::notify::{default_notify_time, DEFAULT_MAX_REMINDERS};
use crate::pipeline::ViewParams;
use crate::store::data_dir;

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/bday/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upcoming window for the home view, in days.
    #[serde(default = "default_window_days")]
    pub window_days: i64,
    /// Broader window for the dashboard view, in days.
    #[serde(default = "default_dashboard_window_days")]
    pub dashboard_window_days: i64,
    /// Maximum number of reminders to schedule.
    #[serde(default = "default_max_notifications")]
    pub max_notifications: usize,
    /// Local clock time reminders fire at, "HH:MM".
    #[serde(default = "default_notify_time_str")]
    pub notify_time: String,
    /// Owner id used when the CLI is not given one explicitly.
    #[serde(default)]
    pub default_owner: Option<String>,
}

fn default_window_days() -> i64 {
    30
}
fn default_dashboard_window_days() -> i64 {
    90
}
fn default_max_notifications() -> usize {
    DEFAULT_MAX_REMINDERS
}
fn default_notify_time_str() -> String {
    "09:00".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            dashboard_window_days: default_dashboard_window_days(),
            max_notifications: default_max_notifications(),
            notify_time: default_notify_time_str(),
            default_owner: None,
        }
    }
}

impl Config {
    /// Load from `config.toml` in the data directory.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = data_dir()
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
            .join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::LoadFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Save to `config.toml` in the data directory.
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = data_dir()
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?
            .join("config.toml");
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, raw).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })
    }

    /// The configured reminder fire time, falling back to 09:00 when the
    /// stored string does not parse.
    pub fn notify_at(&self) -> NaiveTime {
        NaiveTime::parse_from_str(&self.notify_time, "%H:%M")
            .unwrap_or_else(|_| default_notify_time())
    }

    /// Pipeline parameters for the home view, or the dashboard view when
    /// `dashboard` is set.
    pub fn view_params(&self, dashboard: bool) -> ViewParams {
        ViewParams {
            window_days: if dashboard {
                self.dashboard_window_days
            } else {
                self.window_days
            },
            notify_at: self.notify_at(),
            max_reminders: self.max_notifications,
        }
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
        assert_eq!(parsed.window_days, 30);
        assert_eq!(parsed.dashboard_window_days, 90);
        assert_eq!(parsed.max_notifications, 10);
        assert_eq!(parsed.notify_time, "09:00");
        assert!(parsed.default_owner.is_none());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("window_days = 14").unwrap();
        assert_eq!(parsed.window_days, 14);
        assert_eq!(parsed.dashboard_window_days, 90);
        assert_eq!(parsed.max_notifications, 10);
    }

    #[test]
    fn notify_at_parses_and_falls_back() {
        let mut cfg = Config::default();
        cfg.notify_time = "18:45".into();
        assert_eq!(cfg.notify_at(), NaiveTime::from_hms_opt(18, 45, 0).unwrap());

        cfg.notify_time = "not a time".into();
        assert_eq!(cfg.notify_at(), default_notify_time());
    }

    #[test]
    fn view_params_select_the_right_window() {
        let cfg = Config::default();
        assert_eq!(cfg.view_params(false).window_days, 30);
        assert_eq!(cfg.view_params(true).window_days, 90);
    }
}
