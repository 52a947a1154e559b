//! Configuration management commands for CLI.

use chrono::NaiveTime;
use clap::Subcommand;

use bday_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the full configuration
    Show,
    /// Get one configuration value
    Get {
        /// Key: window_days, dashboard_window_days, max_notifications,
        /// notify_time, default_owner
        key: String,
    },
    /// Set one configuration value
    Set {
        key: String,
        value: String,
    },
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            match get_value(&config, &key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            set_value(&mut config, &key, &value)?;
            config.save()?;
            println!("{key} = {value}");
        }
    }
    Ok(())
}

fn get_value(config: &Config, key: &str) -> Option<String> {
    match key {
        "window_days" => Some(config.window_days.to_string()),
        "dashboard_window_days" => Some(config.dashboard_window_days.to_string()),
        "max_notifications" => Some(config.max_notifications.to_string()),
        "notify_time" => Some(config.notify_time.clone()),
        "default_owner" => Some(config.default_owner.clone().unwrap_or_default()),
        _ => None,
    }
}

fn set_value(
    config: &mut Config,
    key: &str,
    value: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match key {
        "window_days" => config.window_days = value.parse()?,
        "dashboard_window_days" => config.dashboard_window_days = value.parse()?,
        "max_notifications" => config.max_notifications = value.parse()?,
        "notify_time" => {
            NaiveTime::parse_from_str(value, "%H:%M")
                .map_err(|_| format!("notify_time must be HH:MM, got '{value}'"))?;
            config.notify_time = value.to_string();
        }
        "default_owner" => config.default_owner = Some(value.to_string()),
        _ => return Err(format!("unknown config key: {key}").into()),
    }
    Ok(())
}
