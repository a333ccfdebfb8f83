use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub sync: SyncConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub base_url: String,
    pub token_cache: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyncConfig {
    pub fetch_past_days: u32,
    pub fetch_future_days: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub first_day_of_week: String,
    pub default_view: String,
    pub snap_step_minutes: u32,
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn load_or_create() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crewcal")
            .join("config.toml")
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).unwrap_or_default();
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Configured week start; unrecognized values fall back to Sunday.
    pub fn week_start(&self) -> Weekday {
        match self.ui.first_day_of_week.as_str() {
            "Monday" => Weekday::Mon,
            "Saturday" => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("crewcal");

        Self {
            server: ServerConfig {
                base_url: "http://localhost:8080".to_string(),
                token_cache: config_dir.join("token.json"),
            },
            sync: SyncConfig {
                fetch_past_days: 90,
                fetch_future_days: 365,
            },
            ui: UiConfig {
                first_day_of_week: "Sunday".to_string(),
                default_view: "Month".to_string(),
                snap_step_minutes: 30,
            },
        }
    }
}
