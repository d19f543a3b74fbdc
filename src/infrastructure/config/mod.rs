//! Configuration management
//!
//! Tunables come from an optional `config.yaml`; the two secrets (the
//! Telegram token and the OpenWeather API key) always come from the
//! process environment and are fatal at startup when absent.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::errors::ConfigError;

/// Environment variable holding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";

/// Environment variable holding the OpenWeather API key.
pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    pub bot: BotConfig,
    pub telegram: TelegramConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BotConfig {
    pub name: String,
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct TelegramConfig {
    pub poll_timeout_seconds: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct WeatherConfig {
    pub api_base: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "nimbus-bot".to_string(),
            prefix: "/".to_string(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            poll_timeout_seconds: 30,
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openweathermap.org/data/2.5".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot: BotConfig::default(),
            telegram: TelegramConfig::default(),
            weather: WeatherConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.into(), content)
            .map_err(|e| ConfigError::Parse(format!("Failed to write config: {}", e)))
    }
}

/// Read a required environment variable, mapping absence to a fatal
/// configuration error.
pub fn require_env(name: &str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingField(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.bot.name, "nimbus-bot");
        assert_eq!(config.telegram.poll_timeout_seconds, 30);
        assert!(config.weather.api_base.starts_with("https://"));
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let yaml = "bot:\n  name: test-bot\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.bot.name, "test-bot");
        assert_eq!(config.bot.prefix, "/");
        assert_eq!(config.telegram.poll_timeout_seconds, 30);
    }

    #[test]
    fn kebab_case_keys_parse() {
        let yaml = "telegram:\n  poll-timeout-seconds: 10\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.telegram.poll_timeout_seconds, 10);
    }

    #[test]
    fn missing_env_var_is_a_config_error() {
        let result = require_env("NIMBUS_BOT_TEST_UNSET_VAR");
        assert!(matches!(result, Err(ConfigError::MissingField(_))));
    }
}
