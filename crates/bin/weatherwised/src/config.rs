//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `weatherwise.toml` in the working directory. Every field except
//! the provider API key has a sensible default, so the file is optional when
//! the key comes from the environment. Environment variables take precedence
//! over file values.

use std::time::Duration;

use serde::Deserialize;
use weatherwise_adapter_openweather_reqwest::{DEFAULT_BASE_URL, OpenWeatherConfig};
use weatherwise_domain::weather::MAX_FORECAST_DAYS;

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "weatherwise.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Weather provider settings.
    pub weather: WeatherConfig,
    /// Observation history housekeeping.
    pub history: HistoryConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// `OpenWeatherMap` connection settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub api_key: String,
    pub base_url: String,
    pub air_quality_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Forecast days attached to each lookup.
    pub forecast_days: u8,
    /// Fixes the forecast flavor picks; unset seeds from the clock.
    pub message_seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// When set, observations older than this many days are purged at startup.
    pub retention_days: Option<u32>,
}

impl Config {
    /// Load configuration from `weatherwise.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid (e.g. no API key anywhere).
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file(CONFIG_FILE)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("WEATHERWISE_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("WEATHERWISE_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("WEATHERWISE_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("WEATHERWISE_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("WEATHERWISE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("OPENWEATHER_API_KEY") {
            self.weather.api_key = val;
        }
        if let Some(val) = var("WEATHERWISE_API_KEY") {
            self.weather.api_key = val;
        }
        if let Some(seed) = var("WEATHERWISE_MESSAGE_SEED").and_then(|val| val.parse().ok()) {
            self.weather.message_seed = Some(seed);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.weather.api_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "weather.api_key is required (or set OPENWEATHER_API_KEY)".to_string(),
            ));
        }
        if !(1..=MAX_FORECAST_DAYS).contains(&self.weather.forecast_days) {
            return Err(ConfigError::Validation(format!(
                "weather.forecast_days must be between 1 and {MAX_FORECAST_DAYS}"
            )));
        }
        if self.weather.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "weather.timeout_secs must be non-zero".to_string(),
            ));
        }
        if self.history.retention_days == Some(0) {
            return Err(ConfigError::Validation(
                "history.retention_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Settings for the `OpenWeatherMap` client.
    #[must_use]
    pub fn gateway_config(&self) -> OpenWeatherConfig {
        OpenWeatherConfig {
            api_key: self.weather.api_key.clone(),
            base_url: self.weather.base_url.clone(),
            air_quality_url: self.weather.air_quality_url.clone(),
            timeout: Duration::from_secs(self.weather.timeout_secs),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:weatherwise.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "weatherwised=info,weatherwise=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            air_quality_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
            forecast_days: MAX_FORECAST_DAYS,
            message_seed: None,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
