use std::time::Duration;

/// Public `OpenWeatherMap` endpoint for current conditions and forecasts.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Default request timeout; the provider is the only outbound call with one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for [`crate::OpenWeatherClient`].
#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    pub base_url: String,
    /// Host serving `/air_pollution`; same as `base_url` on the public API.
    pub air_quality_url: String,
    pub timeout: Duration,
}

impl OpenWeatherConfig {
    /// Defaults pointed at the public API.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            air_quality_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point every endpoint at `base_url` (mock servers, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.air_quality_url.clone_from(&base_url);
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
