//! Weather observations: the append-only history that trend analysis reads.

use serde::{Deserialize, Serialize};

use crate::city::CityName;
use crate::id::ObservationId;
use crate::time::{self, Timestamp};
use crate::trend::{SeasonalRange, TrendMode};

/// One recorded `(city, temperature, condition, timestamp)` sample.
///
/// `city` holds the lower-cased [`CityName::key`]. Observations are never
/// updated; only a retention sweep removes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub id: ObservationId,
    pub city: String,
    /// Degrees Celsius.
    pub temperature: f64,
    pub condition: String,
    pub recorded_at: Timestamp,
}

impl WeatherObservation {
    /// Create a builder for constructing a [`WeatherObservation`].
    #[must_use]
    pub fn builder() -> WeatherObservationBuilder {
        WeatherObservationBuilder::default()
    }
}

/// Step-by-step builder for [`WeatherObservation`].
#[derive(Debug, Default)]
pub struct WeatherObservationBuilder {
    id: Option<ObservationId>,
    city: Option<String>,
    temperature: Option<f64>,
    condition: Option<String>,
    recorded_at: Option<Timestamp>,
}

impl WeatherObservationBuilder {
    #[must_use]
    pub fn id(mut self, id: ObservationId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn city(mut self, city: &CityName) -> Self {
        self.city = Some(city.key().to_string());
        self
    }

    #[must_use]
    pub fn temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    #[must_use]
    pub fn condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    #[must_use]
    pub fn recorded_at(mut self, recorded_at: Timestamp) -> Self {
        self.recorded_at = Some(recorded_at);
        self
    }

    /// Consume the builder and return a [`WeatherObservation`].
    #[must_use]
    pub fn build(self) -> WeatherObservation {
        WeatherObservation {
            id: self.id.unwrap_or_default(),
            city: self.city.unwrap_or_default(),
            temperature: self.temperature.unwrap_or_default(),
            condition: self.condition.unwrap_or_default(),
            recorded_at: self.recorded_at.unwrap_or_else(crate::time::now),
        }
    }
}

/// Which observations of a city a trend query selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationFilter {
    /// Everything recorded at or after the instant.
    Since(Timestamp),
    /// The seasonal band, across every stored year, strictly before `before`.
    Seasonal {
        range: SeasonalRange,
        before: Timestamp,
    },
}

impl ObservationFilter {
    /// Build the filter a [`TrendMode`] implies at instant `now`.
    ///
    /// Seasonal mode excludes the last 24 hours so a just-recorded sample does
    /// not feed the baseline it is compared against.
    #[must_use]
    pub fn for_mode(mode: TrendMode, now: Timestamp) -> Self {
        match mode {
            TrendMode::Recent { days } => Self::Since(time::days_before(now, days.get())),
            TrendMode::Seasonal => Self::Seasonal {
                range: crate::trend::TrendWindow::seasonal(now.date_naive()).range(),
                before: time::days_before(now, 1),
            },
        }
    }

    /// Reference semantics every store implementation must agree with.
    #[must_use]
    pub fn matches(&self, recorded_at: Timestamp) -> bool {
        match self {
            Self::Since(since) => recorded_at >= *since,
            Self::Seasonal { range, before } => recorded_at < *before && range.matches(recorded_at),
        }
    }
}
