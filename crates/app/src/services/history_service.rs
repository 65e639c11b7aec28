//! History upkeep: best-effort observation logging, retention, sample data.

use chrono::Duration;
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::{ValidationError, WeatherWiseError};
use weatherwise_domain::observation::WeatherObservation;
use weatherwise_domain::time::{self, Timestamp};

use crate::ports::ObservationRepository;

/// Days of sample history written by [`HistoryService::seed_sample_history`].
pub const SAMPLE_DAYS: i64 = 7;

/// Sample rows sit this many degrees below the current temperature.
pub const SAMPLE_OFFSET_C: f64 = 10.0;

#[derive(Clone)]
pub struct HistoryService<R> {
    repo: R,
}

impl<R: ObservationRepository> HistoryService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Append an observation. A failed write is logged and yields `None`;
    /// it must never block displaying weather.
    #[tracing::instrument(skip(self, city), fields(city = %city))]
    pub async fn record(
        &self,
        city: &CityName,
        temperature: f64,
        condition: &str,
    ) -> Option<WeatherObservation> {
        match self.repo.insert(city, temperature, condition).await {
            Ok(observation) => Some(observation),
            Err(error) => {
                tracing::warn!(%error, "failed to record observation");
                None
            }
        }
    }

    /// Delete observations older than `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidRetention`] when `days` is zero, or
    /// a storage error from the repository.
    pub async fn purge_older_than(&self, days: u32) -> Result<u64, WeatherWiseError> {
        self.purge_older_than_at(days, time::now()).await
    }

    /// Same as [`purge_older_than`](Self::purge_older_than) with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`purge_older_than`](Self::purge_older_than).
    #[tracing::instrument(skip(self, now))]
    pub async fn purge_older_than_at(
        &self,
        days: u32,
        now: Timestamp,
    ) -> Result<u64, WeatherWiseError> {
        if days == 0 {
            return Err(ValidationError::InvalidRetention.into());
        }
        let cutoff = time::days_before(now, days);
        let deleted = self.repo.purge_before(cutoff).await?;
        tracing::info!(deleted, "retention sweep complete");
        Ok(deleted)
    }

    /// Write one row per day for the last [`SAMPLE_DAYS`] days at
    /// `current_temp - SAMPLE_OFFSET_C`, condition `"clear"`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::Validation`] for an invalid city, or a
    /// storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn seed_sample_history(
        &self,
        city: &str,
        current_temp: f64,
    ) -> Result<usize, WeatherWiseError> {
        let city = CityName::parse(city)?;
        let now = time::now();
        let mut inserted = 0;
        for day in 1..=SAMPLE_DAYS {
            let observation = WeatherObservation::builder()
                .city(&city)
                .temperature(current_temp - SAMPLE_OFFSET_C)
                .condition("clear")
                .recorded_at(now - Duration::days(day))
                .build();
            self.repo.import(observation).await?;
            inserted += 1;
        }
        tracing::info!(rows = inserted, "sample history written");
        Ok(inserted)
    }
}
