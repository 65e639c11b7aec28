//! Weather lookup: the request-scoped chain behind every city search.
//!
//! validate city → current conditions → forecast → air quality → record the
//! observation → recent trends → alerts → flavor messages.
//!
//! Only an invalid city or a failed current-conditions fetch fails the lookup.
//! Everything after that degrades: a failed forecast becomes an empty list,
//! a failed air-quality call is simply absent, and a failed write is logged.

use std::num::NonZeroU32;

use weatherwise_domain::city::CityName;
use weatherwise_domain::error::{ValidationError, WeatherWiseError};
use weatherwise_domain::message::{self, MessageCatalog, MessageChooser, SeededChooser};
use weatherwise_domain::report::{ForecastEntry, WeatherReport};
use weatherwise_domain::trend::TrendMode;
use weatherwise_domain::weather::{DailyForecast, MAX_FORECAST_DAYS};

use crate::ports::{ObservationRepository, WeatherGateway};
use crate::services::alert_service::{AlertContext, AlertService};
use crate::services::history_service::HistoryService;
use crate::services::trend_service::TrendService;

/// Days of history shown next to a lookup.
pub const RECENT_TREND_DAYS: NonZeroU32 = NonZeroU32::new(7).unwrap();

pub struct LookupService<R, G> {
    gateway: G,
    history: HistoryService<R>,
    trends: TrendService<R>,
    alerts: AlertService<R>,
    catalog: MessageCatalog,
    chooser: Box<dyn MessageChooser>,
    forecast_days: u8,
}

impl<R, G> LookupService<R, G>
where
    R: ObservationRepository + Clone,
    G: WeatherGateway,
{
    /// Create a new lookup over `gateway` and the observation store `repo`.
    ///
    /// `forecast_days` is clamped to `1..=MAX_FORECAST_DAYS`.
    pub fn new(gateway: G, repo: R, forecast_days: u8) -> Self {
        let trends = TrendService::new(repo.clone());
        Self {
            gateway,
            history: HistoryService::new(repo),
            alerts: AlertService::new(trends.clone()),
            trends,
            catalog: MessageCatalog::default(),
            chooser: Box::new(SeededChooser::from_clock()),
            forecast_days: forecast_days.clamp(1, MAX_FORECAST_DAYS),
        }
    }

    /// Replace the flavor message source.
    #[must_use]
    pub fn with_messages(
        mut self,
        catalog: MessageCatalog,
        chooser: impl MessageChooser + 'static,
    ) -> Self {
        self.catalog = catalog;
        self.chooser = Box::new(chooser);
        self
    }

    /// Look up a city and assemble the full report.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::Validation`] for an invalid city and
    /// [`WeatherWiseError::Gateway`] when current conditions are unavailable.
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, city: &str) -> Result<WeatherReport, WeatherWiseError> {
        let city = CityName::parse(city)?;

        let current = self.gateway.fetch_current(&city).await.map_err(|error| {
            tracing::warn!(city = %city, %error, "current conditions unavailable");
            error
        })?;

        let forecast = match self.gateway.fetch_forecast(&city, self.forecast_days).await {
            Ok(days) => days,
            Err(error) => {
                tracing::warn!(city = %city, %error, "forecast unavailable, continuing without it");
                Vec::new()
            }
        };

        let air_quality = match current.coordinates {
            Some(coordinates) => self.gateway.fetch_air_quality(coordinates).await,
            None => None,
        };

        let condition = current.condition_text().to_string();
        let recorded = self
            .history
            .record(&city, current.temp_c, &condition)
            .await
            .is_some();

        let recent_trends = self
            .trends
            .compute_trends(
                city.as_str(),
                TrendMode::Recent {
                    days: RECENT_TREND_DAYS,
                },
            )
            .await;

        let alerts = self
            .alerts
            .derive_alerts(
                city.as_str(),
                current.temp_c,
                &condition,
                AlertContext {
                    air_quality_index: air_quality.map(|aq| aq.aqi),
                },
            )
            .await;

        tracing::info!(
            city = %city,
            alerts = alerts.len(),
            forecast_days = forecast.len(),
            recorded,
            "lookup complete"
        );

        Ok(WeatherReport {
            tip: message::current_tip(&condition).to_string(),
            forecast: self.annotate(forecast),
            current,
            air_quality,
            alerts,
            recent_trends,
            recorded,
        })
    }

    /// Forecast alone, with flavor messages.
    ///
    /// `days` above the provider window is clamped to it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidForecastDays`] when `days` is zero,
    /// [`WeatherWiseError::Validation`] for an invalid city, and
    /// [`WeatherWiseError::Gateway`] when the provider fails.
    #[tracing::instrument(skip(self))]
    pub async fn forecast(
        &self,
        city: &str,
        days: u8,
    ) -> Result<Vec<ForecastEntry>, WeatherWiseError> {
        if days == 0 {
            return Err(ValidationError::InvalidForecastDays {
                max: MAX_FORECAST_DAYS,
            }
            .into());
        }
        let city = CityName::parse(city)?;
        let days = days.min(MAX_FORECAST_DAYS);
        let forecast = self.gateway.fetch_forecast(&city, days).await?;
        Ok(self.annotate(forecast))
    }

    fn annotate(&self, forecast: Vec<DailyForecast>) -> Vec<ForecastEntry> {
        let messages = self
            .catalog
            .forecast_messages(self.chooser.as_ref(), &forecast);
        forecast
            .into_iter()
            .zip(messages)
            .map(|(day, message)| ForecastEntry { day, message })
            .collect()
    }
}
