//! Weather gateway port: the third-party provider, normalised.

use std::future::Future;

use weatherwise_domain::city::CityName;
use weatherwise_domain::error::GatewayError;
use weatherwise_domain::weather::{AirQuality, Coordinates, CurrentConditions, DailyForecast};

/// Source of current conditions, forecasts, and air quality.
///
/// Every failure comes back as a [`GatewayError`] value; implementations
/// never panic on provider misbehaviour.
pub trait WeatherGateway {
    fn fetch_current(
        &self,
        city: &CityName,
    ) -> impl Future<Output = Result<CurrentConditions, GatewayError>> + Send;

    /// Up to `days` daily entries, earliest first.
    fn fetch_forecast(
        &self,
        city: &CityName,
        days: u8,
    ) -> impl Future<Output = Result<Vec<DailyForecast>, GatewayError>> + Send;

    /// `None` on any failure.
    fn fetch_air_quality(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Option<AirQuality>> + Send;
}
