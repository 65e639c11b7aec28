use serde::Serialize;

use crate::alert::Alert;
use crate::trend::TrendSummary;
use crate::weather::{AirQuality, CurrentConditions, DailyForecast};

/// A forecast day with its flavor line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastEntry {
    #[serde(flatten)]
    pub day: DailyForecast,
    pub message: String,
}

/// Everything a single weather lookup produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub tip: String,
    pub forecast: Vec<ForecastEntry>,
    pub air_quality: Option<AirQuality>,
    pub alerts: Vec<Alert>,
    pub recent_trends: Vec<TrendSummary>,
    /// Whether the observation for this lookup made it into history.
    pub recorded: bool,
}
