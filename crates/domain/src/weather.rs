//! Weather records as normalised by the weather gateway.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Days of forecast the provider's free tier covers.
pub const MAX_FORECAST_DAYS: u8 = 5;

/// Latitude/longitude of a resolved city.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Current conditions for a city.
///
/// Optional fields are the ones the provider may omit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// City name as resolved by the provider.
    pub city: String,
    pub temp_c: f64,
    pub feels_like_c: Option<f64>,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub wind_direction_deg: Option<u16>,
    /// Short category, e.g. `"Rain"`.
    pub condition_main: String,
    /// Free-text description, e.g. `"light rain"`.
    pub condition_description: String,
    pub pressure_hpa: Option<u32>,
    pub visibility_m: Option<u32>,
    pub sunrise: Option<Timestamp>,
    pub sunset: Option<Timestamp>,
    pub coordinates: Option<Coordinates>,
}

impl CurrentConditions {
    /// The text alert rules and tips look at: the description, falling back
    /// to the main category when the provider left it blank.
    #[must_use]
    pub fn condition_text(&self) -> &str {
        if self.condition_description.trim().is_empty() {
            &self.condition_main
        } else {
            &self.condition_description
        }
    }
}

/// One forecast day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    /// Mean of the provider's samples for that day.
    pub temp_c: f64,
    pub condition_main: String,
    pub humidity_pct: Option<u8>,
    pub wind_speed_mps: Option<f64>,
}

/// Air quality index on the provider's 1 (best) to 5 (worst) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    pub aqi: u8,
}

impl AirQuality {
    #[must_use]
    pub fn label(&self) -> &'static str {
        aqi_label(self.aqi)
    }
}

/// Human label for an AQI value.
#[must_use]
pub fn aqi_label(aqi: u8) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}
