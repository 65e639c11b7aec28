//! Alert rules: seasonal temperature deviation, severe conditions, and air quality.
//!
//! The rules here are pure. Fetching the seasonal baseline is the job of the
//! alert service in the `app` crate; it passes the result in as `baseline`.

use serde::{Deserialize, Serialize};

use crate::weather::aqi_label;

/// Degrees Celsius the current temperature must exceed the seasonal mean by,
/// in either direction, to raise a deviation alert. Compared strictly.
pub const TEMPERATURE_DEVIATION_C: f64 = 5.0;

/// Conditions that raise a severe alert, in emission order.
pub const SEVERE_CONDITIONS: [&str; 5] = ["thunderstorm", "tornado", "hurricane", "blizzard", "hail"];

/// Lowest AQI (1..=5 scale) that raises an air-quality alert.
pub const AQI_ALERT_THRESHOLD: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Severe,
}

/// A transient advisory; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
}

impl Alert {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    fn severe(message: String) -> Self {
        Self {
            severity: Severity::Severe,
            message,
        }
    }
}

/// Compare the current temperature against the seasonal mean.
#[must_use]
pub fn temperature_deviation(city: &str, current_temp: f64, baseline: f64) -> Option<Alert> {
    if current_temp > baseline + TEMPERATURE_DEVIATION_C {
        Some(Alert::warning(format!(
            "Temperature in {city} is unusually high for this time of year: \
             {current_temp:.1}°C against a seasonal average of {baseline:.1}°C."
        )))
    } else if current_temp < baseline - TEMPERATURE_DEVIATION_C {
        Some(Alert::warning(format!(
            "Temperature in {city} is unusually low for this time of year: \
             {current_temp:.1}°C against a seasonal average of {baseline:.1}°C."
        )))
    } else {
        None
    }
}

/// One severe alert per entry of [`SEVERE_CONDITIONS`] found in `condition`,
/// matched as a case-insensitive substring.
#[must_use]
pub fn severe_conditions(city: &str, condition: &str) -> Vec<Alert> {
    let lowered = condition.to_lowercase();
    SEVERE_CONDITIONS
        .iter()
        .filter(|name| lowered.contains(*name))
        .map(|name| {
            Alert::severe(format!(
                "SEVERE WEATHER ALERT: {} reported in {city}. Take precautions and follow local guidance.",
                capitalize(name)
            ))
        })
        .collect()
}

#[must_use]
pub fn air_quality(city: &str, aqi: Option<u8>) -> Option<Alert> {
    let aqi = aqi.filter(|value| *value >= AQI_ALERT_THRESHOLD)?;
    Some(Alert::warning(format!(
        "AIR QUALITY ALERT: air quality in {city} is {} (AQI {aqi}). Limit prolonged outdoor activity.",
        aqi_label(aqi)
    )))
}

/// Run every rule and concatenate the results: deviation first, then severe
/// conditions, then air quality.
///
/// `baseline` is the seasonal mean; `None` skips the deviation rule.
#[must_use]
pub fn evaluate(
    city: &str,
    current_temp: f64,
    condition: &str,
    baseline: Option<f64>,
    aqi: Option<u8>,
) -> Vec<Alert> {
    let mut alerts = Vec::new();
    if let Some(alert) = baseline.and_then(|avg| temperature_deviation(city, current_temp, avg)) {
        alerts.push(alert);
    }
    alerts.extend(severe_conditions(city, condition));
    if let Some(alert) = air_quality(city, aqi) {
        alerts.push(alert);
    }
    alerts
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
