//! `OpenWeatherMap` response shapes and their conversion into domain records.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate};
use serde::Deserialize;

use weatherwise_domain::weather::{AirQuality, Coordinates, CurrentConditions, DailyForecast};

#[derive(Debug, Deserialize)]
pub(crate) struct OwmCurrentResponse {
    coord: Option<OwmCoord>,
    weather: Vec<OwmWeather>,
    main: OwmMain,
    visibility: Option<u32>,
    wind: OwmWind,
    sys: Option<OwmSys>,
    name: String,
}

#[derive(Debug, Deserialize)]
struct OwmCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: Option<f64>,
    pressure: Option<u32>,
    humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
    deg: Option<u16>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmForecastResponse {
    list: Vec<OwmForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OwmForecastItem {
    dt: i64,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: Option<OwmWind>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OwmAirPollutionResponse {
    list: Vec<OwmAirPollutionItem>,
}

#[derive(Debug, Deserialize)]
struct OwmAirPollutionItem {
    main: OwmAqi,
}

#[derive(Debug, Deserialize)]
struct OwmAqi {
    aqi: u8,
}

fn from_unix(secs: i64) -> Option<DateTime<chrono::Utc>> {
    DateTime::from_timestamp(secs, 0)
}

impl OwmCurrentResponse {
    /// `None` when the payload carries no weather entry.
    pub(crate) fn into_domain(self) -> Option<CurrentConditions> {
        let weather = self.weather.into_iter().next()?;
        let sys = self.sys;
        Some(CurrentConditions {
            city: self.name,
            temp_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity.unwrap_or_default(),
            wind_speed_mps: self.wind.speed,
            wind_direction_deg: self.wind.deg,
            condition_main: weather.main,
            condition_description: weather.description,
            pressure_hpa: self.main.pressure,
            visibility_m: self.visibility,
            sunrise: sys.as_ref().and_then(|s| s.sunrise).and_then(from_unix),
            sunset: sys.as_ref().and_then(|s| s.sunset).and_then(from_unix),
            coordinates: self.coord.map(|c| Coordinates {
                lat: c.lat,
                lon: c.lon,
            }),
        })
    }
}

#[derive(Default)]
struct DayBucket {
    temps: Vec<f64>,
    humidity: Vec<f64>,
    wind: Vec<f64>,
    conditions: Vec<String>,
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn as_percent(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Most frequent entry; the earliest one wins a tie.
fn most_common(values: &[String]) -> String {
    let mut best: Option<(&String, usize)> = None;
    for candidate in values {
        let count = values.iter().filter(|v| *v == candidate).count();
        if best.is_none_or(|(_, n)| count > n) {
            best = Some((candidate, count));
        }
    }
    best.map(|(value, _)| value.clone()).unwrap_or_default()
}

impl OwmForecastResponse {
    /// Collapse 3-hourly samples into per-day entries, earliest day first,
    /// keeping at most `days` days.
    pub(crate) fn into_daily(self, days: u8) -> Vec<DailyForecast> {
        let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();
        for item in self.list {
            let Some(at) = from_unix(item.dt) else {
                continue;
            };
            let bucket = buckets.entry(at.date_naive()).or_default();
            bucket.temps.push(item.main.temp);
            if let Some(humidity) = item.main.humidity {
                bucket.humidity.push(f64::from(humidity));
            }
            if let Some(wind) = item.wind {
                bucket.wind.push(wind.speed);
            }
            if let Some(weather) = item.weather.into_iter().next() {
                bucket.conditions.push(weather.main);
            }
        }

        buckets
            .into_iter()
            .take(usize::from(days))
            .filter_map(|(date, bucket)| {
                Some(DailyForecast {
                    date,
                    temp_c: mean(&bucket.temps)?,
                    condition_main: most_common(&bucket.conditions),
                    humidity_pct: mean(&bucket.humidity).map(as_percent),
                    wind_speed_mps: mean(&bucket.wind),
                })
            })
            .collect()
    }
}

impl OwmAirPollutionResponse {
    pub(crate) fn into_domain(self) -> Option<AirQuality> {
        self.list
            .into_iter()
            .next()
            .map(|item| AirQuality {
                aqi: item.main.aqi,
            })
            .filter(|aq| (1..=5).contains(&aq.aqi))
    }
}
