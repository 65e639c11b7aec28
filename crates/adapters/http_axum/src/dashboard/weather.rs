//! Dashboard weather page: metrics, tip, alerts, forecast, and recent trends.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_domain::alert::{Alert, Severity};
use weatherwise_domain::report::{ForecastEntry, WeatherReport};
use weatherwise_domain::time::Timestamp;
use weatherwise_domain::trend::TrendSummary;

use super::{DashboardError, render};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherQuery {
    pub city: Option<String>,
    pub user: Option<String>,
}

pub struct AlertRow {
    pub css_class: &'static str,
    pub message: String,
}

pub struct ForecastRow {
    pub date: String,
    pub temp: String,
    pub condition: String,
    pub message: String,
}

pub struct TrendRow {
    pub date: String,
    pub avg: String,
    pub min: String,
    pub max: String,
    pub conditions: String,
    pub samples: usize,
}

/// Weather page template.
#[derive(Template)]
#[template(path = "weather.html")]
pub struct WeatherTemplate {
    city: String,
    query_city: String,
    user: String,
    temp: String,
    feels_like: Option<String>,
    condition: String,
    humidity: u8,
    wind: String,
    pressure: Option<u32>,
    visibility: Option<String>,
    sunrise: Option<String>,
    sunset: Option<String>,
    air_quality: Option<String>,
    tip: String,
    alerts: Vec<AlertRow>,
    forecast: Vec<ForecastRow>,
    trends: Vec<TrendRow>,
    recorded: bool,
}

impl IntoResponse for WeatherTemplate {
    fn into_response(self) -> Response {
        render(&self)
    }
}

fn celsius(value: f64) -> String {
    format!("{value:.1}°C")
}

fn clock(ts: Timestamp) -> String {
    ts.format("%H:%M UTC").to_string()
}

impl From<&Alert> for AlertRow {
    fn from(alert: &Alert) -> Self {
        Self {
            css_class: match alert.severity {
                Severity::Info => "alert-info",
                Severity::Warning => "alert-warning",
                Severity::Severe => "alert-severe",
            },
            message: alert.message.clone(),
        }
    }
}

impl From<&ForecastEntry> for ForecastRow {
    fn from(entry: &ForecastEntry) -> Self {
        Self {
            date: entry.day.date.format("%a %d %b").to_string(),
            temp: celsius(entry.day.temp_c),
            condition: entry.day.condition_main.clone(),
            message: entry.message.clone(),
        }
    }
}

impl From<&TrendSummary> for TrendRow {
    fn from(summary: &TrendSummary) -> Self {
        Self {
            date: summary.date.to_string(),
            avg: celsius(summary.avg_temp),
            min: celsius(summary.min_temp),
            max: celsius(summary.max_temp),
            conditions: summary
                .conditions
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            samples: summary.samples,
        }
    }
}

impl WeatherTemplate {
    fn new(query_city: String, user: String, report: &WeatherReport) -> Self {
        let current = &report.current;
        Self {
            city: current.city.clone(),
            query_city,
            user,
            temp: celsius(current.temp_c),
            feels_like: current.feels_like_c.map(celsius),
            condition: current.condition_text().to_string(),
            humidity: current.humidity_pct,
            wind: format!("{:.1} m/s", current.wind_speed_mps),
            pressure: current.pressure_hpa,
            visibility: current
                .visibility_m
                .map(|m| format!("{:.1} km", f64::from(m) / 1000.0)),
            sunrise: current.sunrise.map(clock),
            sunset: current.sunset.map(clock),
            air_quality: report
                .air_quality
                .map(|aq| format!("{} (AQI {})", aq.label(), aq.aqi)),
            tip: report.tip.clone(),
            alerts: report.alerts.iter().map(AlertRow::from).collect(),
            forecast: report.forecast.iter().map(ForecastRow::from).collect(),
            trends: report.recent_trends.iter().map(TrendRow::from).collect(),
            recorded: report.recorded,
        }
    }
}

/// `GET /weather?city=..`: a blank city sends the visitor back to the search form.
pub async fn show<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, DashboardError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let Some(city) = query.city.filter(|c| !c.trim().is_empty()) else {
        return Ok(Redirect::to("/").into_response());
    };

    let report = state.lookup.lookup(&city).await?;
    let user = query.user.unwrap_or_default();
    Ok(WeatherTemplate::new(city, user, &report).into_response())
}
