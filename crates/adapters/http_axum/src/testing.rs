//! Router fixtures: a real in-memory `SQLite` store behind a canned gateway.

use std::future::Future;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use weatherwise_adapter_storage_sqlite_sqlx::{
    Config, SqliteFavoriteRepository, SqliteObservationRepository, SqliteUserRepository,
};
use weatherwise_app::ports::{StoreHealth, StoreHealthReport, WeatherGateway};
use weatherwise_app::services::account_service::AccountService;
use weatherwise_app::services::lookup_service::LookupService;
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::GatewayError;
use weatherwise_domain::weather::{AirQuality, Coordinates, CurrentConditions, DailyForecast};

use crate::state::AppState;

/// Knows a single city; every other name is not found.
#[derive(Clone)]
pub struct StubGateway {
    pub known_city: &'static str,
    pub temp_c: f64,
    pub description: &'static str,
    pub air_quality: Option<AirQuality>,
}

impl Default for StubGateway {
    fn default() -> Self {
        Self {
            known_city: "Paris",
            temp_c: 21.0,
            description: "clear sky",
            air_quality: None,
        }
    }
}

impl WeatherGateway for StubGateway {
    fn fetch_current(
        &self,
        city: &CityName,
    ) -> impl Future<Output = Result<CurrentConditions, GatewayError>> + Send {
        let result = if city.key() == self.known_city.to_lowercase() {
            Ok(CurrentConditions {
                city: self.known_city.to_string(),
                temp_c: self.temp_c,
                feels_like_c: Some(self.temp_c - 1.0),
                humidity_pct: 55,
                wind_speed_mps: 2.5,
                wind_direction_deg: None,
                condition_main: "Clear".to_string(),
                condition_description: self.description.to_string(),
                pressure_hpa: Some(1015),
                visibility_m: Some(10_000),
                sunrise: None,
                sunset: None,
                coordinates: Some(Coordinates {
                    lat: 48.85,
                    lon: 2.35,
                }),
            })
        } else {
            Err(GatewayError::CityNotFound(city.to_string()))
        };
        async { result }
    }

    fn fetch_forecast(
        &self,
        _city: &CityName,
        days: u8,
    ) -> impl Future<Output = Result<Vec<DailyForecast>, GatewayError>> + Send {
        let start = chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let forecast = (0..days)
            .filter_map(|offset| start.checked_add_days(chrono::Days::new(u64::from(offset))))
            .map(|date| DailyForecast {
                date,
                temp_c: 20.0,
                condition_main: "Clouds".to_string(),
                humidity_pct: Some(60),
                wind_speed_mps: Some(3.0),
            })
            .collect();
        async { Ok(forecast) }
    }

    fn fetch_air_quality(
        &self,
        _coordinates: Coordinates,
    ) -> impl Future<Output = Option<AirQuality>> + Send {
        let result = self.air_quality;
        async move { result }
    }
}

/// Health probe with a fixed answer.
#[derive(Clone)]
pub struct StubHealth(pub StoreHealthReport);

impl StoreHealth for StubHealth {
    fn health_check(&self) -> impl Future<Output = StoreHealthReport> + Send {
        let report = self.0.clone();
        async { report }
    }
}

pub type TestState = AppState<
    SqliteObservationRepository,
    SqliteUserRepository,
    SqliteFavoriteRepository,
    StubGateway,
    StubHealth,
>;

pub async fn state_with(gateway: StubGateway, health: StoreHealthReport) -> TestState {
    let db = Config {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .unwrap();
    let pool = db.pool().clone();
    let observations = SqliteObservationRepository::new(pool.clone());

    AppState::new(
        LookupService::new(gateway, observations.clone(), 5),
        observations,
        AccountService::new(
            SqliteUserRepository::new(pool.clone()),
            SqliteFavoriteRepository::new(pool),
        ),
        StubHealth(health),
    )
}

pub async fn app() -> Router {
    let healthy = StoreHealthReport::Healthy {
        tables: Vec::new(),
        record_counts: std::collections::BTreeMap::new(),
    };
    crate::router::build(state_with(StubGateway::default(), healthy).await)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}
