//! End-to-end smoke tests for the full weatherwised stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! real services, real axum router) and exercises the HTTP layer via
//! `tower::ServiceExt::oneshot`; no TCP port is bound. The weather provider is
//! either a canned in-process gateway or a `wiremock` server speaking the
//! `OpenWeatherMap` wire format.

use std::future::Future;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use weatherwise_adapter_http_axum::router;
use weatherwise_adapter_http_axum::state::AppState;
use weatherwise_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, SqliteFavoriteRepository, SqliteObservationRepository, SqliteStoreHealth,
    SqliteUserRepository,
};
use weatherwise_app::ports::WeatherGateway;
use weatherwise_app::services::account_service::AccountService;
use weatherwise_app::services::lookup_service::LookupService;
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::GatewayError;
use weatherwise_domain::weather::{AirQuality, Coordinates, CurrentConditions, DailyForecast};
use weatherwised::config::Config;
use weatherwised::wiring;

/// Answers for Portland only, with a thunderstorm.
struct StormyPortland;

impl WeatherGateway for StormyPortland {
    fn fetch_current(
        &self,
        city: &CityName,
    ) -> impl Future<Output = Result<CurrentConditions, GatewayError>> + Send {
        let result = if city.key() == "portland" {
            Ok(CurrentConditions {
                city: "Portland".to_string(),
                temp_c: 18.0,
                feels_like_c: None,
                humidity_pct: 90,
                wind_speed_mps: 9.0,
                wind_direction_deg: None,
                condition_main: "Thunderstorm".to_string(),
                condition_description: "severe thunderstorm warning".to_string(),
                pressure_hpa: None,
                visibility_m: None,
                sunrise: None,
                sunset: None,
                coordinates: Some(Coordinates {
                    lat: 45.52,
                    lon: -122.68,
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
        _days: u8,
    ) -> impl Future<Output = Result<Vec<DailyForecast>, GatewayError>> + Send {
        async { Err(GatewayError::Timeout) }
    }

    fn fetch_air_quality(
        &self,
        _coordinates: Coordinates,
    ) -> impl Future<Output = Option<AirQuality>> + Send {
        async { Some(AirQuality { aqi: 5 }) }
    }
}

/// Build a fully-wired router backed by an in-memory `SQLite` database.
async fn app() -> axum::Router {
    let db = DbConfig {
        database_url: "sqlite::memory:".to_string(),
    }
    .build()
    .await
    .expect("in-memory database should initialise");

    let pool = db.pool().clone();
    let observations = SqliteObservationRepository::new(pool.clone());

    let state = AppState::new(
        LookupService::new(StormyPortland, observations.clone(), 5),
        observations,
        AccountService::new(
            SqliteUserRepository::new(pool.clone()),
            SqliteFavoriteRepository::new(pool.clone()),
        ),
        SqliteStoreHealth::new(pool),
    );

    router::build(state)
}

async fn call(app: &axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, bytes)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_of(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_report_store_tables_on_health_check() {
    let app = app().await;
    call(&app, get("/api/weather/Portland")).await;

    let (status, body) = call(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_of(&body);
    assert_eq!(body["status"], "healthy");
    let tables: Vec<&str> = body["tables"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|t| t.as_str())
        .collect();
    assert!(tables.contains(&"weather_history"));
    assert_eq!(body["record_counts"]["weather_history"], 1);
}

// ---------------------------------------------------------------------------
// Lookup, history, trends, alerts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_degrade_forecast_and_keep_alerts() {
    let app = app().await;

    let (status, body) = call(&app, get("/api/weather/portland")).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_of(&body);
    assert_eq!(body["forecast"], json!([]));
    assert_eq!(body["air_quality"]["aqi"], 5);
    assert_eq!(body["recorded"], true);
    let messages: Vec<&str> = body["alerts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["message"].as_str().unwrap())
        .collect();
    assert!(messages.iter().any(|m| m.contains("SEVERE WEATHER ALERT")));
    assert!(messages.iter().any(|m| m.contains("AIR QUALITY ALERT")));
}

#[tokio::test]
async fn should_return_gateway_text_for_unknown_city() {
    let app = app().await;

    let (status, body) = call(&app, get("/api/weather/Atlantis")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_of(&body)["error"], "City 'Atlantis' not found");
}

#[tokio::test]
async fn should_build_trends_from_seeded_history() {
    let app = app().await;

    let (status, body) = call(
        &app,
        post_json("/api/history/Portland/sample", &json!({"current_temp": 25.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body)["inserted"], 7);

    let (status, body) = call(&app, get("/api/trends/Portland?days=10")).await;
    assert_eq!(status, StatusCode::OK);
    let trends = json_of(&body);
    let trends = trends.as_array().unwrap();
    assert_eq!(trends.len(), 7);
    assert!(trends.iter().all(|t| t["avg_temp"] == 15.0));
}

#[tokio::test]
async fn should_evaluate_alerts_without_lookup() {
    let app = app().await;

    let (status, body) = call(
        &app,
        post_json(
            "/api/alerts",
            &json!({"city": "Pdx", "current_temp": 20.0, "current_condition": "clear", "air_quality_index": 5}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_of(&body).as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Dashboard (SSR) pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_render_home_page() {
    let app = app().await;

    let (status, body) = call(&app, get("/")).await;

    assert_eq!(status, StatusCode::OK);
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("WeatherWise"));
}

#[tokio::test]
async fn should_render_weather_page_with_alerts() {
    let app = app().await;

    let (status, body) = call(&app, get("/weather?city=Portland")).await;

    assert_eq!(status, StatusCode::OK);
    let body = String::from_utf8(body).unwrap();
    assert!(body.contains("Portland"));
    assert!(body.contains("alert-severe"));
}

// ---------------------------------------------------------------------------
// Production wiring against a mock OpenWeatherMap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_serve_lookup_through_assembled_components() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "London"))
        .and(query_param("appid", "integration-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "coord": {"lat": 51.51, "lon": -0.13},
            "weather": [{"main": "Rain", "description": "light rain"}],
            "main": {"temp": 11.4, "feels_like": 10.2, "pressure": 1008, "humidity": 87},
            "wind": {"speed": 5.1},
            "name": "London"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "list": [
                {"dt": 1_751_328_000, "main": {"temp": 10.0}, "weather": [{"main": "Rain"}]},
                {"dt": 1_751_414_400, "main": {"temp": 20.0}, "weather": [{"main": "Clear"}]}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/air_pollution"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"list": [{"main": {"aqi": 2}}]})),
        )
        .mount(&server)
        .await;

    let mut config = Config::default();
    config.database.url = "sqlite::memory:".to_string();
    config.weather.api_key = "integration-key".to_string();
    config.weather.base_url = server.uri();
    config.weather.air_quality_url = server.uri();

    let components = wiring::assemble(&config).await.unwrap();
    let app = router::build(AppState::new(
        components.lookup,
        components.observations,
        components.accounts,
        components.health,
    ));

    let (status, body) = call(&app, get("/api/weather/London")).await;

    assert_eq!(status, StatusCode::OK);
    let body = json_of(&body);
    assert_eq!(body["current"]["city"], "London");
    assert_eq!(body["forecast"].as_array().unwrap().len(), 2);
    assert_eq!(body["air_quality"]["aqi"], 2);
    assert_eq!(body["recorded"], true);
}
