//! [`WeatherGateway`] implementation over the `OpenWeatherMap` HTTP API.

use std::future::Future;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use weatherwise_app::ports::WeatherGateway;
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::GatewayError;
use weatherwise_domain::weather::{AirQuality, Coordinates, CurrentConditions, DailyForecast};

use crate::config::OpenWeatherConfig;
use crate::error::OpenWeatherError;
use crate::payload::{OwmAirPollutionResponse, OwmCurrentResponse, OwmForecastResponse};

/// Error body returned by the provider alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
struct OwmErrorBody {
    message: Option<String>,
}

/// HTTP client for the `OpenWeatherMap` API.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    config: OpenWeatherConfig,
}

impl OpenWeatherClient {
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, OpenWeatherError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
        city: Option<&CityName>,
    ) -> Result<T, OpenWeatherError> {
        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("appid", self.config.api_key.as_str())])
            .send()
            .await?;

        handle_response(response, city).await
    }

    async fn current(&self, city: &CityName) -> Result<CurrentConditions, OpenWeatherError> {
        let payload: OwmCurrentResponse = self
            .get_json(
                format!("{}/weather", self.config.base_url),
                &[("q", city.to_string()), ("units", "metric".to_string())],
                Some(city),
            )
            .await?;

        payload
            .into_domain()
            .ok_or(OpenWeatherError::MissingField("weather"))
    }

    async fn forecast(
        &self,
        city: &CityName,
        days: u8,
    ) -> Result<Vec<DailyForecast>, OpenWeatherError> {
        let payload: OwmForecastResponse = self
            .get_json(
                format!("{}/forecast", self.config.base_url),
                &[("q", city.to_string()), ("units", "metric".to_string())],
                Some(city),
            )
            .await?;

        Ok(payload.into_daily(days))
    }

    async fn air_quality(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<AirQuality>, OpenWeatherError> {
        let payload: OwmAirPollutionResponse = self
            .get_json(
                format!("{}/air_pollution", self.config.air_quality_url),
                &[
                    ("lat", coordinates.lat.to_string()),
                    ("lon", coordinates.lon.to_string()),
                ],
                None,
            )
            .await?;

        Ok(payload.into_domain())
    }
}

/// Map the status first, then decode the body as text so a bad payload
/// surfaces as a JSON error rather than a transport one.
async fn handle_response<T: DeserializeOwned>(
    response: Response,
    city: Option<&CityName>,
) -> Result<T, OpenWeatherError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        return Ok(serde_json::from_str(&body)?);
    }

    match status {
        StatusCode::NOT_FOUND if city.is_some() => Err(OpenWeatherError::CityNotFound(
            city.map(ToString::to_string).unwrap_or_default(),
        )),
        StatusCode::UNAUTHORIZED => Err(OpenWeatherError::Unauthorized),
        _ => {
            let message = serde_json::from_str::<OwmErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body);
            Err(OpenWeatherError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

impl WeatherGateway for OpenWeatherClient {
    fn fetch_current(
        &self,
        city: &CityName,
    ) -> impl Future<Output = Result<CurrentConditions, GatewayError>> + Send {
        let this = self.clone();
        let city = city.clone();
        async move {
            this.current(&city).await.map_err(|err| {
                tracing::warn!(city = %city, error = %err, "current conditions request failed");
                GatewayError::from(err)
            })
        }
    }

    fn fetch_forecast(
        &self,
        city: &CityName,
        days: u8,
    ) -> impl Future<Output = Result<Vec<DailyForecast>, GatewayError>> + Send {
        let this = self.clone();
        let city = city.clone();
        async move {
            this.forecast(&city, days).await.map_err(|err| {
                tracing::warn!(city = %city, error = %err, "forecast request failed");
                GatewayError::from(err)
            })
        }
    }

    fn fetch_air_quality(
        &self,
        coordinates: Coordinates,
    ) -> impl Future<Output = Option<AirQuality>> + Send {
        let this = self.clone();
        async move {
            match this.air_quality(coordinates).await {
                Ok(quality) => quality,
                Err(err) => {
                    tracing::warn!(
                        lat = coordinates.lat,
                        lon = coordinates.lon,
                        error = %err,
                        "air quality request failed"
                    );
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::new(
            OpenWeatherConfig::new("test-key")
                .with_base_url(server.uri())
                .with_timeout(Duration::from_millis(500)),
        )
        .unwrap()
    }

    fn city(name: &str) -> CityName {
        CityName::parse(name).unwrap()
    }

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "coord": {"lat": 51.51, "lon": -0.13},
            "weather": [{"main": "Rain", "description": "light rain"}],
            "main": {"temp": 11.4, "feels_like": 10.2, "pressure": 1008, "humidity": 87},
            "visibility": 9000,
            "wind": {"speed": 5.1, "deg": 240},
            "sys": {"sunrise": 1_751_342_000, "sunset": 1_751_401_000},
            "name": "London"
        })
    }

    #[tokio::test]
    async fn should_fetch_current_conditions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "London"))
            .and(query_param("units", "metric"))
            .and(query_param("appid", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let current = client(&server)
            .fetch_current(&city("London"))
            .await
            .unwrap();

        assert_eq!(current.city, "London");
        assert!((current.temp_c - 11.4).abs() < 1e-9);
        assert_eq!(current.condition_text(), "light rain");
        assert_eq!(current.humidity_pct, 87);
        assert!(current.coordinates.is_some());
    }

    #[tokio::test]
    async fn should_map_404_to_city_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_current(&city("Atlantis"))
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::CityNotFound("Atlantis".into()));
        assert_eq!(err.to_string(), "City 'Atlantis' not found");
    }

    #[tokio::test]
    async fn should_map_401_to_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_current(&city("London"))
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::InvalidCredentials);
    }

    #[tokio::test]
    async fn should_map_server_error_to_upstream_with_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"cod": 500, "message": "internal"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_current(&city("London"))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Upstream {
                status: 500,
                message: "internal".into()
            }
        );
    }

    #[tokio::test]
    async fn should_report_malformed_payload_when_fields_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "London"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_current(&city("London"))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn should_report_timeout_when_provider_is_slow() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(current_body())
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_current(&city("London"))
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Timeout);
    }

    #[tokio::test]
    async fn should_report_connection_error_when_unreachable() {
        let gateway = OpenWeatherClient::new(
            OpenWeatherConfig::new("test-key")
                .with_base_url("http://127.0.0.1:1")
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = gateway.fetch_current(&city("London")).await.unwrap_err();

        assert!(matches!(err, GatewayError::Connection(_)));
    }

    #[tokio::test]
    async fn should_fetch_daily_forecast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "London"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [
                    {"dt": 1_751_328_000, "main": {"temp": 10.0}, "weather": [{"main": "Rain"}]},
                    {"dt": 1_751_338_800, "main": {"temp": 12.0}, "weather": [{"main": "Rain"}]},
                    {"dt": 1_751_414_400, "main": {"temp": 20.0}, "weather": [{"main": "Clear"}]}
                ]
            })))
            .mount(&server)
            .await;

        let days = client(&server)
            .fetch_forecast(&city("London"), 5)
            .await
            .unwrap();

        assert_eq!(days.len(), 2);
        assert!((days[0].temp_c - 11.0).abs() < 1e-9);
        assert_eq!(days[1].condition_main, "Clear");
    }

    #[tokio::test]
    async fn should_fetch_air_quality_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .and(query_param("lat", "51.51"))
            .and(query_param("lon", "-0.13"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"list": [{"main": {"aqi": 4}}]})),
            )
            .mount(&server)
            .await;

        let quality = client(&server)
            .fetch_air_quality(Coordinates {
                lat: 51.51,
                lon: -0.13,
            })
            .await;

        assert_eq!(quality, Some(AirQuality { aqi: 4 }));
    }

    #[tokio::test]
    async fn should_return_none_when_air_quality_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/air_pollution"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let quality = client(&server)
            .fetch_air_quality(Coordinates { lat: 0.0, lon: 0.0 })
            .await;

        assert!(quality.is_none());
    }
}
