//! JSON handlers for weather lookups.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_domain::report::{ForecastEntry, WeatherReport};
use weatherwise_domain::weather::MAX_FORECAST_DAYS;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for the forecast endpoint.
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<u8>,
}

/// Possible responses from the lookup endpoint.
pub enum LookupResponse {
    Ok(Json<WeatherReport>),
}

impl IntoResponse for LookupResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the forecast endpoint.
pub enum ForecastResponse {
    Ok(Json<Vec<ForecastEntry>>),
}

impl IntoResponse for ForecastResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/weather/{city}`
pub async fn lookup<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path(city): Path<String>,
) -> Result<LookupResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let report = state.lookup.lookup(&city).await?;
    Ok(LookupResponse::Ok(Json(report)))
}

/// `GET /api/weather/{city}/forecast?days=N`
pub async fn forecast<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path(city): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<ForecastResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let days = query.days.unwrap_or(MAX_FORECAST_DAYS);
    let entries = state.lookup.forecast(&city, days).await?;
    Ok(ForecastResponse::Ok(Json(entries)))
}
