//! JSON handlers for observation history upkeep.

use axum::Json;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Retention horizon used when the request omits one.
pub const DEFAULT_RETENTION_DAYS: u32 = 30;

/// Request body for `POST /api/history/purge`.
#[derive(Debug, Default, Deserialize)]
pub struct PurgeRequest {
    pub older_than_days: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct PurgeSummary {
    pub deleted: u64,
}

/// Request body for `POST /api/history/{city}/sample`.
#[derive(Debug, Deserialize)]
pub struct SampleRequest {
    pub current_temp: f64,
}

#[derive(Debug, Serialize)]
pub struct SampleSummary {
    pub inserted: usize,
}

pub enum PurgeResponse {
    Ok(Json<PurgeSummary>),
}

impl IntoResponse for PurgeResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

pub enum SampleResponse {
    Ok(Json<SampleSummary>),
}

impl IntoResponse for SampleResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/history/purge`
pub async fn purge<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Json(req): Json<PurgeRequest>,
) -> Result<PurgeResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let days = req.older_than_days.unwrap_or(DEFAULT_RETENTION_DAYS);
    let deleted = state.history.purge_older_than(days).await?;
    Ok(PurgeResponse::Ok(Json(PurgeSummary { deleted })))
}

/// `POST /api/history/{city}/sample`
pub async fn seed_sample<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path(city): Path<String>,
    Json(req): Json<SampleRequest>,
) -> Result<SampleResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let inserted = state
        .history
        .seed_sample_history(&city, req.current_temp)
        .await?;
    Ok(SampleResponse::Ok(Json(SampleSummary { inserted })))
}
