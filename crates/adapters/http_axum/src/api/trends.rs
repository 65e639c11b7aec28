//! JSON handler for temperature trends.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_app::services::lookup_service::RECENT_TREND_DAYS;
use weatherwise_domain::trend::{TrendMode, TrendSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// `?days=N` selects the recent window, `?seasonal=true` the seasonal band.
#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    pub days: Option<u32>,
    #[serde(default)]
    pub seasonal: bool,
}

impl TrendQuery {
    fn mode(&self) -> Result<TrendMode, ApiError> {
        if self.seasonal {
            return Ok(TrendMode::Seasonal);
        }
        let days = self.days.unwrap_or(RECENT_TREND_DAYS.get());
        Ok(TrendMode::recent(days)?)
    }
}

pub enum TrendResponse {
    Ok(Json<Vec<TrendSummary>>),
}

impl IntoResponse for TrendResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/trends/{city}`
pub async fn compute<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Path(city): Path<String>,
    Query(query): Query<TrendQuery>,
) -> Result<TrendResponse, ApiError>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let mode = query.mode()?;
    let trends = state.trends.compute_trends(&city, mode).await;
    Ok(TrendResponse::Ok(Json(trends)))
}
