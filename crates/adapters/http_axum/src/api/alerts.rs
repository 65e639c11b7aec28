//! JSON handler for the alert engine.

use axum::Json;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_app::services::alert_service::AlertContext;
use weatherwise_domain::alert::Alert;

use crate::state::AppState;

/// Request body for deriving alerts.
#[derive(Debug, Deserialize)]
pub struct AlertRequest {
    pub city: String,
    pub current_temp: f64,
    pub current_condition: String,
    pub air_quality_index: Option<u8>,
}

pub enum AlertResponse {
    Ok(Json<Vec<Alert>>),
}

impl IntoResponse for AlertResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `POST /api/alerts`. The engine never fails, so neither does this.
pub async fn derive<R, U, F, G, H>(
    State(state): State<AppState<R, U, F, G, H>>,
    Json(req): Json<AlertRequest>,
) -> AlertResponse
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    let alerts = state
        .alerts
        .derive_alerts(
            &req.city,
            req.current_temp,
            &req.current_condition,
            AlertContext {
                air_quality_index: req.air_quality_index,
            },
        )
        .await;
    AlertResponse::Ok(Json(alerts))
}
