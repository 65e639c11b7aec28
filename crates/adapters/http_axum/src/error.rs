//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use weatherwise_domain::error::{GatewayError, ValidationError, WeatherWiseError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Status code and user-facing message for an error.
///
/// Storage failures are logged here and replaced by a generic message.
pub(crate) fn classify(err: &WeatherWiseError) -> (StatusCode, String) {
    match err {
        WeatherWiseError::Validation(inner) => (StatusCode::BAD_REQUEST, inner.to_string()),
        WeatherWiseError::NotFound(inner) => (StatusCode::NOT_FOUND, inner.to_string()),
        WeatherWiseError::Conflict(inner) => (StatusCode::CONFLICT, inner.to_string()),
        WeatherWiseError::Gateway(inner @ GatewayError::CityNotFound(_)) => {
            (StatusCode::NOT_FOUND, inner.to_string())
        }
        WeatherWiseError::Gateway(inner) => (StatusCode::BAD_GATEWAY, inner.to_string()),
        WeatherWiseError::Storage(inner) => {
            tracing::error!(error = %inner, "storage error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

/// Maps [`WeatherWiseError`] to an HTTP response with appropriate status code.
pub struct ApiError(WeatherWiseError);

impl From<WeatherWiseError> for ApiError {
    fn from(err: WeatherWiseError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = classify(&self.0);
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
