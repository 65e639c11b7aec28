//! `OpenWeatherMap` adapter errors and their mapping onto [`GatewayError`].

use weatherwise_domain::error::GatewayError;

/// Failures raised while talking to the provider.
#[derive(Debug, thiserror::Error)]
pub enum OpenWeatherError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("payload is missing {0}")]
    MissingField(&'static str),

    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("invalid credentials")]
    Unauthorized,

    #[error("provider returned {status}: {message}")]
    Status { status: u16, message: String },
}

impl From<OpenWeatherError> for GatewayError {
    fn from(err: OpenWeatherError) -> Self {
        match err {
            OpenWeatherError::Transport(inner) if inner.is_timeout() => Self::Timeout,
            OpenWeatherError::Transport(inner) if inner.is_decode() => {
                Self::MalformedPayload(inner.to_string())
            }
            OpenWeatherError::Transport(inner) => Self::Connection(inner.to_string()),
            OpenWeatherError::Payload(inner) => Self::MalformedPayload(inner.to_string()),
            OpenWeatherError::MissingField(field) => {
                Self::MalformedPayload(format!("missing {field}"))
            }
            OpenWeatherError::CityNotFound(city) => Self::CityNotFound(city),
            OpenWeatherError::Unauthorized => Self::InvalidCredentials,
            OpenWeatherError::Status { status, message } => Self::Upstream { status, message },
        }
    }
}
