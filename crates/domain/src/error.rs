//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WeatherWiseError`] via `#[from]` when crossing a port boundary.

/// Top-level error returned by ports and services.
#[derive(Debug, thiserror::Error)]
pub enum WeatherWiseError {
    /// Input failed a domain invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A record looked up by key does not exist.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// A uniqueness constraint would be violated.
    #[error("{0}")]
    Conflict(#[from] ConflictError),

    /// The weather provider could not answer.
    #[error("{0}")]
    Gateway(#[from] GatewayError),

    /// The history/account store failed.
    #[error("storage error")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("city name must not be empty")]
    EmptyCity,

    #[error("city name must be at most {max} characters")]
    CityTooLong { max: usize },

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username must be at most {max} characters")]
    UsernameTooLong { max: usize },

    #[error("trend window must cover at least one day")]
    EmptyTrendWindow,

    #[error("favorite limit of {max} cities reached")]
    FavoriteLimitReached { max: usize },

    #[error("retention period must be at least one day")]
    InvalidRetention,

    #[error("forecast must cover between 1 and {max} days")]
    InvalidForecastDays { max: u8 },
}

/// A keyed lookup found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A record with the same key already exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} already exists: {key}")]
pub struct ConflictError {
    pub entity: &'static str,
    pub key: String,
}

/// Failures surfaced by the weather gateway.
///
/// The `Display` text is what callers show to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("City '{0}' not found")]
    CityNotFound(String),

    #[error("Invalid weather API credentials")]
    InvalidCredentials,

    #[error("Connection error. Please check your internet connection. ({0})")]
    Connection(String),

    #[error("Request timed out. Try again later.")]
    Timeout,

    #[error("Unexpected data structure in response: {0}")]
    MalformedPayload(String),

    #[error("Weather API error {status}: {message}")]
    Upstream { status: u16, message: String },
}
