//! City names and the case-insensitive key every lookup, observation and favorite hangs off.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest accepted city name, in characters.
pub const MAX_CITY_LEN: usize = 100;

/// A validated city name.
///
/// Keeps the trimmed name as entered for display, and a lower-cased key used
/// for every store match so that `"Paris"` and `"paris "` refer to the same
/// history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CityName {
    name: String,
    key: String,
}

impl CityName {
    /// Validate and normalise a raw city name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCity`] when the input is blank and
    /// [`ValidationError::CityTooLong`] past [`MAX_CITY_LEN`] characters.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        if name.chars().count() > MAX_CITY_LEN {
            return Err(ValidationError::CityTooLong { max: MAX_CITY_LEN });
        }
        Ok(Self {
            name: name.to_string(),
            key: name.to_lowercase(),
        })
    }

    /// The trimmed name as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The lower-cased match key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for CityName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CityName> for String {
    fn from(value: CityName) -> Self {
        value.name
    }
}
