//! Accounts and their favorite cities.

use serde::{Deserialize, Serialize};

use crate::city::CityName;
use crate::error::{ValidationError, WeatherWiseError};
use crate::id::{FavoriteId, UserId};
use crate::time::Timestamp;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LEN: usize = 50;

/// Favorites a single account may hold.
pub const MAX_FAVORITES: usize = 10;

/// A registered user. `username` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: String,
    /// Public identifier, distinct from the row id.
    pub unique_id: uuid::Uuid,
    pub created_at: Timestamp,
}

impl UserAccount {
    /// Create a builder for constructing a [`UserAccount`].
    #[must_use]
    pub fn builder() -> UserAccountBuilder {
        UserAccountBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::Validation`] when `username` is blank or
    /// longer than [`MAX_USERNAME_LEN`].
    pub fn validate(&self) -> Result<(), WeatherWiseError> {
        normalize_username(&self.username)?;
        Ok(())
    }
}

/// Trim a raw username and check its length.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyUsername`] or
/// [`ValidationError::UsernameTooLong`].
pub fn normalize_username(raw: &str) -> Result<&str, ValidationError> {
    let username = raw.trim();
    if username.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }
    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(ValidationError::UsernameTooLong {
            max: MAX_USERNAME_LEN,
        });
    }
    Ok(username)
}

/// Step-by-step builder for [`UserAccount`].
#[derive(Debug, Default)]
pub struct UserAccountBuilder {
    id: Option<UserId>,
    username: Option<String>,
    unique_id: Option<uuid::Uuid>,
    created_at: Option<Timestamp>,
}

impl UserAccountBuilder {
    #[must_use]
    pub fn id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    #[must_use]
    pub fn unique_id(mut self, unique_id: uuid::Uuid) -> Self {
        self.unique_id = Some(unique_id);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Consume the builder, validate, and return a [`UserAccount`].
    ///
    /// The username is stored trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::Validation`] if `username` is missing,
    /// blank, or too long.
    pub fn build(self) -> Result<UserAccount, WeatherWiseError> {
        let raw = self.username.unwrap_or_default();
        let username = normalize_username(&raw)?.to_string();
        Ok(UserAccount {
            id: self.id.unwrap_or_default(),
            username,
            unique_id: self.unique_id.unwrap_or_else(uuid::Uuid::new_v4),
            created_at: self.created_at.unwrap_or_else(crate::time::now),
        })
    }
}

/// A city pinned by a user. `(user_id, city key)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteCity {
    pub id: FavoriteId,
    pub user_id: UserId,
    pub city: CityName,
    pub created_at: Timestamp,
}

impl FavoriteCity {
    #[must_use]
    pub fn new(user_id: UserId, city: CityName) -> Self {
        Self {
            id: FavoriteId::new(),
            user_id,
            city,
            created_at: crate::time::now(),
        }
    }
}
