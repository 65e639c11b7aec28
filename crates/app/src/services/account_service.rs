//! Account service: users and their favorite cities.

use weatherwise_domain::account::{FavoriteCity, MAX_FAVORITES, UserAccount, normalize_username};
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::{ConflictError, NotFoundError, ValidationError, WeatherWiseError};

use crate::ports::{FavoriteRepository, UserRepository};

/// Application service for accounts and favorites.
pub struct AccountService<U, F> {
    users: U,
    favorites: F,
}

impl<U: UserRepository, F: FavoriteRepository> AccountService<U, F> {
    /// Create a new service backed by the given repositories.
    pub fn new(users: U, favorites: F) -> Self {
        Self { users, favorites }
    }

    /// Return the account for `username`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::Validation`] for a blank or overlong
    /// username, or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_or_create_user(&self, username: &str) -> Result<UserAccount, WeatherWiseError> {
        let username = normalize_username(username)?;
        if let Some(user) = self.users.get_by_username(username).await? {
            return Ok(user);
        }
        let user = UserAccount::builder().username(username).build()?;
        match self.users.create(user).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "user created");
                Ok(user)
            }
            // Lost a race with a concurrent registration.
            Err(WeatherWiseError::Conflict(_)) => self.get_user(username).await,
            Err(err) => Err(err),
        }
    }

    /// Look up an existing user.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::NotFound`] when the user does not exist.
    pub async fn get_user(&self, username: &str) -> Result<UserAccount, WeatherWiseError> {
        let username = normalize_username(username)?;
        self.users.get_by_username(username).await?.ok_or_else(|| {
            NotFoundError {
                entity: "User",
                id: username.to_string(),
            }
            .into()
        })
    }

    /// Delete a user and, by cascade, its favorites.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::NotFound`] when the user does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, username: &str) -> Result<(), WeatherWiseError> {
        let user = self.get_user(username).await?;
        self.users.delete(user.id).await?;
        tracing::info!(user_id = %user.id, "user deleted");
        Ok(())
    }

    /// Pin `city` for `username`, creating the user if needed.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::FavoriteLimitReached`] past [`MAX_FAVORITES`]
    /// - [`WeatherWiseError::Conflict`] when the city is already a favorite
    /// - [`WeatherWiseError::Validation`] for an invalid city or username
    #[tracing::instrument(skip(self))]
    pub async fn add_favorite(
        &self,
        username: &str,
        city: &str,
    ) -> Result<FavoriteCity, WeatherWiseError> {
        let city = CityName::parse(city)?;
        let user = self.get_or_create_user(username).await?;

        let existing = self.favorites.list_by_user(user.id).await?;
        if existing.iter().any(|f| f.city.key() == city.key()) {
            return Err(ConflictError {
                entity: "Favorite",
                key: city.to_string(),
            }
            .into());
        }
        if existing.len() >= MAX_FAVORITES {
            return Err(ValidationError::FavoriteLimitReached { max: MAX_FAVORITES }.into());
        }

        self.favorites.add(FavoriteCity::new(user.id, city)).await
    }

    /// Favorites of `username`, newest first. Unknown users have none.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn list_favorites(&self, username: &str) -> Result<Vec<FavoriteCity>, WeatherWiseError> {
        let username = normalize_username(username)?;
        match self.users.get_by_username(username).await? {
            Some(user) => self.favorites.list_by_user(user.id).await,
            None => Ok(Vec::new()),
        }
    }

    /// Number of favorites `username` holds.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the repository.
    pub async fn count_favorites(&self, username: &str) -> Result<usize, WeatherWiseError> {
        let username = normalize_username(username)?;
        match self.users.get_by_username(username).await? {
            Some(user) => self.favorites.count_by_user(user.id).await,
            None => Ok(0),
        }
    }

    /// Unpin `city` for `username`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherWiseError::NotFound`] when the user or the favorite
    /// does not exist.
    #[tracing::instrument(skip(self))]
    pub async fn remove_favorite(&self, username: &str, city: &str) -> Result<(), WeatherWiseError> {
        let city = CityName::parse(city)?;
        let user = self.get_user(username).await?;
        if self.favorites.remove(user.id, &city).await? {
            Ok(())
        } else {
            Err(NotFoundError {
                entity: "Favorite",
                id: city.to_string(),
            }
            .into())
        }
    }
}
