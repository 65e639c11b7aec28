//! Storage ports: repository traits for the history and account store.

use std::future::Future;

use weatherwise_domain::account::{FavoriteCity, UserAccount};
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::WeatherWiseError;
use weatherwise_domain::id::UserId;
use weatherwise_domain::observation::{ObservationFilter, WeatherObservation};
use weatherwise_domain::time::Timestamp;

/// Append-only log of [`WeatherObservation`]s.
pub trait ObservationRepository {
    /// Append an observation, stamping `recorded_at` with the store's clock.
    fn insert(
        &self,
        city: &CityName,
        temperature: f64,
        condition: &str,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherWiseError>> + Send;

    /// Append an observation keeping its own `recorded_at`.
    fn import(
        &self,
        observation: WeatherObservation,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherWiseError>> + Send;

    /// Observations of `city` accepted by `filter`, oldest first.
    fn find_by_city(
        &self,
        city: &CityName,
        filter: ObservationFilter,
    ) -> impl Future<Output = Result<Vec<WeatherObservation>, WeatherWiseError>> + Send;

    /// Delete observations recorded strictly before `cutoff`, returning how many.
    fn purge_before(
        &self,
        cutoff: Timestamp,
    ) -> impl Future<Output = Result<u64, WeatherWiseError>> + Send;
}

/// Persistence for [`UserAccount`]s.
pub trait UserRepository {
    /// Fail with [`WeatherWiseError::Conflict`] when the username is taken.
    fn create(
        &self,
        user: UserAccount,
    ) -> impl Future<Output = Result<UserAccount, WeatherWiseError>> + Send;

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<UserAccount>, WeatherWiseError>> + Send;

    /// Delete a user together with its favorites.
    ///
    /// Returns [`WeatherWiseError::NotFound`] when no such user exists.
    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), WeatherWiseError>> + Send;
}

/// Persistence for [`FavoriteCity`]s.
pub trait FavoriteRepository {
    /// Fail with [`WeatherWiseError::Conflict`] when the user already has the city,
    /// and with [`ValidationError::FavoriteLimitReached`] when the user already
    /// holds [`MAX_FAVORITES`]. The limit check and the insert are one atomic step.
    ///
    /// [`ValidationError::FavoriteLimitReached`]: weatherwise_domain::error::ValidationError::FavoriteLimitReached
    /// [`MAX_FAVORITES`]: weatherwise_domain::account::MAX_FAVORITES
    fn add(
        &self,
        favorite: FavoriteCity,
    ) -> impl Future<Output = Result<FavoriteCity, WeatherWiseError>> + Send;

    /// Newest first.
    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<FavoriteCity>, WeatherWiseError>> + Send;

    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<usize, WeatherWiseError>> + Send;

    /// Returns whether a favorite was removed.
    fn remove(
        &self,
        user_id: UserId,
        city: &CityName,
    ) -> impl Future<Output = Result<bool, WeatherWiseError>> + Send;
}
