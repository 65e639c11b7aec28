//! In-memory port implementations shared by the service tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use weatherwise_domain::account::{FavoriteCity, MAX_FAVORITES, UserAccount};
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::{
    ConflictError, GatewayError, NotFoundError, ValidationError, WeatherWiseError,
};
use weatherwise_domain::id::UserId;
use weatherwise_domain::observation::{ObservationFilter, WeatherObservation};
use weatherwise_domain::time::Timestamp;
use weatherwise_domain::weather::{AirQuality, Coordinates, CurrentConditions, DailyForecast};

use crate::ports::{FavoriteRepository, ObservationRepository, UserRepository, WeatherGateway};

#[derive(Debug)]
struct Unreachable;

impl std::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("store unreachable")
    }
}

impl std::error::Error for Unreachable {}

pub fn storage_error() -> WeatherWiseError {
    WeatherWiseError::Storage(Box::new(Unreachable))
}

#[derive(Clone, Default)]
pub struct InMemoryObservationRepo {
    pub rows: Arc<Mutex<Vec<WeatherObservation>>>,
    pub failing: bool,
    pub queries: Arc<Mutex<usize>>,
}

impl InMemoryObservationRepo {
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_rows(rows: Vec<WeatherObservation>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            ..Self::default()
        }
    }

    pub fn query_count(&self) -> usize {
        *self.queries.lock().unwrap()
    }
}

impl ObservationRepository for InMemoryObservationRepo {
    fn insert(
        &self,
        city: &CityName,
        temperature: f64,
        condition: &str,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherWiseError>> + Send {
        let result = if self.failing {
            Err(storage_error())
        } else {
            let obs = WeatherObservation::builder()
                .city(city)
                .temperature(temperature)
                .condition(condition)
                .build();
            self.rows.lock().unwrap().push(obs.clone());
            Ok(obs)
        };
        async { result }
    }

    fn import(
        &self,
        observation: WeatherObservation,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherWiseError>> + Send {
        let result = if self.failing {
            Err(storage_error())
        } else {
            self.rows.lock().unwrap().push(observation.clone());
            Ok(observation)
        };
        async { result }
    }

    fn find_by_city(
        &self,
        city: &CityName,
        filter: ObservationFilter,
    ) -> impl Future<Output = Result<Vec<WeatherObservation>, WeatherWiseError>> + Send {
        *self.queries.lock().unwrap() += 1;
        let result = if self.failing {
            Err(storage_error())
        } else {
            let mut rows: Vec<_> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.city == city.key() && filter.matches(o.recorded_at))
                .cloned()
                .collect();
            rows.sort_by_key(|o| o.recorded_at);
            Ok(rows)
        };
        async { result }
    }

    fn purge_before(
        &self,
        cutoff: Timestamp,
    ) -> impl Future<Output = Result<u64, WeatherWiseError>> + Send {
        let result = if self.failing {
            Err(storage_error())
        } else {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|o| o.recorded_at >= cutoff);
            Ok((before - rows.len()) as u64)
        };
        async { result }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAccountStore {
    pub users: Arc<Mutex<Vec<UserAccount>>>,
    pub favorites: Arc<Mutex<Vec<FavoriteCity>>>,
}

impl UserRepository for InMemoryAccountStore {
    fn create(
        &self,
        user: UserAccount,
    ) -> impl Future<Output = Result<UserAccount, WeatherWiseError>> + Send {
        let mut users = self.users.lock().unwrap();
        let result = if users.iter().any(|u| u.username == user.username) {
            Err(ConflictError {
                entity: "User",
                key: user.username.clone(),
            }
            .into())
        } else {
            users.push(user.clone());
            Ok(user)
        };
        async { result }
    }

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<UserAccount>, WeatherWiseError>> + Send {
        let found = self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned();
        async { Ok(found) }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), WeatherWiseError>> + Send {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        let result = if users.len() == before {
            Err(NotFoundError {
                entity: "User",
                id: id.to_string(),
            }
            .into())
        } else {
            self.favorites.lock().unwrap().retain(|f| f.user_id != id);
            Ok(())
        };
        async { result }
    }
}

impl FavoriteRepository for InMemoryAccountStore {
    fn add(
        &self,
        favorite: FavoriteCity,
    ) -> impl Future<Output = Result<FavoriteCity, WeatherWiseError>> + Send {
        let mut favorites = self.favorites.lock().unwrap();
        let duplicate = favorites
            .iter()
            .any(|f| f.user_id == favorite.user_id && f.city.key() == favorite.city.key());
        let held = favorites
            .iter()
            .filter(|f| f.user_id == favorite.user_id)
            .count();
        let result = if duplicate {
            Err(ConflictError {
                entity: "Favorite",
                key: favorite.city.to_string(),
            }
            .into())
        } else if held >= MAX_FAVORITES {
            Err(ValidationError::FavoriteLimitReached { max: MAX_FAVORITES }.into())
        } else {
            favorites.push(favorite.clone());
            Ok(favorite)
        };
        async { result }
    }

    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<FavoriteCity>, WeatherWiseError>> + Send {
        let mut list: Vec<_> = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        list.reverse();
        async { Ok(list) }
    }

    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<usize, WeatherWiseError>> + Send {
        let count = self
            .favorites
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id)
            .count();
        async move { Ok(count) }
    }

    fn remove(
        &self,
        user_id: UserId,
        city: &CityName,
    ) -> impl Future<Output = Result<bool, WeatherWiseError>> + Send {
        let mut favorites = self.favorites.lock().unwrap();
        let before = favorites.len();
        favorites.retain(|f| !(f.user_id == user_id && f.city.key() == city.key()));
        let removed = favorites.len() != before;
        async move { Ok(removed) }
    }
}

/// Gateway returning canned answers.
#[derive(Clone)]
pub struct StubGateway {
    pub current: Result<CurrentConditions, GatewayError>,
    pub forecast: Result<Vec<DailyForecast>, GatewayError>,
    pub air_quality: Option<AirQuality>,
    pub requested_days: Arc<Mutex<Vec<u8>>>,
}

impl StubGateway {
    pub fn new(current: CurrentConditions, forecast: Vec<DailyForecast>) -> Self {
        Self {
            current: Ok(current),
            forecast: Ok(forecast),
            air_quality: None,
            requested_days: Arc::default(),
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            current: Err(error.clone()),
            forecast: Err(error),
            air_quality: None,
            requested_days: Arc::default(),
        }
    }
}

impl WeatherGateway for StubGateway {
    fn fetch_current(
        &self,
        _city: &CityName,
    ) -> impl Future<Output = Result<CurrentConditions, GatewayError>> + Send {
        let result = self.current.clone();
        async { result }
    }

    fn fetch_forecast(
        &self,
        _city: &CityName,
        days: u8,
    ) -> impl Future<Output = Result<Vec<DailyForecast>, GatewayError>> + Send {
        self.requested_days.lock().unwrap().push(days);
        let result = self
            .forecast
            .clone()
            .map(|days_list| days_list.into_iter().take(usize::from(days)).collect());
        async { result }
    }

    fn fetch_air_quality(
        &self,
        _coordinates: Coordinates,
    ) -> impl Future<Output = Option<AirQuality>> + Send {
        let result = self.air_quality;
        async move { result }
    }
}

pub fn current(city: &str, temp_c: f64, description: &str) -> CurrentConditions {
    CurrentConditions {
        city: city.to_string(),
        temp_c,
        feels_like_c: Some(temp_c - 1.0),
        humidity_pct: 60,
        wind_speed_mps: 3.5,
        wind_direction_deg: Some(180),
        condition_main: "Clear".to_string(),
        condition_description: description.to_string(),
        pressure_hpa: Some(1013),
        visibility_m: Some(10_000),
        sunrise: None,
        sunset: None,
        coordinates: Some(Coordinates {
            lat: 45.52,
            lon: -122.68,
        }),
    }
}

pub fn observation(city: &str, temperature: f64, recorded_at: Timestamp) -> WeatherObservation {
    WeatherObservation::builder()
        .city(&CityName::parse(city).unwrap())
        .temperature(temperature)
        .condition("clear")
        .recorded_at(recorded_at)
        .build()
}
