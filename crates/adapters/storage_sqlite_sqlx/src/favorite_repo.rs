//! `SQLite` implementation of [`FavoriteRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use weatherwise_app::ports::FavoriteRepository;
use weatherwise_domain::account::{FavoriteCity, MAX_FAVORITES};
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::{ConflictError, ValidationError, WeatherWiseError};
use weatherwise_domain::id::{FavoriteId, UserId};
use weatherwise_domain::time::to_storage_string;

use crate::error::{StorageError, decode_error};

struct Wrapper(FavoriteCity);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let user_id: String = row.try_get("user_id")?;
        let city: String = row.try_get("city")?;
        let created_at: String = row.try_get("created_at")?;

        let id = FavoriteId::from_str(&id).map_err(decode_error)?;
        let user_id = UserId::from_str(&user_id).map_err(decode_error)?;
        let city = CityName::parse(&city).map_err(decode_error)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(decode_error)?
            .to_utc();

        Ok(Self(FavoriteCity {
            id,
            user_id,
            city,
            created_at,
        }))
    }
}

/// Inserts only while the user holds fewer than the bound limit, so the cap
/// holds under concurrent adds.
const INSERT_UNDER_LIMIT: &str = r"
    INSERT INTO user_cities (id, user_id, city, city_key, created_at)
    SELECT ?, ?, ?, ?, ?
    WHERE (SELECT COUNT(*) FROM user_cities WHERE user_id = ?) < ?
";
const SELECT_BY_USER: &str =
    "SELECT * FROM user_cities WHERE user_id = ? ORDER BY created_at DESC, rowid DESC";
const COUNT_BY_USER: &str = "SELECT COUNT(*) FROM user_cities WHERE user_id = ?";
const DELETE: &str = "DELETE FROM user_cities WHERE user_id = ? AND city_key = ?";

/// `SQLite`-backed favorite cities.
#[derive(Clone)]
pub struct SqliteFavoriteRepository {
    pool: SqlitePool,
}

impl SqliteFavoriteRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl FavoriteRepository for SqliteFavoriteRepository {
    fn add(
        &self,
        favorite: FavoriteCity,
    ) -> impl Future<Output = Result<FavoriteCity, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT_UNDER_LIMIT)
                .bind(favorite.id.to_string())
                .bind(favorite.user_id.to_string())
                .bind(favorite.city.as_str())
                .bind(favorite.city.key())
                .bind(to_storage_string(favorite.created_at))
                .bind(favorite.user_id.to_string())
                .bind(i64::try_from(MAX_FAVORITES).unwrap_or(i64::MAX))
                .execute(&pool)
                .await
                .map_err(StorageError::from);

            match result {
                Ok(done) if done.rows_affected() == 0 => {
                    Err(ValidationError::FavoriteLimitReached { max: MAX_FAVORITES }.into())
                }
                Ok(_) => Ok(favorite),
                Err(err) if err.is_unique_violation() => Err(ConflictError {
                    entity: "Favorite",
                    key: favorite.city.to_string(),
                }
                .into()),
                Err(err) => Err(err.into()),
            }
        }
    }

    fn list_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<Vec<FavoriteCity>, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_USER)
                .bind(user_id.to_string())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn count_by_user(
        &self,
        user_id: UserId,
    ) -> impl Future<Output = Result<usize, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let (count,): (i64,) = sqlx::query_as(COUNT_BY_USER)
                .bind(user_id.to_string())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(usize::try_from(count).unwrap_or_default())
        }
    }

    fn remove(
        &self,
        user_id: UserId,
        city: &CityName,
    ) -> impl Future<Output = Result<bool, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        let key = city.key().to_string();
        async move {
            let result = sqlx::query(DELETE)
                .bind(user_id.to_string())
                .bind(&key)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
