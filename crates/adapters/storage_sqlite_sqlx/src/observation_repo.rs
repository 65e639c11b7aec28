//! `SQLite` implementation of [`ObservationRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use weatherwise_app::ports::ObservationRepository;
use weatherwise_domain::city::CityName;
use weatherwise_domain::error::WeatherWiseError;
use weatherwise_domain::id::ObservationId;
use weatherwise_domain::observation::{ObservationFilter, WeatherObservation};
use weatherwise_domain::time::{self, Timestamp, to_storage_string};

use crate::error::{StorageError, decode_error};

/// Wrapper for converting database rows into domain [`WeatherObservation`].
struct Wrapper(WeatherObservation);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let city: String = row.try_get("city")?;
        let temperature: f64 = row.try_get("temperature")?;
        let condition: String = row.try_get("condition")?;
        let recorded_at: String = row.try_get("recorded_at")?;

        let id = ObservationId::from_str(&id).map_err(decode_error)?;
        let recorded_at = chrono::DateTime::parse_from_rfc3339(&recorded_at)
            .map_err(decode_error)?
            .to_utc();

        Ok(Self(WeatherObservation {
            id,
            city,
            temperature,
            condition,
            recorded_at,
        }))
    }
}

const INSERT: &str = r"
    INSERT INTO weather_history (id, city, temperature, condition, recorded_at)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_SINCE: &str = r"
    SELECT * FROM weather_history
    WHERE city = ? AND recorded_at >= ?
    ORDER BY recorded_at ASC
";

// ?3/?4: previous-month spill, ?5/?6: next-month spill; NULL when absent.
const SELECT_SEASONAL: &str = r"
    SELECT * FROM weather_history
    WHERE city = ?1
      AND (
            CAST(strftime('%m', recorded_at) AS INTEGER) = ?2
         OR (?3 IS NOT NULL
             AND CAST(strftime('%m', recorded_at) AS INTEGER) = ?3
             AND CAST(strftime('%d', recorded_at) AS INTEGER) >= ?4)
         OR (?5 IS NOT NULL
             AND CAST(strftime('%m', recorded_at) AS INTEGER) = ?5
             AND CAST(strftime('%d', recorded_at) AS INTEGER) <= ?6)
      )
      AND CAST(strftime('%d', recorded_at) AS INTEGER) BETWEEN ?7 AND ?8
      AND recorded_at < ?9
    ORDER BY recorded_at ASC
";

const DELETE_BEFORE: &str = "DELETE FROM weather_history WHERE recorded_at < ?";

/// `SQLite`-backed observation history.
#[derive(Clone)]
pub struct SqliteObservationRepository {
    pool: SqlitePool,
}

impl SqliteObservationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn insert_row(
    pool: &SqlitePool,
    observation: &WeatherObservation,
) -> Result<(), StorageError> {
    sqlx::query(INSERT)
        .bind(observation.id.to_string())
        .bind(&observation.city)
        .bind(observation.temperature)
        .bind(&observation.condition)
        .bind(to_storage_string(observation.recorded_at))
        .execute(pool)
        .await?;
    Ok(())
}

impl ObservationRepository for SqliteObservationRepository {
    fn insert(
        &self,
        city: &CityName,
        temperature: f64,
        condition: &str,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        let observation = WeatherObservation::builder()
            .city(city)
            .temperature(temperature)
            .condition(condition)
            .recorded_at(time::now())
            .build();
        async move {
            insert_row(&pool, &observation).await?;
            Ok(observation)
        }
    }

    fn import(
        &self,
        observation: WeatherObservation,
    ) -> impl Future<Output = Result<WeatherObservation, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        async move {
            insert_row(&pool, &observation).await?;
            Ok(observation)
        }
    }

    fn find_by_city(
        &self,
        city: &CityName,
        filter: ObservationFilter,
    ) -> impl Future<Output = Result<Vec<WeatherObservation>, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        let key = city.key().to_string();
        async move {
            let rows: Vec<Wrapper> = match filter {
                ObservationFilter::Since(since) => sqlx::query_as(SELECT_SINCE)
                    .bind(&key)
                    .bind(to_storage_string(since))
                    .fetch_all(&pool)
                    .await
                    .map_err(StorageError::from)?,
                ObservationFilter::Seasonal { range, before } => sqlx::query_as(SELECT_SEASONAL)
                    .bind(&key)
                    .bind(range.month)
                    .bind(range.prev_month.map(|spill| spill.month))
                    .bind(range.prev_month.map(|spill| spill.min_day))
                    .bind(range.next_month.map(|spill| spill.month))
                    .bind(range.next_month.map(|spill| spill.max_day))
                    .bind(range.day_start)
                    .bind(range.day_end)
                    .bind(to_storage_string(before))
                    .fetch_all(&pool)
                    .await
                    .map_err(StorageError::from)?,
            };

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn purge_before(
        &self,
        cutoff: Timestamp,
    ) -> impl Future<Output = Result<u64, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BEFORE)
                .bind(to_storage_string(cutoff))
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected())
        }
    }
}
