//! `SQLite` implementation of [`UserRepository`].

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use weatherwise_app::ports::UserRepository;
use weatherwise_domain::account::UserAccount;
use weatherwise_domain::error::{ConflictError, NotFoundError, WeatherWiseError};
use weatherwise_domain::id::UserId;
use weatherwise_domain::time::to_storage_string;

use crate::error::{StorageError, decode_error};

/// Wrapper for converting database rows into domain [`UserAccount`].
struct Wrapper(UserAccount);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<UserAccount> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: String = row.try_get("id")?;
        let username: String = row.try_get("username")?;
        let unique_id: String = row.try_get("unique_id")?;
        let created_at: String = row.try_get("created_at")?;

        let id = UserId::from_str(&id).map_err(decode_error)?;
        let unique_id = uuid::Uuid::parse_str(&unique_id).map_err(decode_error)?;
        let created_at = chrono::DateTime::parse_from_rfc3339(&created_at)
            .map_err(decode_error)?
            .to_utc();

        Ok(Self(UserAccount {
            id,
            username,
            unique_id,
            created_at,
        }))
    }
}

const INSERT: &str = "INSERT INTO users (id, username, unique_id, created_at) VALUES (?, ?, ?, ?)";
const SELECT_BY_USERNAME: &str = "SELECT * FROM users WHERE username = ?";
const DELETE_BY_ID: &str = "DELETE FROM users WHERE id = ?";

/// `SQLite`-backed user repository.
#[derive(Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    fn create(
        &self,
        user: UserAccount,
    ) -> impl Future<Output = Result<UserAccount, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(user.id.to_string())
                .bind(&user.username)
                .bind(user.unique_id.to_string())
                .bind(to_storage_string(user.created_at))
                .execute(&pool)
                .await
                .map_err(StorageError::from);

            match result {
                Ok(_) => Ok(user),
                Err(err) if err.is_unique_violation() => Err(ConflictError {
                    entity: "User",
                    key: user.username,
                }
                .into()),
                Err(err) => Err(err.into()),
            }
        }
    }

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<UserAccount>, WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        let username = username.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_USERNAME)
                .bind(&username)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn delete(&self, id: UserId) -> impl Future<Output = Result<(), WeatherWiseError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "User",
                    id: id.to_string(),
                }
                .into());
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteUserRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteUserRepository::new(db.pool().clone())
    }

    fn user(name: &str) -> UserAccount {
        UserAccount::builder().username(name).build().unwrap()
    }

    #[tokio::test]
    async fn should_create_and_fetch_user_by_username() {
        let repo = setup().await;
        let created = repo.create(user("alice")).await.unwrap();

        let fetched = repo.get_by_username("alice").await.unwrap().unwrap();

        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.unique_id, created.unique_id);
        assert_eq!(fetched.username, "alice");
    }

    #[tokio::test]
    async fn should_return_none_when_username_unknown() {
        let repo = setup().await;
        assert!(repo.get_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_return_conflict_when_username_taken() {
        let repo = setup().await;
        repo.create(user("alice")).await.unwrap();

        let result = repo.create(user("alice")).await;

        assert!(matches!(result, Err(WeatherWiseError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_delete_user() {
        let repo = setup().await;
        let created = repo.create(user("alice")).await.unwrap();

        repo.delete(created.id).await.unwrap();

        assert!(repo.get_by_username("alice").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_user() {
        let repo = setup().await;

        let result = repo.delete(UserId::new()).await;

        assert!(matches!(result, Err(WeatherWiseError::NotFound(_))));
    }
}
