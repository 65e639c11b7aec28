//! # weatherwise-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `weatherwise-app::ports::storage`
//! - Implement the `StoreHealth` probe
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings, so both text
//! comparison and `strftime` month/day extraction work on them directly.
//!
//! ## Dependency rule
//! Depends on `weatherwise-app` (for port traits) and `weatherwise-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod favorite_repo;
mod health;
mod observation_repo;
mod pool;
mod user_repo;

pub use error::StorageError;
pub use favorite_repo::SqliteFavoriteRepository;
pub use health::SqliteStoreHealth;
pub use observation_repo::SqliteObservationRepository;
pub use pool::{Config, Database};
pub use user_repo::SqliteUserRepository;
