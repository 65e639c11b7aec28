//! Builds the adapters and services both binaries run on.

use tracing_subscriber::EnvFilter;
use weatherwise_adapter_openweather_reqwest::{OpenWeatherClient, OpenWeatherError};
use weatherwise_adapter_storage_sqlite_sqlx::{
    SqliteFavoriteRepository, SqliteObservationRepository, SqliteStoreHealth,
    SqliteUserRepository, StorageError,
};
use weatherwise_app::services::account_service::AccountService;
use weatherwise_app::services::history_service::HistoryService;
use weatherwise_app::services::lookup_service::LookupService;
use weatherwise_domain::message::{MessageCatalog, SeededChooser};

use crate::config::Config;

pub type Lookup = LookupService<SqliteObservationRepository, OpenWeatherClient>;
pub type Accounts = AccountService<SqliteUserRepository, SqliteFavoriteRepository>;

/// Everything the presentation layers need, backed by `SQLite` and `OpenWeatherMap`.
pub struct Components {
    pub lookup: Lookup,
    pub observations: SqliteObservationRepository,
    pub accounts: Accounts,
    pub health: SqliteStoreHealth,
}

/// Failures while bringing the process up.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to open the database")]
    Storage(#[from] StorageError),
    #[error("failed to build the weather client")]
    Gateway(#[from] OpenWeatherError),
}

/// Install the global `tracing` subscriber. Logs go to stderr so they never
/// interleave with the menu on stdout.
pub fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

/// Open the database, run migrations, and construct every service.
///
/// # Errors
///
/// Returns [`StartupError`] if the database cannot be opened or the HTTP
/// client cannot be built.
pub async fn assemble(config: &Config) -> Result<Components, StartupError> {
    let db = weatherwise_adapter_storage_sqlite_sqlx::Config {
        database_url: config.database_url().to_string(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();

    let observations = SqliteObservationRepository::new(pool.clone());
    let gateway = OpenWeatherClient::new(config.gateway_config())?;
    let mut lookup =
        LookupService::new(gateway, observations.clone(), config.weather.forecast_days);
    if let Some(seed) = config.weather.message_seed {
        lookup = lookup.with_messages(MessageCatalog::default(), SeededChooser::new(seed));
    }

    Ok(Components {
        lookup,
        accounts: AccountService::new(
            SqliteUserRepository::new(pool.clone()),
            SqliteFavoriteRepository::new(pool.clone()),
        ),
        health: SqliteStoreHealth::new(pool),
        observations,
    })
}

/// Run the configured retention sweep, if any. Failures are logged only.
pub async fn sweep_history(observations: &SqliteObservationRepository, retention_days: Option<u32>) {
    let Some(days) = retention_days else {
        return;
    };
    match HistoryService::new(observations.clone())
        .purge_older_than(days)
        .await
    {
        Ok(deleted) => tracing::info!(days, deleted, "retention sweep complete"),
        Err(error) => tracing::warn!(days, %error, "retention sweep failed"),
    }
}
