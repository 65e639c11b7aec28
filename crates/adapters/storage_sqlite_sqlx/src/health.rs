//! `SQLite` implementation of [`StoreHealth`].

use std::collections::BTreeMap;
use std::future::Future;

use sqlx::SqlitePool;

use weatherwise_app::ports::{StoreHealth, StoreHealthReport};

const SELECT_TABLES: &str = r"
    SELECT name FROM sqlite_master
    WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations'
    ORDER BY name
";

const COUNTS: [(&str, &str); 3] = [
    ("users", "SELECT COUNT(*) FROM users"),
    ("user_cities", "SELECT COUNT(*) FROM user_cities"),
    ("weather_history", "SELECT COUNT(*) FROM weather_history"),
];

/// Reports the schema's tables and their row counts.
#[derive(Clone)]
pub struct SqliteStoreHealth {
    pool: SqlitePool,
}

impl SqliteStoreHealth {
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn probe(&self) -> Result<StoreHealthReport, sqlx::Error> {
        let tables: Vec<(String,)> = sqlx::query_as(SELECT_TABLES).fetch_all(&self.pool).await?;
        let tables: Vec<String> = tables.into_iter().map(|(name,)| name).collect();

        let mut record_counts = BTreeMap::new();
        for (table, query) in COUNTS {
            if tables.iter().any(|name| name == table) {
                let (count,): (i64,) = sqlx::query_as(query).fetch_one(&self.pool).await?;
                record_counts.insert(table.to_string(), count);
            }
        }

        Ok(StoreHealthReport::Healthy {
            tables,
            record_counts,
        })
    }
}

impl StoreHealth for SqliteStoreHealth {
    fn health_check(&self) -> impl Future<Output = StoreHealthReport> + Send {
        async move {
            match self.probe().await {
                Ok(report) => report,
                Err(err) => {
                    tracing::error!(error = %err, "store health check failed");
                    StoreHealthReport::Error {
                        message: err.to_string(),
                    }
                }
            }
        }
    }
}
