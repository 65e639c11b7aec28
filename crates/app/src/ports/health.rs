//! Store health port.

use std::collections::BTreeMap;
use std::future::Future;

use serde::Serialize;

/// Outcome of a store health probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StoreHealthReport {
    Healthy {
        tables: Vec<String>,
        record_counts: BTreeMap<String, i64>,
    },
    Error {
        message: String,
    },
}

impl StoreHealthReport {
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy { .. })
    }
}

/// Probe the backing store. Failures are reported, never raised.
pub trait StoreHealth {
    fn health_check(&self) -> impl Future<Output = StoreHealthReport> + Send;
}
