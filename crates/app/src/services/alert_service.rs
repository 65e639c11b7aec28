//! Alert Engine: compares current conditions with the seasonal baseline.

use weatherwise_domain::alert::{self, Alert};
use weatherwise_domain::time::{self, Timestamp};
use weatherwise_domain::trend::{TrendMode, mean_of_averages};

use crate::ports::ObservationRepository;
use crate::services::trend_service::TrendService;

/// Optional inputs to [`AlertService::derive_alerts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertContext {
    /// Air quality index on the 1 (best) to 5 (worst) scale.
    pub air_quality_index: Option<u8>,
}

#[derive(Clone)]
pub struct AlertService<R> {
    trends: TrendService<R>,
}

impl<R: ObservationRepository> AlertService<R> {
    pub fn new(trends: TrendService<R>) -> Self {
        Self { trends }
    }

    /// Alerts for the given conditions: seasonal deviation, then severe
    /// conditions, then air quality. Never fails; a missing baseline only
    /// skips the deviation check.
    pub async fn derive_alerts(
        &self,
        city: &str,
        current_temp: f64,
        current_condition: &str,
        context: AlertContext,
    ) -> Vec<Alert> {
        self.derive_alerts_at(city, current_temp, current_condition, context, time::now())
            .await
    }

    #[tracing::instrument(skip(self, now))]
    pub async fn derive_alerts_at(
        &self,
        city: &str,
        current_temp: f64,
        current_condition: &str,
        context: AlertContext,
        now: Timestamp,
    ) -> Vec<Alert> {
        let seasonal = self
            .trends
            .compute_trends_at(city, TrendMode::Seasonal, now)
            .await;
        let baseline = mean_of_averages(&seasonal);
        if baseline.is_none() {
            tracing::debug!("no seasonal history, skipping deviation check");
        }

        let alerts = alert::evaluate(
            city,
            current_temp,
            current_condition,
            baseline,
            context.air_quality_index,
        );
        tracing::debug!(count = alerts.len(), "alerts derived");
        alerts
    }
}
