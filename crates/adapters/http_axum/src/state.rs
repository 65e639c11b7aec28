//! Shared application state for axum handlers.

use std::sync::Arc;

use weatherwise_app::ports::{
    FavoriteRepository, ObservationRepository, StoreHealth, UserRepository, WeatherGateway,
};
use weatherwise_app::services::account_service::AccountService;
use weatherwise_app::services::alert_service::AlertService;
use weatherwise_app::services::history_service::HistoryService;
use weatherwise_app::services::lookup_service::LookupService;
use weatherwise_app::services::trend_service::TrendService;

/// Application state shared across all axum handlers.
///
/// Generic over the observation store `R`, the user and favorite stores
/// `U`/`F`, the weather gateway `G`, and the store health probe `H`.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R, U, F, G, H> {
    /// City lookups: current conditions, forecast, alerts, history.
    pub lookup: Arc<LookupService<R, G>>,
    /// Seasonal trend analyzer.
    pub trends: Arc<TrendService<R>>,
    /// Alert engine.
    pub alerts: Arc<AlertService<R>>,
    /// Retention sweep and sample data.
    pub history: Arc<HistoryService<R>>,
    /// Users and favorite cities.
    pub accounts: Arc<AccountService<U, F>>,
    /// Store health probe.
    pub health: Arc<H>,
}

impl<R, U, F, G, H> Clone for AppState<R, U, F, G, H> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            trends: Arc::clone(&self.trends),
            alerts: Arc::clone(&self.alerts),
            history: Arc::clone(&self.history),
            accounts: Arc::clone(&self.accounts),
            health: Arc::clone(&self.health),
        }
    }
}

impl<R, U, F, G, H> AppState<R, U, F, G, H>
where
    R: ObservationRepository + Clone + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FavoriteRepository + Send + Sync + 'static,
    G: WeatherGateway + Send + Sync + 'static,
    H: StoreHealth + Send + Sync + 'static,
{
    /// Create the state from a configured lookup service and the stores.
    ///
    /// `observations` backs the trend, alert, and history services.
    pub fn new(
        lookup: LookupService<R, G>,
        observations: R,
        accounts: AccountService<U, F>,
        health: H,
    ) -> Self {
        let trends = TrendService::new(observations.clone());
        Self {
            lookup: Arc::new(lookup),
            alerts: Arc::new(AlertService::new(trends.clone())),
            trends: Arc::new(trends),
            history: Arc::new(HistoryService::new(observations)),
            accounts: Arc::new(accounts),
            health: Arc::new(health),
        }
    }
}
