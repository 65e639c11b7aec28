//! Seasonal Trend Analyzer: selects a city's history and aggregates it per day.

use weatherwise_domain::city::CityName;
use weatherwise_domain::observation::ObservationFilter;
use weatherwise_domain::time::{self, Timestamp};
use weatherwise_domain::trend::{TrendMode, TrendSummary, summarize};

use crate::ports::ObservationRepository;

/// Computes [`TrendSummary`] sequences from stored observations.
///
/// Never fails: an invalid city or an unreachable store yields an empty
/// result, the latter logged with `condition = "StoreUnavailable"`.
#[derive(Clone)]
pub struct TrendService<R> {
    repo: R,
}

impl<R: ObservationRepository> TrendService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Per-day summaries for `city`, oldest date first.
    pub async fn compute_trends(&self, city: &str, mode: TrendMode) -> Vec<TrendSummary> {
        self.compute_trends_at(city, mode, time::now()).await
    }

    /// Same as [`compute_trends`](Self::compute_trends) with an explicit clock.
    #[tracing::instrument(skip(self, now))]
    pub async fn compute_trends_at(
        &self,
        city: &str,
        mode: TrendMode,
        now: Timestamp,
    ) -> Vec<TrendSummary> {
        let Ok(city) = CityName::parse(city) else {
            tracing::debug!("skipping trend query for invalid city");
            return Vec::new();
        };
        let filter = ObservationFilter::for_mode(mode, now);
        match self.repo.find_by_city(&city, filter).await {
            Ok(rows) => summarize(&rows),
            Err(error) => {
                tracing::error!(
                    condition = "StoreUnavailable",
                    city = %city,
                    %error,
                    "trend query failed, returning no data"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::testing::{InMemoryObservationRepo, observation};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 3, 20, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn should_summarize_recent_window() {
        let repo = InMemoryObservationRepo::with_rows(vec![
            observation("Portland", 10.0, now() - Duration::days(2)),
            observation("Portland", 14.0, now() - Duration::days(2) + Duration::hours(1)),
            observation("Portland", 20.0, now() - Duration::days(1)),
            observation("Portland", 30.0, now() - Duration::days(10)),
            observation("Seattle", 5.0, now() - Duration::days(1)),
        ]);
        let svc = TrendService::new(repo);

        let trends = svc
            .compute_trends_at("portland", TrendMode::recent(7).unwrap(), now())
            .await;

        assert_eq!(trends.len(), 2);
        assert!((trends[0].avg_temp - 12.0).abs() < 1e-9);
        assert!((trends[1].avg_temp - 20.0).abs() < 1e-9);
        assert!(trends[0].date < trends[1].date);
    }

    #[tokio::test]
    async fn should_span_past_years_in_seasonal_mode() {
        let repo = InMemoryObservationRepo::with_rows(vec![
            observation("Pdx", 18.0, Utc.with_ymd_and_hms(2023, 3, 12, 9, 0, 0).unwrap()),
            observation("Pdx", 22.0, Utc.with_ymd_and_hms(2024, 3, 28, 9, 0, 0).unwrap()),
            observation("Pdx", 40.0, Utc.with_ymd_and_hms(2024, 7, 20, 9, 0, 0).unwrap()),
            observation("Pdx", 99.0, now() - Duration::hours(3)),
        ]);
        let svc = TrendService::new(repo);

        let trends = svc
            .compute_trends_at("Pdx", TrendMode::Seasonal, now())
            .await;

        let temps: Vec<_> = trends.iter().map(|t| t.avg_temp).collect();
        assert_eq!(temps, vec![18.0, 22.0]);
    }

    #[tokio::test]
    async fn should_cover_whole_history_for_huge_recent_window() {
        let repo = InMemoryObservationRepo::with_rows(vec![
            observation("Pdx", 8.0, Utc.with_ymd_and_hms(1999, 1, 2, 9, 0, 0).unwrap()),
            observation("Pdx", 16.0, now() - Duration::days(1)),
        ]);
        let svc = TrendService::new(repo);

        let trends = svc
            .compute_trends_at("Pdx", TrendMode::recent(u32::MAX).unwrap(), now())
            .await;

        let temps: Vec<_> = trends.iter().map(|t| t.avg_temp).collect();
        assert_eq!(temps, vec![8.0, 16.0]);
    }

    #[tokio::test]
    async fn should_return_empty_without_querying_when_city_blank() {
        let repo = InMemoryObservationRepo::default();
        let svc = TrendService::new(repo.clone());

        let trends = svc.compute_trends_at("  ", TrendMode::Seasonal, now()).await;

        assert!(trends.is_empty());
        assert_eq!(repo.query_count(), 0);
    }

    #[tokio::test]
    async fn should_return_empty_when_store_unavailable() {
        let svc = TrendService::new(InMemoryObservationRepo::failing());

        let trends = svc
            .compute_trends_at("Pdx", TrendMode::recent(3).unwrap(), now())
            .await;

        assert!(trends.is_empty());
    }

    #[tokio::test]
    async fn should_return_identical_results_when_called_twice() {
        let repo = InMemoryObservationRepo::with_rows(vec![
            observation("Pdx", 11.0, now() - Duration::days(1)),
            observation("Pdx", 13.0, now() - Duration::days(3)),
        ]);
        let svc = TrendService::new(repo);
        let mode = TrendMode::recent(5).unwrap();

        let first = svc.compute_trends_at("Pdx", mode, now()).await;
        let second = svc.compute_trends_at("Pdx", mode, now()).await;

        assert_eq!(first, second);
    }
}
