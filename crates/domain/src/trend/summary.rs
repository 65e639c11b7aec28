use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::observation::WeatherObservation;

/// Per-day aggregate of the observations selected by a trend query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    pub date: NaiveDate,
    pub avg_temp: f64,
    pub min_temp: f64,
    pub max_temp: f64,
    /// Distinct conditions seen that day, sorted for display.
    pub conditions: BTreeSet<String>,
    pub samples: usize,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    min: f64,
    max: f64,
    conditions: BTreeSet<String>,
    samples: usize,
}

impl Accumulator {
    fn push(&mut self, obs: &WeatherObservation) {
        if self.samples == 0 {
            self.min = obs.temperature;
            self.max = obs.temperature;
        } else {
            self.min = self.min.min(obs.temperature);
            self.max = self.max.max(obs.temperature);
        }
        self.sum += obs.temperature;
        self.samples += 1;
        self.conditions.insert(obs.condition.clone());
    }

    #[allow(clippy::cast_precision_loss)]
    fn finish(self, date: NaiveDate) -> TrendSummary {
        TrendSummary {
            date,
            avg_temp: self.sum / self.samples as f64,
            min_temp: self.min,
            max_temp: self.max,
            conditions: self.conditions,
            samples: self.samples,
        }
    }
}

/// Group observations by UTC calendar date, oldest date first.
#[must_use]
pub fn summarize(observations: &[WeatherObservation]) -> Vec<TrendSummary> {
    let mut days: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    for obs in observations {
        days.entry(obs.recorded_at.date_naive())
            .or_default()
            .push(obs);
    }
    days.into_iter()
        .map(|(date, acc)| acc.finish(date))
        .collect()
}

/// Mean of the per-day averages, or `None` when there are no summaries.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_of_averages(summaries: &[TrendSummary]) -> Option<f64> {
    if summaries.is_empty() {
        return None;
    }
    let total: f64 = summaries.iter().map(|s| s.avg_temp).sum();
    Some(total / summaries.len() as f64)
}
