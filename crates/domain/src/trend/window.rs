//! Seasonal day-of-month window with month-boundary widening.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::time::Timestamp;

/// Radius used by the seasonal baseline.
pub const DEFAULT_RADIUS_DAYS: u32 = 15;

/// Day-of-month ceiling used by the window arithmetic, whatever the month.
const MAX_DAY: i64 = 31;

/// A calendar band of `radius_days` around `reference_date`.
///
/// Not persisted; recomputed on every query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindow {
    reference_date: NaiveDate,
    radius_days: u32,
}

/// Widening into the month before the reference month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrevMonthSpill {
    pub month: u32,
    /// Rows of `month` qualify from this day-of-month on.
    pub min_day: i64,
}

/// Widening into the month after the reference month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextMonthSpill {
    pub month: u32,
    /// Rows of `month` qualify up to this day-of-month.
    pub max_day: i64,
}

/// The month predicate and clamped day band a [`TrendWindow`] resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeasonalRange {
    pub month: u32,
    /// Always within `1..=31`.
    pub day_start: u32,
    /// Always within `day_start..=31`.
    pub day_end: u32,
    pub prev_month: Option<PrevMonthSpill>,
    pub next_month: Option<NextMonthSpill>,
}

impl TrendWindow {
    #[must_use]
    pub fn new(reference_date: NaiveDate, radius_days: u32) -> Self {
        Self {
            reference_date,
            radius_days,
        }
    }

    /// The ±[`DEFAULT_RADIUS_DAYS`] window used for alert baselines.
    #[must_use]
    pub fn seasonal(reference_date: NaiveDate) -> Self {
        Self::new(reference_date, DEFAULT_RADIUS_DAYS)
    }

    #[must_use]
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    #[must_use]
    pub fn radius_days(&self) -> u32 {
        self.radius_days
    }

    /// Resolve the window into a month predicate and a clamped day band.
    ///
    /// A raw start at or below zero records the previous month (December for
    /// January) with rows from day `31 + raw_start` on, and clamps the start to
    /// 1. A raw end past 31 records the next month (January for December) with
    /// rows up to day `raw_end - 31`, and clamps the end to 31. Both spills are
    /// independent.
    #[must_use]
    pub fn range(&self) -> SeasonalRange {
        let month = self.reference_date.month();
        let day = i64::from(self.reference_date.day());
        let radius = i64::from(self.radius_days);

        let raw_start = day - radius;
        let raw_end = day + radius;

        let prev_month = (raw_start <= 0).then(|| PrevMonthSpill {
            month: if month == 1 { 12 } else { month - 1 },
            min_day: MAX_DAY + raw_start,
        });
        let next_month = (raw_end > MAX_DAY).then(|| NextMonthSpill {
            month: if month == 12 { 1 } else { month + 1 },
            max_day: raw_end - MAX_DAY,
        });

        SeasonalRange {
            month,
            day_start: clamp_day(raw_start),
            day_end: clamp_day(raw_end),
            prev_month,
            next_month,
        }
    }
}

fn clamp_day(raw: i64) -> u32 {
    // Clamped to 1..=31 first, so the conversion cannot fail.
    u32::try_from(raw.clamp(1, MAX_DAY)).unwrap_or(1)
}

impl SeasonalRange {
    /// Whether the month predicate alone accepts `(month, day)`.
    #[must_use]
    pub fn month_matches(&self, month: u32, day: u32) -> bool {
        let day = i64::from(day);
        month == self.month
            || self
                .prev_month
                .is_some_and(|spill| month == spill.month && day >= spill.min_day)
            || self
                .next_month
                .is_some_and(|spill| month == spill.month && day <= spill.max_day)
    }

    /// Month predicate AND the day-of-month band, as applied to stored rows.
    ///
    /// The band applies to spill-month rows too.
    #[must_use]
    pub fn matches(&self, recorded_at: Timestamp) -> bool {
        let (month, day) = (recorded_at.month(), recorded_at.day());
        self.month_matches(month, day) && (self.day_start..=self.day_end).contains(&day)
    }
}
