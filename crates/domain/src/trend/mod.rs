//! Temperature trends: which observations to look at, and how to summarise them.
//!
//! Two query modes exist:
//! - **recent**: the last `N` days of a city's history;
//! - **seasonal**: a ±15 day-of-month band around today's calendar date,
//!   evaluated across every stored year, used as the "normal for this time of
//!   year" baseline by the alert rules.

mod summary;
mod window;

use std::num::NonZeroU32;

pub use summary::{TrendSummary, mean_of_averages, summarize};
pub use window::{
    DEFAULT_RADIUS_DAYS, NextMonthSpill, PrevMonthSpill, SeasonalRange, TrendWindow,
};

use crate::error::ValidationError;

/// How a trend query selects observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendMode {
    /// Observations recorded in the last `days` days.
    Recent { days: NonZeroU32 },
    /// The seasonal band around today's calendar date.
    Seasonal,
}

impl TrendMode {
    /// Recent-window mode.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTrendWindow`] when `days` is zero.
    pub fn recent(days: u32) -> Result<Self, ValidationError> {
        NonZeroU32::new(days)
            .map(|days| Self::Recent { days })
            .ok_or(ValidationError::EmptyTrendWindow)
    }
}
