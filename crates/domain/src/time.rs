//! Time and timestamp helpers.

use chrono::{DateTime, Days, NaiveDate, SecondsFormat, Utc};

/// UTC timestamp used for `recorded_at`, `created_at`, sunrise/sunset, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Render a timestamp in the fixed-width form used for storage.
///
/// Microsecond precision with a `Z` suffix keeps lexicographic order equal to
/// chronological order.
#[must_use]
pub fn to_storage_string(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Earliest instant [`to_storage_string`] renders in its fixed-width form,
/// `0000-01-01T00:00:00Z`.
#[must_use]
pub fn storage_floor() -> Timestamp {
    NaiveDate::from_ymd_opt(0, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(DateTime::UNIX_EPOCH, |naive| naive.and_utc())
}

/// The instant `days` whole days before `now`, clamped to [`storage_floor`].
#[must_use]
pub fn days_before(now: Timestamp, days: u32) -> Timestamp {
    now.checked_sub_days(Days::new(u64::from(days)))
        .map_or_else(storage_floor, |ts| ts.max(storage_floor()))
}
