//! Week bucketing with a Monday-start convention.

use time::{Date, Duration};

/// Return the Monday on or before `date`.
///
/// Weekdays are counted from Monday (Monday = 0 .. Sunday = 6) regardless of
/// the platform or locale week-start convention, so the same date always maps
/// to the same bucket.
pub fn week_start(date: Date) -> Date {
    let days_from_monday = date.weekday().number_days_from_monday() as i64;

    date - Duration::days(days_from_monday)
}
