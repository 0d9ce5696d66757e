//! Calendar-day arithmetic shared by the retroplanning scheduler and its renderers.
//!
//! Every date handled here is a plain calendar day. Inputs carrying a time or a
//! timezone are first truncated to their UTC day with [`to_utc_day`].

use crate::errors::{Error, Result};
use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};

/// Wire format of a calendar day.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Formats a day as `YYYY-MM-DD`.
#[must_use]
pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` string.
///
/// # Errors
/// Returns [`Error::InvalidDate`] if the string is not a valid calendar day.
pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DAY_FORMAT).map_err(|_| Error::InvalidDate {
        value: value.to_string(),
    })
}

/// Truncates an instant to its UTC calendar day, discarding time-of-day and offset.
#[must_use]
pub fn to_utc_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.with_timezone(&Utc).date_naive()
}

/// Moves a day forward (positive) or backward (negative) by whole days.
///
/// Saturates at chrono's representable range instead of panicking.
#[must_use]
pub fn shift_days(day: NaiveDate, delta: i64) -> NaiveDate {
    let magnitude = Days::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        day.checked_add_days(magnitude)
    } else {
        day.checked_sub_days(magnitude)
    };
    shifted.unwrap_or(if delta >= 0 {
        NaiveDate::MAX
    } else {
        NaiveDate::MIN
    })
}

/// Inclusive number of days from `start` to `end`.
///
/// A single-day range counts as 1. An inverted range yields 0 or less.
#[must_use]
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days() + 1
}

/// [`days_between`] over `YYYY-MM-DD` strings.
///
/// # Errors
/// Returns [`Error::InvalidDate`] if either string fails to parse.
pub fn days_between_str(start: &str, end: &str) -> Result<i64> {
    Ok(days_between(parse_day(start)?, parse_day(end)?))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use chrono::FixedOffset;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_and_parse_day() {
        assert_eq!(format_day(day(2025, 3, 6)), "2025-03-06");
        assert_eq!(parse_day("2025-03-06").unwrap(), day(2025, 3, 6));
        assert_eq!(parse_day(" 2025-12-31 ").unwrap(), day(2025, 12, 31));
    }

    #[test]
    fn test_parse_day_rejects_garbage() {
        assert!(matches!(
            parse_day("06/03/2025"),
            Err(Error::InvalidDate { value }) if value == "06/03/2025"
        ));
        assert!(parse_day("2025-02-30").is_err());
    }

    #[test]
    fn test_to_utc_day_discards_offset() {
        // 01:30 in Paris on the 10th is still the 9th in UTC
        let paris = FixedOffset::east_opt(2 * 3600).unwrap();
        let instant = paris.with_ymd_and_hms(2025, 3, 10, 1, 30, 0).unwrap();
        assert_eq!(to_utc_day(&instant), day(2025, 3, 9));

        let utc = Utc.with_ymd_and_hms(2025, 3, 10, 23, 59, 59).unwrap();
        assert_eq!(to_utc_day(&utc), day(2025, 3, 10));
    }

    #[test]
    fn test_shift_days_crosses_month_and_year() {
        assert_eq!(shift_days(day(2025, 3, 1), -1), day(2025, 2, 28));
        assert_eq!(shift_days(day(2024, 3, 1), -1), day(2024, 2, 29));
        assert_eq!(shift_days(day(2025, 12, 31), 1), day(2026, 1, 1));
        assert_eq!(shift_days(day(2025, 6, 15), 0), day(2025, 6, 15));
    }

    #[test]
    fn test_days_between_is_inclusive() {
        assert_eq!(days_between(day(2025, 3, 6), day(2025, 3, 10)), 5);
        assert_eq!(days_between(day(2025, 3, 10), day(2025, 3, 10)), 1);
        assert_eq!(days_between(day(2025, 3, 11), day(2025, 3, 10)), 0);
        assert_eq!(days_between_str("2025-02-27", "2025-03-02").unwrap(), 4);
        assert!(days_between_str("nope", "2025-03-02").is_err());
    }
}
