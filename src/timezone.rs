//! Conversions between UTC instants and dates in the app's local timezone.
//!
//! Daily records are keyed by calendar date, so "today" must always be
//! computed in the configured timezone rather than UTC.

use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name, e.g. "Asia/Jakarta".
///
/// Returns `None` if the timezone name is not a known canonical timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Convert a UTC instant to the calendar date it falls on in the timezone
/// given by `local_offset`.
pub fn to_local_date(instant: OffsetDateTime, local_offset: UtcOffset) -> Date {
    instant.to_offset(local_offset).date()
}

/// Today's date in the timezone given by `local_offset`.
pub fn local_date_today(local_offset: UtcOffset) -> Date {
    to_local_date(OffsetDateTime::now_utc(), local_offset)
}
