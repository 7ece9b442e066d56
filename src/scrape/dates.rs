//! Normalization of the published date/time fragments into UTC instants.

use crate::constants::calendar::{DATE_FORMAT, PUBLICATION_OFFSET_HOURS, TIME_FORMAT};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tracing::warn;

/// Combines the calendar's date and time fragments into one absolute
/// instant, applying the fixed publication-zone offset exactly once.
///
/// A missing date yields `None`: a record without a date cannot be
/// scheduled. A missing time yields midnight of that date. Malformed text
/// also yields `None` so the record is still stored but never picked as the
/// next matchup.
pub fn normalize_matchup_date(
    date: Option<&str>,
    time: Option<&str>,
) -> Option<DateTime<Utc>> {
    let date = date?;
    let day = match NaiveDate::parse_from_str(date.trim(), DATE_FORMAT) {
        Ok(day) => day,
        Err(e) => {
            warn!("Unparseable matchup date '{date}': {e}");
            return None;
        }
    };

    let time_of_day = match time {
        Some(time) => match NaiveTime::parse_from_str(time.trim(), TIME_FORMAT) {
            Ok(t) => t,
            Err(e) => {
                warn!("Unparseable matchup time '{time}': {e}");
                return None;
            }
        },
        None => NaiveTime::MIN,
    };

    Some(day.and_time(time_of_day).and_utc() + Duration::hours(PUBLICATION_OFFSET_HOURS))
}
