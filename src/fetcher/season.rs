//! Season derivation from the current date.
//!
//! The federation keys its calendar pages by season, written as
//! `start/end` (e.g. `2024/2025`). A season starts in the second half of the
//! calendar year: before July the running season began the previous year.

use crate::constants::season::BOUNDARY_MONTH;
use chrono::{Datelike, Utc};

/// Returns the starting year of the season that `date` falls in.
pub fn season_start_year(date: impl Datelike) -> i32 {
    if date.month() < BOUNDARY_MONTH {
        date.year() - 1
    } else {
        date.year()
    }
}

/// Encodes a season for URL embedding. The separating slash must be
/// percent-encoded, the years must not.
pub fn encode_season(start_year: i32) -> String {
    format!("{start_year}%2F{}", start_year + 1)
}

/// The running season, encoded for URL embedding.
pub fn current_season_encoded() -> String {
    encode_season(season_start_year(Utc::now().date_naive()))
}
