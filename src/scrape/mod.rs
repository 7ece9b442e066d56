//! Extraction of matchup records from the calendar page markup.

pub mod builder;
pub mod dates;
pub mod row;

pub use builder::build_record;
pub use dates::normalize_matchup_date;
pub use row::{ParsedRow, RawCell, RawRow, RowOutcome};
