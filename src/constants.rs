//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers and upstream-format constants
//! so that the calendar layout is described in exactly one place.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Default upstream domain hosting the FFVB calendar pages
pub const DEFAULT_SOURCE_DOMAIN: &str = "https://www.ffvbbeach.org";

/// Layout of the upstream calendar table
pub mod calendar {
    /// Selector for the rows of the calendar table. The page carries several
    /// layout tables before it; the calendar is the sixth child of `<body>`.
    pub const ROW_SELECTOR: &str = "body > table:nth-child(6) > tbody > tr";

    /// Date fragment format as published, e.g. `01-09-24`
    pub const DATE_FORMAT: &str = "%d-%m-%y";

    /// Time fragment format as published, e.g. `19:30`
    pub const TIME_FORMAT: &str = "%H:%M";

    /// The site publishes wall-clock times for its own timezone with no
    /// offset information; this compensates for the publication zone.
    pub const PUBLICATION_OFFSET_HOURS: i64 = 2;

    /// Minimum number of cells a data row must carry to be a calendar row
    pub const MIN_ROW_CELLS: usize = 9;

    /// Cell positions within one calendar row
    pub mod cell {
        pub const MATCH_CODE: usize = 0;
        pub const DATE: usize = 1;
        pub const TIME: usize = 2;
        pub const TEAM_HOME: usize = 3;
        pub const TEAM_AWAY: usize = 5;
        pub const SCORE_HOME: usize = 6;
        pub const SCORE_AWAY: usize = 7;
        pub const COURT: usize = 8;
    }
}

/// Season boundary logic
pub mod season {
    /// First month (1-based) that belongs to the season starting in the
    /// current year. Before July the running season started last year.
    pub const BOUNDARY_MONTH: u32 = 7;
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for source domain override
    pub const SOURCE_DOMAIN: &str = "MATCHUP_SOURCE_DOMAIN";

    /// Environment variable for database path override
    pub const DB_PATH: &str = "MATCHUP_DB_PATH";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "MATCHUP_LOG_FILE";

    /// Environment variable for HTTP timeout in seconds override
    pub const HTTP_TIMEOUT: &str = "MATCHUP_HTTP_TIMEOUT";
}

/// Retry configuration for transient fetch failures
pub mod retry {
    /// Maximum number of retry attempts per page fetch
    pub const MAX_ATTEMPTS: u32 = 3;

    /// Base delay for exponential backoff (milliseconds)
    pub const BASE_DELAY_MS: u64 = 250;
}
