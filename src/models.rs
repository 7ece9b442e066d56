use chrono::{DateTime, Utc};

/// Canonical stored representation of one fixture.
///
/// Identity fields (`matchup_id`, team names, date) are written once on
/// insert and never rewritten; scores, logo references and the next-matchup
/// flag evolve across sync runs. Records are never deleted by the sync.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchupRecord {
    /// Composite key: upstream match code plus raw date text. The federation
    /// reuses match codes across rescheduled dates, so the code alone is not
    /// unique.
    pub matchup_id: String,
    /// Absolute start instant, or `None` when the published date could not
    /// be parsed. Dateless records are stored but never flagged as next.
    pub matchup_date: Option<DateTime<Utc>>,
    /// Roster category label, attached when the record is first inserted.
    pub category: String,
    /// True for at most one record per category; recomputed on every run.
    pub is_next_matchup: bool,
    pub team_home: String,
    pub team_away: String,
    pub score_home: i32,
    pub score_away: i32,
    /// Court identifier, known only for matches not yet played.
    pub court: Option<String>,
    pub src_image_team_home: Option<String>,
    pub src_image_team_away: Option<String>,
}

/// Outcome of reconciling one roster's freshly scraped records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileSummary {
    pub parsed: usize,
    pub inserted: usize,
    pub updated: usize,
    pub next_matchup_id: Option<String>,
}
