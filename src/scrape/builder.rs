//! Assembly of canonical matchup records from validated rows.

use crate::error::AppError;
use crate::models::MatchupRecord;
use crate::scrape::dates::normalize_matchup_date;
use crate::scrape::row::{ParsedRow, RowOutcome};
use crate::store::Store;

/// Builds one canonical record from a validated row, resolving team logo
/// references from the team table.
///
/// The category and next-matchup flag are owned by the reconciler; the
/// record leaves here with an empty category and the flag cleared. Every
/// optional upstream field resolves to a default rather than a failure, so
/// the only error path is a team-table lookup failing at the database layer.
pub fn build_record(row: &ParsedRow, store: &Store) -> Result<MatchupRecord, AppError> {
    let matchup_date = normalize_matchup_date(row.date_text.as_deref(), row.time_text.as_deref());

    let team_home = row.team_home.clone().unwrap_or_default();
    let team_away = row.team_away.clone().unwrap_or_default();

    let (score_home, score_away, court) = match &row.outcome {
        RowOutcome::Played {
            score_home,
            score_away,
        } => (*score_home, *score_away, None),
        RowOutcome::Scheduled { court } => (0, 0, court.clone()),
    };

    let src_image_team_home = store.find_team_logo(&team_home)?;
    let src_image_team_away = store.find_team_logo(&team_away)?;

    // The federation reuses match codes across rescheduled dates; pairing
    // the code with the raw date text keeps the key unique.
    let matchup_id = format!(
        "{}#{}",
        row.match_code.as_deref().unwrap_or(""),
        row.date_text.as_deref().unwrap_or("")
    );

    Ok(MatchupRecord {
        matchup_id,
        matchup_date,
        category: String::new(),
        is_next_matchup: false,
        team_home,
        team_away,
        score_home,
        score_away,
        court,
        src_image_team_home,
        src_image_team_away,
    })
}
