//! Reconciliation of freshly scraped records against stored state.

use crate::error::AppError;
use crate::models::{MatchupRecord, ReconcileSummary};
use crate::store::Store;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// Merges one roster's scraped records into the store and re-flags the
/// matchup closest to `now` for the roster's category.
///
/// Unknown `matchup_id`s are inserted as-is with the category attached;
/// known ones get only their scores and freshly resolved logo references
/// updated, keeping insert-time identity fields as the source of truth.
/// Records without a parseable date take part in the merge but are excluded
/// from the nearest-matchup comparison.
///
/// Fail-fast: the first store error aborts this roster's reconciliation.
/// Records already written stay written; no rollback is attempted.
pub fn reconcile_roster(
    store: &mut Store,
    category: &str,
    records: &[MatchupRecord],
    now: DateTime<Utc>,
) -> Result<ReconcileSummary, AppError> {
    let mut inserted = 0usize;
    let mut updated = 0usize;

    // Strict less-than: the first record seen wins ties.
    let mut closest_id: Option<String> = None;
    let mut closest_distance = i64::MAX;

    for record in records {
        if let Some(date) = record.matchup_date {
            let distance = (date - now).num_milliseconds().abs();
            if distance < closest_distance {
                closest_distance = distance;
                closest_id = Some(record.matchup_id.clone());
            }
        }

        match store.find_matchup(&record.matchup_id)? {
            None => {
                let mut fresh = record.clone();
                fresh.category = category.to_string();
                fresh.is_next_matchup = false;
                store.insert_matchup(&fresh)?;
                inserted += 1;
                debug!("Inserted matchup {}", record.matchup_id);
            }
            Some(_) => {
                // Logos are re-resolved from the team table on every visit
                // so a later-added logo reaches older records.
                let logo_home = store.find_team_logo(&record.team_home)?;
                let logo_away = store.find_team_logo(&record.team_away)?;
                store.update_matchup_result(
                    &record.matchup_id,
                    record.score_home,
                    record.score_away,
                    logo_home.as_deref(),
                    logo_away.as_deref(),
                )?;
                updated += 1;
                debug!("Updated matchup {}", record.matchup_id);
            }
        }
    }

    if let Some(matchup_id) = &closest_id {
        store.mark_next_matchup(category, matchup_id)?;
        info!("Next matchup for {category}: {matchup_id}");
    }

    Ok(ReconcileSummary {
        parsed: records.len(),
        inserted,
        updated,
        next_matchup_id: closest_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-12T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn record(id: &str, date_offset_hours: i64) -> MatchupRecord {
        MatchupRecord {
            matchup_id: id.to_string(),
            matchup_date: Some(now() + Duration::hours(date_offset_hours)),
            category: String::new(),
            is_next_matchup: false,
            team_home: "AV92".to_string(),
            team_away: "PARIS UC".to_string(),
            score_home: 0,
            score_away: 0,
            court: None,
            src_image_team_home: None,
            src_image_team_away: None,
        }
    }

    #[test]
    fn test_first_run_inserts_all_records() {
        let mut store = Store::open_in_memory().unwrap();
        let records = vec![record("M1#10-01-25", -48), record("M2#17-01-25", 120)];

        let summary = reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();

        assert_eq!(summary.parsed, 2);
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.updated, 0);
        // M1 is 48h away, M2 120h away
        assert_eq!(summary.next_matchup_id.as_deref(), Some("M1#10-01-25"));

        let stored = store.matchups_for_category("NATIONALE 2 M").unwrap();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|r| r.category == "NATIONALE 2 M"));
    }

    #[test]
    fn test_second_run_updates_in_place() {
        let mut store = Store::open_in_memory().unwrap();
        let records = vec![record("M1#10-01-25", -48), record("M2#17-01-25", 120)];
        reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();

        let summary = reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();
        assert_eq!(summary.inserted, 0);
        assert_eq!(summary.updated, 2);
        assert_eq!(store.matchups_for_category("NATIONALE 2 M").unwrap().len(), 2);
    }

    #[test]
    fn test_idempotent_reruns_leave_identical_state() {
        let mut store = Store::open_in_memory().unwrap();
        let records = vec![record("M1#10-01-25", -48), record("M2#17-01-25", 120)];

        reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();
        let first = store.matchups_for_category("NATIONALE 2 M").unwrap();

        reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();
        let second = store.matchups_for_category("NATIONALE 2 M").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_exactly_one_next_flag() {
        let mut store = Store::open_in_memory().unwrap();
        let records = vec![
            record("M1#10-01-25", -200),
            record("M2#17-01-25", 30),
            record("M3#24-01-25", 200),
        ];
        reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();

        let flagged: Vec<_> = store
            .matchups_for_category("NATIONALE 2 M")
            .unwrap()
            .into_iter()
            .filter(|r| r.is_next_matchup)
            .collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].matchup_id, "M2#17-01-25");
    }

    #[test]
    fn test_nearest_past_beats_farther_future() {
        let mut store = Store::open_in_memory().unwrap();
        // Comparison is on absolute distance, not future-only
        let records = vec![record("M1#10-01-25", -10), record("M2#17-01-25", 50)];
        let summary = reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();
        assert_eq!(summary.next_matchup_id.as_deref(), Some("M1#10-01-25"));
    }

    #[test]
    fn test_tie_broken_by_encounter_order() {
        let mut store = Store::open_in_memory().unwrap();
        let records = vec![record("M1#10-01-25", 24), record("M2#14-01-25", -24)];
        let summary = reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();
        assert_eq!(summary.next_matchup_id.as_deref(), Some("M1#10-01-25"));
    }

    #[test]
    fn test_dateless_records_excluded_from_selection() {
        let mut store = Store::open_in_memory().unwrap();
        let mut dateless = record("M0#", 0);
        dateless.matchup_date = None;
        let records = vec![dateless, record("M1#10-01-25", 500)];

        let summary = reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();
        assert_eq!(summary.next_matchup_id.as_deref(), Some("M1#10-01-25"));
        // The dateless record is still stored
        assert_eq!(store.matchups_for_category("NATIONALE 2 M").unwrap().len(), 2);
    }

    #[test]
    fn test_all_dateless_batch_sets_no_flag() {
        let mut store = Store::open_in_memory().unwrap();
        let mut dateless = record("M0#", 0);
        dateless.matchup_date = None;
        let summary =
            reconcile_roster(&mut store, "NATIONALE 2 M", &[dateless], now()).unwrap();

        assert_eq!(summary.next_matchup_id, None);
        let stored = store.matchups_for_category("NATIONALE 2 M").unwrap();
        assert!(!stored[0].is_next_matchup);
    }

    #[test]
    fn test_empty_batch_is_noop() {
        let mut store = Store::open_in_memory().unwrap();
        let summary = reconcile_roster(&mut store, "NATIONALE 2 M", &[], now()).unwrap();
        assert_eq!(summary, ReconcileSummary::default());
    }

    #[test]
    fn test_update_refreshes_logos_from_team_table() {
        let mut store = Store::open_in_memory().unwrap();
        let records = vec![record("M1#10-01-25", 48)];
        reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();

        // Logo added after the first visit reaches the record on the next run
        store.upsert_team("AV92", Some("/img/av92.png")).unwrap();
        reconcile_roster(&mut store, "NATIONALE 2 M", &records, now()).unwrap();

        let stored = store.find_matchup("M1#10-01-25").unwrap().unwrap();
        assert_eq!(stored.src_image_team_home.as_deref(), Some("/img/av92.png"));
    }

    #[test]
    fn test_score_correction_scenario() {
        let mut store = Store::open_in_memory().unwrap();

        let mut played = record("M1#10-01-25", -48);
        played.score_home = 3;
        played.score_away = 1;
        let mut scheduled = record("M2#17-01-25", 120);
        scheduled.court = Some("Court 2".to_string());
        reconcile_roster(
            &mut store,
            "NATIONALE 2 M",
            &[played.clone(), scheduled.clone()],
            now(),
        )
        .unwrap();

        // Upstream corrects M1's score; M2 is untouched
        played.score_away = 2;
        reconcile_roster(&mut store, "NATIONALE 2 M", &[played, scheduled], now()).unwrap();

        let m1 = store.find_matchup("M1#10-01-25").unwrap().unwrap();
        assert_eq!((m1.score_home, m1.score_away), (3, 2));

        let m2 = store.find_matchup("M2#17-01-25").unwrap().unwrap();
        assert_eq!((m2.score_home, m2.score_away), (0, 0));
        assert_eq!(m2.court.as_deref(), Some("Court 2"));
    }

    #[test]
    fn test_stale_flag_cleared_when_nearest_moves() {
        let mut store = Store::open_in_memory().unwrap();
        let older = record("M1#10-01-25", 24);
        let newer = record("M2#17-01-25", 192);
        reconcile_roster(
            &mut store,
            "NATIONALE 2 M",
            &[older.clone(), newer.clone()],
            now(),
        )
        .unwrap();
        assert!(
            store
                .find_matchup("M1#10-01-25")
                .unwrap()
                .unwrap()
                .is_next_matchup
        );

        // A week later M1 is far in the past and M2 is the nearest
        let later = now() + Duration::days(8);
        reconcile_roster(&mut store, "NATIONALE 2 M", &[older, newer], later).unwrap();

        assert!(
            !store
                .find_matchup("M1#10-01-25")
                .unwrap()
                .unwrap()
                .is_next_matchup
        );
        assert!(
            store
                .find_matchup("M2#17-01-25")
                .unwrap()
                .unwrap()
                .is_next_matchup
        );
    }
}
