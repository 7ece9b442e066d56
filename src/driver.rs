//! Per-roster sync orchestration.

use crate::config::{Config, RosterConfig};
use crate::error::AppError;
use crate::fetcher::{
    build_calendar_url, create_http_client, extract_data_rows, fetch_calendar_page,
};
use crate::models::ReconcileSummary;
use crate::reconcile::reconcile_roster;
use crate::scrape::{ParsedRow, build_record};
use crate::store::Store;
use chrono::Utc;
use reqwest::Client;
use tracing::{error, info, warn};

/// Per-run tally of roster outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Runs one complete sync pass over every configured roster.
///
/// Rosters are processed strictly sequentially; a failure in one is logged
/// and charged to the report without touching the others. With `dry_run`
/// set, pages are fetched and parsed but nothing is written.
pub async fn run(config: &Config, store: &mut Store, dry_run: bool) -> Result<RunReport, AppError> {
    let client = create_http_client(config)?;
    let season = crate::fetcher::current_season_encoded();
    info!("Starting sync for season {season} ({} rosters)", config.rosters.len());

    let mut report = RunReport::default();
    for roster in &config.rosters {
        match sync_roster(&client, config, store, &season, roster, dry_run).await {
            Ok(summary) => {
                info!(
                    "Roster {}: {} rows parsed, {} inserted, {} updated, next matchup {}",
                    roster.category,
                    summary.parsed,
                    summary.inserted,
                    summary.updated,
                    summary.next_matchup_id.as_deref().unwrap_or("none")
                );
                report.succeeded += 1;
            }
            Err(e) => {
                error!("Roster {} failed: {e}", roster.category);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

/// Fetches, parses and reconciles one roster's calendar.
///
/// Rows that fail shape validation are logged and skipped; the upstream
/// page interleaves header and separator noise that is not worth aborting
/// a whole roster for. Fetch and store errors do abort the roster.
async fn sync_roster(
    client: &Client,
    config: &Config,
    store: &mut Store,
    season: &str,
    roster: &RosterConfig,
    dry_run: bool,
) -> Result<ReconcileSummary, AppError> {
    let url = build_calendar_url(
        &config.source_domain,
        season,
        &roster.competition_code,
        &roster.pool,
        roster.team_index,
    );

    let html = fetch_calendar_page(client, &url).await?;
    let raw_rows = extract_data_rows(&html)?;

    let mut records = Vec::with_capacity(raw_rows.len());
    for raw in &raw_rows {
        match ParsedRow::from_raw(raw) {
            Ok(parsed) => records.push(build_record(&parsed, store)?),
            Err(e) => warn!("Skipping row for {}: {e}", roster.category),
        }
    }

    if dry_run {
        info!(
            "Dry run: {} records parsed for {}, skipping writes",
            records.len(),
            roster.category
        );
        return Ok(ReconcileSummary {
            parsed: records.len(),
            ..ReconcileSummary::default()
        });
    }

    reconcile_roster(store, &roster.category, &records, Utc::now())
}
