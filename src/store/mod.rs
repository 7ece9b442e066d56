//! SQLite persistence for matchup records and team logo lookups.
//!
//! One connection is opened per sync run and released when the handle is
//! dropped, on success and failure paths alike. Every operation is
//! independently atomic; only the next-matchup flag update spans a
//! transaction.

use crate::error::AppError;
use crate::models::MatchupRecord;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (and if needed creates) the matchup database at `path`.
    pub fn open(path: &Path) -> Result<Self, AppError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    /// In-memory database, used by tests.
    pub fn open_in_memory() -> Result<Self, AppError> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Store { conn })
    }

    /// Point lookup of a stored matchup by its composite key.
    pub fn find_matchup(&self, matchup_id: &str) -> Result<Option<MatchupRecord>, AppError> {
        let record = self
            .conn
            .query_row(
                r#"
                SELECT
                    matchup_id, matchup_date, category, is_next_matchup,
                    team_home, team_away, score_home, score_away, court,
                    src_image_team_home, src_image_team_away
                FROM matchups
                WHERE matchup_id = ?1
                "#,
                params![matchup_id],
                decode_matchup_row,
            )
            .optional()?;
        Ok(record)
    }

    /// Inserts a freshly observed matchup record.
    pub fn insert_matchup(&self, record: &MatchupRecord) -> Result<(), AppError> {
        self.conn.execute(
            r#"
            INSERT INTO matchups (
                matchup_id, matchup_date, category, is_next_matchup,
                team_home, team_away, score_home, score_away, court,
                src_image_team_home, src_image_team_away
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                record.matchup_id,
                record.matchup_date.map(|d| d.to_rfc3339()),
                record.category,
                record.is_next_matchup as i64,
                record.team_home,
                record.team_away,
                record.score_home,
                record.score_away,
                record.court,
                record.src_image_team_home,
                record.src_image_team_away,
            ],
        )?;
        Ok(())
    }

    /// Updates the mutable result fields of an existing record: scores and
    /// the two logo references. Identity fields stay untouched.
    pub fn update_matchup_result(
        &self,
        matchup_id: &str,
        score_home: i32,
        score_away: i32,
        logo_home: Option<&str>,
        logo_away: Option<&str>,
    ) -> Result<(), AppError> {
        self.conn.execute(
            r#"
            UPDATE matchups
            SET score_home = ?1, score_away = ?2,
                src_image_team_home = ?3, src_image_team_away = ?4
            WHERE matchup_id = ?5
            "#,
            params![score_home, score_away, logo_home, logo_away, matchup_id],
        )?;
        Ok(())
    }

    /// Flags `matchup_id` as the category's next matchup.
    ///
    /// Clears the flag on every other record of the category in the same
    /// transaction, so at most one record per category carries it at any
    /// point, across runs included.
    pub fn mark_next_matchup(&mut self, category: &str, matchup_id: &str) -> Result<(), AppError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "UPDATE matchups SET is_next_matchup = 0 WHERE category = ?1 AND is_next_matchup = 1",
            params![category],
        )?;
        tx.execute(
            "UPDATE matchups SET is_next_matchup = 1 WHERE matchup_id = ?1",
            params![matchup_id],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// All records carrying a category, in insertion order. Used by tests
    /// and operational inspection.
    pub fn matchups_for_category(&self, category: &str) -> Result<Vec<MatchupRecord>, AppError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT
                matchup_id, matchup_date, category, is_next_matchup,
                team_home, team_away, score_home, score_away, court,
                src_image_team_home, src_image_team_away
            FROM matchups
            WHERE category = ?1
            ORDER BY rowid ASC
            "#,
        )?;
        let rows = stmt.query_map(params![category], decode_matchup_row)?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Read-only logo lookup by team name. An unknown team is `None`, not
    /// an error.
    pub fn find_team_logo(&self, team_name: &str) -> Result<Option<String>, AppError> {
        let logo = self
            .conn
            .query_row(
                "SELECT logo_src FROM teams WHERE team_name = ?1",
                params![team_name],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        Ok(logo.flatten())
    }

    /// Inserts or replaces one team's logo reference. The sync itself never
    /// writes teams; this backs seeding and tests.
    pub fn upsert_team(&self, team_name: &str, logo_src: Option<&str>) -> Result<(), AppError> {
        self.conn.execute(
            r#"
            INSERT INTO teams (team_name, logo_src) VALUES (?1, ?2)
            ON CONFLICT(team_name) DO UPDATE SET logo_src = excluded.logo_src
            "#,
            params![team_name, logo_src],
        )?;
        Ok(())
    }
}

fn init_schema(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS matchups (
            matchup_id TEXT PRIMARY KEY,
            matchup_date TEXT NULL,
            category TEXT NOT NULL,
            is_next_matchup INTEGER NOT NULL DEFAULT 0,
            team_home TEXT NOT NULL,
            team_away TEXT NOT NULL,
            score_home INTEGER NOT NULL DEFAULT 0,
            score_away INTEGER NOT NULL DEFAULT 0,
            court TEXT NULL,
            src_image_team_home TEXT NULL,
            src_image_team_away TEXT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_matchups_category ON matchups(category);

        CREATE TABLE IF NOT EXISTS teams (
            team_name TEXT PRIMARY KEY,
            logo_src TEXT NULL
        );
        "#,
    )?;
    Ok(())
}

fn decode_matchup_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MatchupRecord> {
    let date_text: Option<String> = row.get(1)?;
    let matchup_date = date_text.as_deref().and_then(parse_stored_date);
    Ok(MatchupRecord {
        matchup_id: row.get(0)?,
        matchup_date,
        category: row.get(2)?,
        is_next_matchup: row.get::<_, i64>(3)? != 0,
        team_home: row.get(4)?,
        team_away: row.get(5)?,
        score_home: row.get(6)?,
        score_away: row.get(7)?,
        court: row.get(8)?,
        src_image_team_home: row.get(9)?,
        src_image_team_away: row.get(10)?,
    })
}

fn parse_stored_date(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
