//! SQLite output backend (feature `sqlite`).
//!
//! Creates `output.db` in the output directory with the tables
//! `year_summaries`, `event_counts` and `trace`.

use std::path::Path;

use rusqlite::Connection;

use crate::error::ensure_open;
use crate::writer::OutputWriter;
use crate::{EventCountRow, OutputResult, TraceRow, YearSummaryRow};

pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS year_summaries (
                 year             INTEGER PRIMARY KEY,
                 persons          INTEGER NOT NULL,
                 households       INTEGER NOT NULL,
                 dwellings        INTEGER NOT NULL,
                 vacant_dwellings INTEGER NOT NULL,
                 vacancy_rate     REAL    NOT NULL,
                 jobs             INTEGER NOT NULL,
                 vacant_jobs      INTEGER NOT NULL,
                 average_price    REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS event_counts (
                 year     INTEGER NOT NULL,
                 kind     TEXT    NOT NULL,
                 category TEXT    NOT NULL,
                 count    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS trace (
                 year         INTEGER NOT NULL,
                 subject_kind TEXT    NOT NULL,
                 subject_id   INTEGER NOT NULL,
                 message      TEXT    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_year_summary(&mut self, row: &YearSummaryRow) -> OutputResult<()> {
        ensure_open(self.finished, "year_summaries", row.year)?;
        self.conn.execute(
            "INSERT INTO year_summaries \
             (year, persons, households, dwellings, vacant_dwellings, vacancy_rate, jobs, vacant_jobs, average_price) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.year,
                row.persons,
                row.households,
                row.dwellings,
                row.vacant_dwellings,
                row.vacancy_rate,
                row.jobs,
                row.vacant_jobs,
                row.average_price,
            ],
        )?;
        Ok(())
    }

    fn write_event_counts(&mut self, rows: &[EventCountRow]) -> OutputResult<()> {
        let Some(first) = rows.first() else { return Ok(()) };
        ensure_open(self.finished, "event_counts", first.year)?;
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO event_counts (year, kind, category, count) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.year, row.kind.as_str(), row.category, row.count])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_trace(&mut self, rows: &[TraceRow]) -> OutputResult<()> {
        let Some(first) = rows.first() else { return Ok(()) };
        ensure_open(self.finished, "trace", first.year)?;
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO trace (year, subject_kind, subject_id, message) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![row.year, row.subject_kind, row.subject_id, row.message])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
