//! SQLite log backend (feature `sqlite`).
//!
//! Creates a single `replay.db` file in the configured output directory
//! with two tables: `event_log` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::LogWriter;
use crate::{EventLogRow, OutputResult, TickSummaryRow};

/// Writes the replay log to an SQLite database.
pub struct SqliteLogWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteLogWriter {
    /// Open (or create) `replay.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("replay.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS event_log (
                 time_ms  INTEGER NOT NULL,
                 entity   TEXT    NOT NULL,
                 severity TEXT    NOT NULL,
                 kind     TEXT    NOT NULL,
                 peer     TEXT    NOT NULL,
                 detail   TEXT    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick          INTEGER PRIMARY KEY,
                 time_ms       INTEGER NOT NULL,
                 notifications INTEGER NOT NULL,
                 live_entities INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl LogWriter for SqliteLogWriter {
    fn write_event(&mut self, row: &EventLogRow) -> OutputResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO event_log (time_ms, entity, severity, kind, peer, detail) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        stmt.execute(rusqlite::params![
            row.time_ms,
            row.entity,
            row.severity,
            row.kind,
            row.peer,
            row.detail,
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries (tick, time_ms, notifications, live_entities) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![row.tick, row.time_ms, row.notifications, row.live_entities],
        )?;
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
