//! SQLite ledger backend (feature `sqlite`).
//!
//! Creates a single `ledger.db` file in the configured output directory with
//! two tables: `audit_entries` and `routes`.

use std::path::Path;

use rusqlite::Connection;

use crate::{AuditRow, OutputResult, RouteRow};
use crate::writer::LedgerWriter;

/// Writes the ledger to an SQLite database.
pub struct SqliteLedgerWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteLedgerWriter {
    /// Open (or create) `ledger.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("ledger.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS audit_entries (
                 seq                   INTEGER PRIMARY KEY,
                 alpha                 REAL NOT NULL,
                 fastest_emissions_g   REAL NOT NULL,
                 chosen_emissions_g    REAL NOT NULL,
                 fastest_time_min      REAL NOT NULL,
                 chosen_time_min       REAL NOT NULL,
                 carbon_saved_g        REAL NOT NULL,
                 inference_duration_ms REAL NOT NULL,
                 timestamp             TEXT NOT NULL
             );
             CREATE TABLE IF NOT EXISTS routes (
                 seq               INTEGER NOT NULL,
                 variant           TEXT NOT NULL,
                 path              TEXT NOT NULL,
                 total_time_min    REAL NOT NULL,
                 total_emissions_g REAL NOT NULL,
                 total_distance_km REAL NOT NULL,
                 green_credits     REAL NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl LedgerWriter for SqliteLedgerWriter {
    fn write_entries(&mut self, rows: &[AuditRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO audit_entries \
                 (seq, alpha, fastest_emissions_g, chosen_emissions_g, fastest_time_min, \
                  chosen_time_min, carbon_saved_g, inference_duration_ms, timestamp) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.seq as i64,
                    row.alpha,
                    row.fastest_emissions_g,
                    row.chosen_emissions_g,
                    row.fastest_time_min,
                    row.chosen_time_min,
                    row.carbon_saved_g,
                    row.inference_duration_ms,
                    row.timestamp,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO routes \
                 (seq, variant, path, total_time_min, total_emissions_g, total_distance_km, green_credits) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.seq as i64,
                    row.variant,
                    row.path,
                    row.total_time_min,
                    row.total_emissions_g,
                    row.total_distance_km,
                    row.green_credits,
                ])?;
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
