//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! three tables: `growth`, `conditions`, and `soil`.  Tables left by an
//! earlier run are dropped, matching the CSV backend's truncating files.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{ConditionsRow, GrowthRow, OutputResult, SoilRow};

pub const DB_FILE: &str = "output.db";

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and recreate the schema empty.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join(DB_FILE))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             DROP TABLE IF EXISTS growth;
             DROP TABLE IF EXISTS conditions;
             DROP TABLE IF EXISTS soil;
             CREATE TABLE growth (
                 crop_id INTEGER NOT NULL,
                 crop    TEXT    NOT NULL,
                 day     INTEGER NOT NULL,
                 biomass REAL    NOT NULL,
                 height  REAL    NOT NULL,
                 alive   INTEGER NOT NULL,
                 PRIMARY KEY (crop_id, day)
             );
             CREATE TABLE conditions (
                 day          INTEGER PRIMARY KEY,
                 sol_of_year  REAL NOT NULL,
                 hour         REAL NOT NULL,
                 solar        REAL NOT NULL,
                 temperature  REAL NOT NULL,
                 dust_opacity REAL NOT NULL
             );
             CREATE TABLE soil (
                 crop_id    INTEGER PRIMARY KEY,
                 crop       TEXT NOT NULL,
                 ph         REAL NOT NULL,
                 nitrogen   REAL NOT NULL,
                 phosphorus REAL NOT NULL,
                 potassium  REAL NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_soil(&mut self, rows: &[SoilRow<'_>]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO soil (crop_id, crop, ph, nitrogen, phosphorus, potassium) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.crop_id,
                    row.crop,
                    row.ph,
                    row.nitrogen,
                    row.phosphorus,
                    row.potassium,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_growth(&mut self, rows: &[GrowthRow<'_>]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO growth (crop_id, crop, day, biomass, height, alive) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.crop_id,
                    row.crop,
                    row.day,
                    row.biomass,
                    row.height,
                    row.alive as i64,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_conditions(&mut self, row: &ConditionsRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO conditions (day, sol_of_year, hour, solar, temperature, dust_opacity) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.day,
                row.sol_of_year,
                row.hour,
                row.solar,
                row.temperature,
                row.dust_opacity,
            ],
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
