//! SQLite storage for tournaments and team results

mod reports;
mod schema;

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{BassError, Result};
use crate::model::{Lake, ResultRow};

/// Storage format for the `date` column.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A tournament ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTournament<'a> {
    pub date: NaiveDate,
    pub lake: Option<Lake>,
    pub region: Option<&'a str>,
    pub tournament: &'a str,
    pub trail: Option<&'a str>,
}

/// Database connection and operations
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create the database at the given path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| BassError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path)?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Create an in-memory database (for testing)
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Database { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        schema::create_tables(&self.conn)?;
        Ok(())
    }

    // ==================== Tournament Operations ====================

    /// Find a tournament by its identity, the (date, name) pair.
    pub fn find_tournament(&self, date: NaiveDate, name: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM tournaments WHERE date = ?1 AND tournament = ?2",
                params![date.format(DATE_FORMAT).to_string(), name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Insert a tournament and return its new id.
    pub fn insert_tournament(&self, tournament: &NewTournament) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO tournaments (date, lake, region, tournament, tournament_trail)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                tournament.date.format(DATE_FORMAT).to_string(),
                tournament.lake.map(|lake| lake.to_string()),
                tournament.region,
                tournament.tournament,
                tournament.trail,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn tournament_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM tournaments", [], |row| row.get(0))?;
        Ok(count)
    }

    // ==================== Result Operations ====================

    /// Insert one team finish for `tournament_id`.
    pub fn insert_result(&self, tournament_id: i64, result: &ResultRow) -> Result<i64> {
        let (angler2, angler2_hometown) = match result.partner() {
            Some((name, hometown)) => (Some(name), hometown),
            None => (None, None),
        };
        let angler1_hometown = Some(result.angler1_hometown.as_str()).filter(|t| !t.is_empty());

        self.conn.execute(
            "INSERT INTO results (
                tournament_id, place, skeeter_boat, angler1, angler1_hometown,
                angler2, angler2_hometown, fish, big_bass, weight, prize
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                tournament_id,
                result.place,
                result.skeeter_boat,
                result.angler1,
                angler1_hometown,
                angler2,
                angler2_hometown,
                result.fish,
                result.big_bass,
                result.weight,
                result.prize_amount(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn result_count(&self, tournament_id: i64) -> Result<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM results WHERE tournament_id = ?1",
            params![tournament_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

/// Parse a stored `date` column value.
fn parse_stored_date(raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}
