//! SQLite schema for tournament results
//!
//! Tables:
//! - tournaments: one row per (date, tournament name)
//! - results: one row per team finish, keyed to its tournament

use rusqlite::{Connection, Result};

/// Create both tables if they do not exist yet.
pub fn create_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS tournaments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date DATE,
            lake TEXT,
            region TEXT,
            tournament TEXT,
            tournament_trail TEXT
        );

        CREATE TABLE IF NOT EXISTS results (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            tournament_id INTEGER,
            place INTEGER,
            skeeter_boat BOOL,
            angler1 TEXT,
            angler1_hometown TEXT,
            angler2 TEXT,
            angler2_hometown TEXT,
            fish INTEGER,
            big_bass REAL,
            weight REAL,
            prize REAL,
            FOREIGN KEY(tournament_id) REFERENCES tournaments(id)
        );

        CREATE INDEX IF NOT EXISTS idx_tournaments_date_name ON tournaments(date, tournament);
        CREATE INDEX IF NOT EXISTS idx_results_tournament ON results(tournament_id);
        "#,
    )
}
