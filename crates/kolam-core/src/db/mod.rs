//! SQLite backend for the repository seam.

mod schema;
mod clinicians;
mod patients;
mod designs;
mod tasks;
mod notes;
mod repository;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

use crate::models::{KolamDesign, Task};
use crate::store::SeedData;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Initialize schema.
    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Load seed records, skipping any whose ID is already present.
    pub fn seed(&mut self, seed: &SeedData) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        for clinician in &seed.clinicians {
            clinicians::insert(&tx, clinician, true)?;
        }
        for patient in &seed.patients {
            patients::insert(&tx, patient, true)?;
        }
        for design in &seed.designs {
            designs::insert(&tx, design, true)?;
        }
        for task in &seed.tasks {
            tasks::insert(&tx, task, true)?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Insert designs and their tasks in one transaction.
    pub fn insert_schedule(
        &mut self,
        new_designs: &[KolamDesign],
        new_tasks: &[Task],
    ) -> DbResult<()> {
        let tx = self.conn.transaction()?;
        for design in new_designs {
            designs::insert(&tx, design, false)?;
        }
        for task in new_tasks {
            tasks::insert(&tx, task, false)?;
        }
        tx.commit()?;
        Ok(())
    }
}

pub(crate) fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_date(s: &str) -> DbResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DbError::Constraint(format!("Invalid date {:?}: {}", s, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"clinicians".to_string()));
        assert!(tables.contains(&"patients".to_string()));
        assert!(tables.contains(&"kolam_designs".to_string()));
        assert!(tables.contains(&"tasks".to_string()));
        assert!(tables.contains(&"notes".to_string()));
    }

    #[test]
    fn test_seed_is_idempotent() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let seed = SeedData::demo(today);
        let mut db = Database::open_in_memory().unwrap();
        db.seed(&seed).unwrap();
        db.seed(&seed).unwrap();

        let count: i64 = db
            .conn()
            .query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_date_round_trip() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(date), "2026-01-05");
        assert_eq!(parse_date("2026-01-05").unwrap(), date);
        assert!(parse_date("05/01/2026").is_err());
    }
}
