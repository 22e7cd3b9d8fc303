//! Database layer for medical records.

mod schema;
mod patients;
mod specializations;
mod doctors;
mod appointments;
mod prescriptions;
mod medications;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DbError {
    /// True when SQLite rejected the write because of a UNIQUE, NOT NULL,
    /// CHECK or FOREIGN KEY constraint.
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DbError::Constraint(_) => true,
            DbError::Sqlite(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::ConstraintViolation
            }
            _ => false,
        }
    }
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

    /// Run `f` inside a transaction. Commits when `f` returns `Ok`, rolls
    /// back otherwise.
    ///
    /// Repository methods keep working on `self` inside the closure because
    /// the transaction is opened on the same connection.
    pub fn in_transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Self) -> Result<T, E>,
        E: From<DbError>,
    {
        let tx = self
            .conn
            .unchecked_transaction()
            .map_err(DbError::from)?;
        let value = f(self)?;
        tx.commit().map_err(DbError::from)?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Patient, Specialization};

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

        for table in [
            "patients",
            "specializations",
            "doctors",
            "appointments",
            "prescriptions",
            "medications",
            "prescription_medications",
        ] {
            assert!(tables.contains(&table.to_string()), "missing table {}", table);
        }
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medical.db");

        let id = {
            let db = Database::open(&path).unwrap();
            db.insert_specialization(&Specialization::new("Cardiology".into()))
                .unwrap()
        };

        let db = Database::open(&path).unwrap();
        let found = db.get_specialization(id).unwrap().unwrap();
        assert_eq!(found.name, "Cardiology");
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();

        let result: DbResult<()> = db.in_transaction(|db| {
            db.insert_patient(&Patient::new(
                "John".into(),
                "Doe".into(),
                "1234567890123".into(),
            ))?;
            Err(DbError::Constraint("forced".into()))
        });

        assert!(result.is_err());
        assert!(db.list_patients().unwrap().is_empty());
    }

    #[test]
    fn test_unique_violation_is_constraint() {
        let db = Database::open_in_memory().unwrap();
        db.insert_specialization(&Specialization::new("Cardiology".into()))
            .unwrap();

        let err = db
            .insert_specialization(&Specialization::new("Cardiology".into()))
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }
}
