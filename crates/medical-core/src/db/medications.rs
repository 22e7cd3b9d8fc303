//! Medication database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::Medication;

pub(crate) const MEDICATION_COLUMNS: &str = "m.id, m.name, m.description";

/// Map three medication columns starting at `offset`.
pub(crate) fn medication_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Medication> {
    Ok(Medication {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
        description: row.get(offset + 2)?,
    })
}

impl Database {
    /// Insert a new medication, returning the assigned id.
    pub fn insert_medication(&self, medication: &Medication) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO medications (name, description) VALUES (?1, ?2)",
            params![medication.name, medication.description],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update name and description of an existing medication.
    pub fn update_medication(&self, medication: &Medication) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE medications SET name = ?2, description = ?3 WHERE id = ?1",
            params![medication.id, medication.name, medication.description],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a medication by id.
    pub fn get_medication(&self, id: i64) -> DbResult<Option<Medication>> {
        let sql = format!("SELECT {} FROM medications m WHERE m.id = ?", MEDICATION_COLUMNS);
        self.conn
            .query_row(&sql, [id], |row| medication_from_row(row, 0))
            .optional()
            .map_err(Into::into)
    }

    /// Get a medication by its unique name.
    pub fn get_medication_by_name(&self, name: &str) -> DbResult<Option<Medication>> {
        let sql = format!("SELECT {} FROM medications m WHERE m.name = ?", MEDICATION_COLUMNS);
        self.conn
            .query_row(&sql, [name], |row| medication_from_row(row, 0))
            .optional()
            .map_err(Into::into)
    }

    /// List all medications.
    pub fn list_medications(&self) -> DbResult<Vec<Medication>> {
        let sql = format!("SELECT {} FROM medications m ORDER BY m.name", MEDICATION_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| medication_from_row(row, 0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a medication. Prescription entries using it are removed.
    pub fn delete_medication(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medications WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
