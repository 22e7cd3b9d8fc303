//! Specialization database operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::Specialization;

impl Database {
    /// Insert a new specialization, returning the assigned id.
    pub fn insert_specialization(&self, specialization: &Specialization) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO specializations (name) VALUES (?1)",
            [&specialization.name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Rename an existing specialization.
    pub fn update_specialization(&self, specialization: &Specialization) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE specializations SET name = ?2 WHERE id = ?1",
            params![specialization.id, specialization.name],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a specialization by id.
    pub fn get_specialization(&self, id: i64) -> DbResult<Option<Specialization>> {
        self.conn
            .query_row(
                "SELECT id, name FROM specializations WHERE id = ?",
                [id],
                |row| {
                    Ok(Specialization {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a specialization by its unique name (exact match).
    pub fn get_specialization_by_name(&self, name: &str) -> DbResult<Option<Specialization>> {
        self.conn
            .query_row(
                "SELECT id, name FROM specializations WHERE name = ?",
                [name],
                |row| {
                    Ok(Specialization {
                        id: row.get(0)?,
                        name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all specializations.
    pub fn list_specializations(&self) -> DbResult<Vec<Specialization>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM specializations ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(Specialization {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a specialization. Doctors holding it are deleted too.
    pub fn delete_specialization(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM specializations WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
