//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::Patient;

pub(crate) const PATIENT_COLUMNS: &str = "p.id, p.first_name, p.last_name, p.cnp, p.email, p.phone";

/// Map six patient columns starting at `offset`.
pub(crate) fn patient_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Patient> {
    Ok(Patient {
        id: row.get(offset)?,
        first_name: row.get(offset + 1)?,
        last_name: row.get(offset + 2)?,
        cnp: row.get(offset + 3)?,
        email: row.get(offset + 4)?,
        phone: row.get(offset + 5)?,
    })
}

impl Database {
    /// Insert a new patient, returning the assigned id.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO patients (first_name, last_name, cnp, email, phone)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                patient.first_name,
                patient.last_name,
                patient.cnp,
                patient.email,
                patient.phone,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                cnp = ?4,
                email = ?5,
                phone = ?6
            WHERE id = ?1
            "#,
            params![
                patient.id,
                patient.first_name,
                patient.last_name,
                patient.cnp,
                patient.email,
                patient.phone,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a patient by id.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<Patient>> {
        let sql = format!("SELECT {} FROM patients p WHERE p.id = ?", PATIENT_COLUMNS);
        self.conn
            .query_row(&sql, [id], |row| patient_from_row(row, 0))
            .optional()
            .map_err(Into::into)
    }

    /// Get a patient by national id code.
    pub fn get_patient_by_cnp(&self, cnp: &str) -> DbResult<Option<Patient>> {
        let sql = format!("SELECT {} FROM patients p WHERE p.cnp = ?", PATIENT_COLUMNS);
        self.conn
            .query_row(&sql, [cnp], |row| patient_from_row(row, 0))
            .optional()
            .map_err(Into::into)
    }

    /// List all patients.
    pub fn list_patients(&self) -> DbResult<Vec<Patient>> {
        let sql = format!("SELECT {} FROM patients p ORDER BY p.id", PATIENT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| patient_from_row(row, 0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a patient. Their appointments go with them.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}
