//! Doctor database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Doctor, Specialization};

/// Doctor columns joined with their specialization (7 columns).
pub(crate) const DOCTOR_COLUMNS: &str =
    "d.id, d.first_name, d.last_name, d.email, d.phone, s.id, s.name";

pub(crate) const DOCTOR_JOIN: &str = "doctors d JOIN specializations s ON s.id = d.specialization_id";

/// Map seven doctor/specialization columns starting at `offset`.
pub(crate) fn doctor_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get(offset)?,
        first_name: row.get(offset + 1)?,
        last_name: row.get(offset + 2)?,
        email: row.get(offset + 3)?,
        phone: row.get(offset + 4)?,
        specialization: Some(Specialization {
            id: row.get(offset + 5)?,
            name: row.get(offset + 6)?,
        }),
    })
}

fn specialization_id(doctor: &Doctor) -> DbResult<i64> {
    doctor
        .specialization
        .as_ref()
        .and_then(|s| s.id)
        .ok_or_else(|| DbError::Constraint("doctor has no persisted specialization".into()))
}

impl Database {
    /// Insert a new doctor, returning the assigned id.
    ///
    /// The doctor's specialization must already carry a database id.
    pub fn insert_doctor(&self, doctor: &Doctor) -> DbResult<i64> {
        let specialization_id = specialization_id(doctor)?;
        self.conn.execute(
            r#"
            INSERT INTO doctors (first_name, last_name, email, phone, specialization_id)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                doctor.first_name,
                doctor.last_name,
                doctor.email,
                doctor.phone,
                specialization_id,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing doctor, including the specialization link.
    pub fn update_doctor(&self, doctor: &Doctor) -> DbResult<bool> {
        let specialization_id = specialization_id(doctor)?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE doctors SET
                first_name = ?2,
                last_name = ?3,
                email = ?4,
                phone = ?5,
                specialization_id = ?6
            WHERE id = ?1
            "#,
            params![
                doctor.id,
                doctor.first_name,
                doctor.last_name,
                doctor.email,
                doctor.phone,
                specialization_id,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a doctor by id, with specialization.
    pub fn get_doctor(&self, id: i64) -> DbResult<Option<Doctor>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE d.id = ?",
            DOCTOR_COLUMNS, DOCTOR_JOIN
        );
        self.conn
            .query_row(&sql, [id], |row| doctor_from_row(row, 0))
            .optional()
            .map_err(Into::into)
    }

    /// List all doctors.
    pub fn list_doctors(&self) -> DbResult<Vec<Doctor>> {
        let sql = format!("SELECT {} FROM {} ORDER BY d.id", DOCTOR_COLUMNS, DOCTOR_JOIN);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| doctor_from_row(row, 0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List doctors holding a specialization.
    pub fn list_doctors_by_specialization(&self, specialization_id: i64) -> DbResult<Vec<Doctor>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE d.specialization_id = ? ORDER BY d.id",
            DOCTOR_COLUMNS, DOCTOR_JOIN
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([specialization_id], |row| doctor_from_row(row, 0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete a doctor. Their appointments go with them.
    pub fn delete_doctor(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM doctors WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> (Database, Specialization) {
        let db = Database::open_in_memory().unwrap();
        let mut cardiology = Specialization::new("Cardiology".into());
        cardiology.id = Some(db.insert_specialization(&cardiology).unwrap());
        (db, cardiology)
    }

    #[test]
    fn test_insert_and_get_with_specialization() {
        let (db, cardiology) = setup_db();

        let mut doctor = Doctor::new("Ann".into(), "Lee".into(), cardiology);
        doctor.email = Some("ann.lee@clinic.example".into());
        let id = db.insert_doctor(&doctor).unwrap();

        let retrieved = db.get_doctor(id).unwrap().unwrap();
        assert_eq!(retrieved.first_name, "Ann");
        assert_eq!(retrieved.specialization_name(), Some("Cardiology"));
        assert_eq!(retrieved.email, Some("ann.lee@clinic.example".into()));
    }

    #[test]
    fn test_insert_requires_persisted_specialization() {
        let (db, _) = setup_db();

        let doctor = Doctor::new(
            "Ann".into(),
            "Lee".into(),
            Specialization::new("Cardiology".into()),
        );
        let err = db.insert_doctor(&doctor).unwrap_err();
        assert!(matches!(err, DbError::Constraint(_)));
    }

    #[test]
    fn test_list_by_specialization() {
        let (db, cardiology) = setup_db();
        let mut neurology = Specialization::new("Neurology".into());
        neurology.id = Some(db.insert_specialization(&neurology).unwrap());

        db.insert_doctor(&Doctor::new("Ann".into(), "Lee".into(), cardiology.clone()))
            .unwrap();
        db.insert_doctor(&Doctor::new("Bob".into(), "Ray".into(), cardiology.clone()))
            .unwrap();
        db.insert_doctor(&Doctor::new("Cid".into(), "Moe".into(), neurology))
            .unwrap();

        let cardiologists = db
            .list_doctors_by_specialization(cardiology.id.unwrap())
            .unwrap();
        assert_eq!(cardiologists.len(), 2);
        assert_eq!(db.list_doctors().unwrap().len(), 3);
        assert!(db.list_doctors_by_specialization(999).unwrap().is_empty());
    }

    #[test]
    fn test_update_moves_specialization() {
        let (db, cardiology) = setup_db();
        let mut neurology = Specialization::new("Neurology".into());
        neurology.id = Some(db.insert_specialization(&neurology).unwrap());

        let mut doctor = Doctor::new("Ann".into(), "Lee".into(), cardiology);
        doctor.id = Some(db.insert_doctor(&doctor).unwrap());

        doctor.specialization = Some(neurology);
        assert!(db.update_doctor(&doctor).unwrap());

        let retrieved = db.get_doctor(doctor.id.unwrap()).unwrap().unwrap();
        assert_eq!(retrieved.specialization_name(), Some("Neurology"));
    }
}
