//! Prescription and prescription-medication database operations.

use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::medications::{medication_from_row, MEDICATION_COLUMNS};
use super::{Database, DbError, DbResult};
use crate::models::{Prescription, PrescriptionMedication};

fn prescription_from_row(row: &Row<'_>) -> rusqlite::Result<Prescription> {
    Ok(Prescription {
        id: row.get(0)?,
        appointment_id: row.get(1)?,
        issued_date: row.get(2)?,
        instructions: row.get(3)?,
        medications: Vec::new(),
    })
}

/// Join row with its medication (6 columns).
fn select_entries(filter: &str) -> String {
    format!(
        r#"
        SELECT pm.id, pm.prescription_id, pm.dosage, {}
        FROM prescription_medications pm
        JOIN medications m ON m.id = pm.medication_id
        {}
        ORDER BY pm.id
        "#,
        MEDICATION_COLUMNS, filter
    )
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<PrescriptionMedication> {
    Ok(PrescriptionMedication {
        id: row.get(0)?,
        prescription_id: row.get(1)?,
        dosage: row.get(2)?,
        medication: Some(medication_from_row(row, 3)?),
    })
}

impl Database {
    /// Insert a prescription row, returning the assigned id.
    ///
    /// Join rows on the value are not written; use [`Database::save_prescription`]
    /// to persist them along with the prescription.
    pub fn insert_prescription(&self, prescription: &Prescription) -> DbResult<i64> {
        let appointment_id = prescription
            .appointment_id
            .ok_or_else(|| DbError::Constraint("prescription has no appointment id".into()))?;
        self.conn.execute(
            r#"
            INSERT INTO prescriptions (appointment_id, issued_date, instructions)
            VALUES (?1, ?2, ?3)
            "#,
            params![appointment_id, prescription.issued_date, prescription.instructions],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update the issued date and instructions of a prescription.
    pub fn update_prescription(&self, prescription: &Prescription) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE prescriptions SET issued_date = ?2, instructions = ?3 WHERE id = ?1",
            params![prescription.id, prescription.issued_date, prescription.instructions],
        )?;
        Ok(rows_affected > 0)
    }

    /// Insert or update a prescription, then insert every join row that has
    /// no id yet. Assigned ids are written back into `prescription`.
    pub fn save_prescription(&self, prescription: &mut Prescription) -> DbResult<()> {
        let id = match prescription.id {
            Some(id) => {
                if !self.update_prescription(prescription)? {
                    return Err(DbError::NotFound(format!("prescription {}", id)));
                }
                id
            }
            None => {
                let id = self.insert_prescription(prescription)?;
                prescription.id = Some(id);
                id
            }
        };

        let unsaved = prescription.unsaved_medication_count();
        if unsaved == 0 {
            return Ok(());
        }
        debug!(id, unsaved, "inserting prescription entries");
        for entry in prescription.medications.iter_mut().filter(|m| m.id.is_none()) {
            entry.prescription_id = Some(id);
            entry.id = Some(self.insert_prescription_medication(entry)?);
        }
        Ok(())
    }

    /// Get a prescription by id, with its medication entries.
    pub fn get_prescription(&self, id: i64) -> DbResult<Option<Prescription>> {
        let prescription = self
            .conn
            .query_row(
                r#"
                SELECT id, appointment_id, issued_date, instructions
                FROM prescriptions
                WHERE id = ?
                "#,
                [id],
                prescription_from_row,
            )
            .optional()?;

        prescription
            .map(|prescription| self.with_entries(prescription))
            .transpose()
    }

    /// List all prescriptions.
    pub fn list_prescriptions(&self) -> DbResult<Vec<Prescription>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, appointment_id, issued_date, instructions
            FROM prescriptions
            ORDER BY id
            "#,
        )?;
        let prescriptions = stmt
            .query_map([], prescription_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        prescriptions
            .into_iter()
            .map(|prescription| self.with_entries(prescription))
            .collect()
    }

    /// List prescriptions issued during an appointment.
    pub fn list_prescriptions_by_appointment(&self, appointment_id: i64) -> DbResult<Vec<Prescription>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, appointment_id, issued_date, instructions
            FROM prescriptions
            WHERE appointment_id = ?
            ORDER BY id
            "#,
        )?;
        let prescriptions = stmt
            .query_map([appointment_id], prescription_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        prescriptions
            .into_iter()
            .map(|prescription| self.with_entries(prescription))
            .collect()
    }

    /// Delete a prescription and its medication entries.
    pub fn delete_prescription(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM prescriptions WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    // =========================================================================
    // Prescription medication entries
    // =========================================================================

    /// Insert a join row, returning the assigned id.
    pub fn insert_prescription_medication(&self, entry: &PrescriptionMedication) -> DbResult<i64> {
        let prescription_id = entry
            .prescription_id
            .ok_or_else(|| DbError::Constraint("entry has no prescription id".into()))?;
        let medication_id = entry
            .medication_id()
            .ok_or_else(|| DbError::Constraint("entry has no medication id".into()))?;

        self.conn.execute(
            r#"
            INSERT INTO prescription_medications (prescription_id, medication_id, dosage)
            VALUES (?1, ?2, ?3)
            "#,
            params![prescription_id, medication_id, entry.dosage],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a join row by id, with its medication.
    pub fn get_prescription_medication(&self, id: i64) -> DbResult<Option<PrescriptionMedication>> {
        self.conn
            .query_row(&select_entries("WHERE pm.id = ?1"), [id], entry_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// List the join rows of a prescription.
    pub fn list_prescription_medications(&self, prescription_id: i64) -> DbResult<Vec<PrescriptionMedication>> {
        let mut stmt = self
            .conn
            .prepare(&select_entries("WHERE pm.prescription_id = ?1"))?;
        let rows = stmt.query_map([prescription_id], entry_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List every join row.
    pub fn list_all_prescription_medications(&self) -> DbResult<Vec<PrescriptionMedication>> {
        let mut stmt = self.conn.prepare(&select_entries(""))?;
        let rows = stmt.query_map([], entry_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Replace the dosage of a join row.
    pub fn update_prescription_medication_dosage(&self, id: i64, dosage: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE prescription_medications SET dosage = ?2 WHERE id = ?1",
            params![id, dosage],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a join row.
    pub fn delete_prescription_medication(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM prescription_medications WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    fn with_entries(&self, mut prescription: Prescription) -> DbResult<Prescription> {
        if let Some(id) = prescription.id {
            prescription.medications = self.list_prescription_medications(id)?;
        }
        Ok(prescription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Doctor, Medication, Patient, Specialization};

    struct Fixture {
        db: Database,
        appointment_id: i64,
        ibuprofen: Medication,
    }

    fn setup() -> Fixture {
        let db = Database::open_in_memory().unwrap();

        let mut specialization = Specialization::new("Cardiology".into());
        specialization.id = Some(db.insert_specialization(&specialization).unwrap());
        let mut patient = Patient::new("John".into(), "Doe".into(), "1234567890123".into());
        patient.id = Some(db.insert_patient(&patient).unwrap());
        let mut doctor = Doctor::new("Ann".into(), "Lee".into(), specialization);
        doctor.id = Some(db.insert_doctor(&doctor).unwrap());

        let date = chrono::Local::now().naive_local() + chrono::Duration::days(1);
        let appointment_id = db
            .insert_appointment(&Appointment::new(patient, doctor, date))
            .unwrap();

        let mut ibuprofen = Medication::new("Ibuprofen".into(), None);
        ibuprofen.id = Some(db.insert_medication(&ibuprofen).unwrap());

        Fixture {
            db,
            appointment_id,
            ibuprofen,
        }
    }

    #[test]
    fn test_save_cascades_new_entries() {
        let f = setup();

        let mut prescription = Prescription::new(f.appointment_id, Some("After meals".into()));
        f.db.save_prescription(&mut prescription).unwrap();
        let id = prescription.id.unwrap();

        prescription
            .medications
            .push(PrescriptionMedication::new(id, f.ibuprofen.clone(), "2 pills daily".into()));
        assert_eq!(prescription.unsaved_medication_count(), 1);
        f.db.save_prescription(&mut prescription).unwrap();
        assert!(prescription.medications[0].id.is_some());
        assert_eq!(prescription.medications[0].prescription_id, Some(id));
        assert_eq!(prescription.unsaved_medication_count(), 0);

        // Saving again must not duplicate the entry
        f.db.save_prescription(&mut prescription).unwrap();

        let retrieved = f.db.get_prescription(id).unwrap().unwrap();
        assert_eq!(retrieved.instructions, Some("After meals".into()));
        assert_eq!(retrieved.medications.len(), 1);
        assert_eq!(retrieved.medications[0].dosage, Some("2 pills daily".into()));
        assert_eq!(
            retrieved.medications[0].medication.as_ref().unwrap().name,
            "Ibuprofen"
        );
    }

    #[test]
    fn test_save_missing_prescription() {
        let f = setup();

        let mut prescription = Prescription::new(f.appointment_id, None);
        prescription.id = Some(999);
        assert!(matches!(
            f.db.save_prescription(&mut prescription),
            Err(DbError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_dosage_and_delete_entry() {
        let f = setup();
        let pid = f
            .db
            .insert_prescription(&Prescription::new(f.appointment_id, None))
            .unwrap();
        let entry_id = f
            .db
            .insert_prescription_medication(&PrescriptionMedication::new(
                pid,
                f.ibuprofen,
                "1 pill".into(),
            ))
            .unwrap();

        assert!(f.db.update_prescription_medication_dosage(entry_id, "3 pills").unwrap());
        let entry = f.db.get_prescription_medication(entry_id).unwrap().unwrap();
        assert_eq!(entry.dosage, Some("3 pills".into()));
        assert_eq!(entry.prescription_id, Some(pid));

        assert!(f.db.delete_prescription_medication(entry_id).unwrap());
        assert!(f.db.get_prescription_medication(entry_id).unwrap().is_none());
        assert!(!f.db.update_prescription_medication_dosage(entry_id, "x").unwrap());
    }

    #[test]
    fn test_delete_prescription_cascades_entries() {
        let f = setup();
        let pid = f
            .db
            .insert_prescription(&Prescription::new(f.appointment_id, None))
            .unwrap();
        f.db.insert_prescription_medication(&PrescriptionMedication::new(
            pid,
            f.ibuprofen,
            "1 pill".into(),
        ))
        .unwrap();

        assert!(f.db.delete_prescription(pid).unwrap());
        assert!(f.db.list_prescription_medications(pid).unwrap().is_empty());
    }

    #[test]
    fn test_list_by_appointment() {
        let f = setup();
        f.db.insert_prescription(&Prescription::new(f.appointment_id, Some("a".into())))
            .unwrap();
        f.db.insert_prescription(&Prescription::new(f.appointment_id, Some("b".into())))
            .unwrap();

        assert_eq!(
            f.db.list_prescriptions_by_appointment(f.appointment_id)
                .unwrap()
                .len(),
            2
        );
        assert_eq!(f.db.list_prescriptions().unwrap().len(), 2);
        assert!(f.db.list_prescriptions_by_appointment(999).unwrap().is_empty());
    }
}
