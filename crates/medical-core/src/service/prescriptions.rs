//! Prescription service.

use tracing::{debug, info};

use super::{require_text, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::{Prescription, PrescriptionMedication};

pub struct PrescriptionService<'a> {
    db: &'a Database,
}

impl<'a> PrescriptionService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Issue a prescription for an existing appointment. The issued date is
    /// always the current time.
    pub fn create(
        &self,
        appointment_id: i64,
        instructions: Option<String>,
    ) -> ServiceResult<Prescription> {
        let saved = self.db.in_transaction(|db| {
            db.get_appointment(appointment_id)?
                .ok_or(ServiceError::AppointmentNotFound(appointment_id))?;

            let mut prescription = Prescription::new(appointment_id, instructions);
            db.save_prescription(&mut prescription)?;
            Ok::<_, ServiceError>(prescription)
        })?;
        info!(id = ?saved.id, appointment_id, "created prescription");
        Ok(saved)
    }

    /// A prescription with its medication entries.
    pub fn get_by_id(&self, id: i64) -> ServiceResult<Prescription> {
        debug!(id, "loading prescription");
        self.db
            .get_prescription(id)?
            .ok_or(ServiceError::PrescriptionNotFound(id))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Prescription>> {
        Ok(self.db.list_prescriptions()?)
    }

    /// Prescriptions of an existing appointment, possibly none.
    pub fn get_by_appointment(&self, appointment_id: i64) -> ServiceResult<Vec<Prescription>> {
        self.db
            .get_appointment(appointment_id)?
            .ok_or(ServiceError::AppointmentNotFound(appointment_id))?;
        Ok(self.db.list_prescriptions_by_appointment(appointment_id)?)
    }

    /// Replace the instructions, and the issued date when one is given.
    /// The owning appointment and the entries are left untouched.
    pub fn update(&self, id: i64, prescription: &Prescription) -> ServiceResult<Prescription> {
        let updated = self.db.in_transaction(|db| {
            let mut existing = db
                .get_prescription(id)?
                .ok_or(ServiceError::PrescriptionNotFound(id))?;
            if prescription.issued_date.is_some() {
                existing.issued_date = prescription.issued_date;
            }
            existing.instructions = prescription.instructions.clone();
            db.save_prescription(&mut existing)?;
            Ok::<_, ServiceError>(existing)
        })?;
        info!(id, "updated prescription");
        Ok(updated)
    }

    /// Delete a prescription and its medication entries.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db.in_transaction(|db| {
            db.get_prescription(id)?
                .ok_or(ServiceError::PrescriptionNotFound(id))?;
            db.delete_prescription(id)?;
            Ok::<_, ServiceError>(())
        })?;
        info!(id, "deleted prescription");
        Ok(())
    }

    /// Attach a medication with a dosage to a prescription and return the
    /// updated prescription.
    pub fn add_medication(
        &self,
        prescription_id: i64,
        medication_id: i64,
        dosage: &str,
    ) -> ServiceResult<Prescription> {
        require_text(dosage, "Dosage is required")?;

        let updated = self.db.in_transaction(|db| {
            let mut prescription = db
                .get_prescription(prescription_id)?
                .ok_or(ServiceError::PrescriptionNotFound(prescription_id))?;
            let medication = db
                .get_medication(medication_id)?
                .ok_or(ServiceError::MedicationNotFound(medication_id))?;

            prescription.medications.push(PrescriptionMedication::new(
                prescription_id,
                medication,
                dosage.to_string(),
            ));
            db.save_prescription(&mut prescription)?;
            Ok::<_, ServiceError>(prescription)
        })?;
        info!(prescription_id, medication_id, dosage, "added medication to prescription");
        Ok(updated)
    }
}
