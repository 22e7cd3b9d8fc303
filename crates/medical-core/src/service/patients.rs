//! Patient service.

use tracing::{debug, info};

use super::{conflict_message, require_text, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::Patient;

pub struct PatientService<'a> {
    db: &'a Database,
}

impl<'a> PatientService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist a new patient. A duplicate CNP is a conflict.
    pub fn create(&self, patient: &Patient) -> ServiceResult<Patient> {
        validate(patient)?;

        let saved = self.db.in_transaction(|db| {
            let mut saved = patient.clone();
            saved.id = Some(db.insert_patient(&saved)?);
            Ok::<_, ServiceError>(saved)
        })
        .map_err(conflict_message("Patient with this CNP already exists"))?;
        info!(id = ?saved.id, name = %saved.full_name(), "created patient");
        Ok(saved)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Patient> {
        debug!(id, "loading patient");
        self.db
            .get_patient(id)?
            .ok_or(ServiceError::PatientNotFound(id))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Patient>> {
        Ok(self.db.list_patients()?)
    }

    /// Replace the scalar fields of an existing patient.
    pub fn update(&self, id: i64, patient: &Patient) -> ServiceResult<Patient> {
        validate(patient)?;

        let updated = self.db.in_transaction(|db| {
            let mut existing = db
                .get_patient(id)?
                .ok_or(ServiceError::PatientNotFound(id))?;
            existing.first_name = patient.first_name.clone();
            existing.last_name = patient.last_name.clone();
            existing.cnp = patient.cnp.clone();
            existing.email = patient.email.clone();
            existing.phone = patient.phone.clone();
            db.update_patient(&existing)?;
            Ok::<_, ServiceError>(existing)
        })
        .map_err(conflict_message("Patient with this CNP already exists"))?;
        info!(id, "updated patient");
        Ok(updated)
    }

    /// Delete a patient and, through the cascade, their appointments.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db.in_transaction(|db| {
            db.get_patient(id)?
                .ok_or(ServiceError::PatientNotFound(id))?;
            db.delete_patient(id)?;
            Ok::<_, ServiceError>(())
        })?;
        info!(id, "deleted patient");
        Ok(())
    }
}

fn validate(patient: &Patient) -> ServiceResult<()> {
    require_text(&patient.first_name, "Patient first name is required")?;
    require_text(&patient.last_name, "Patient last name is required")?;
    require_text(&patient.cnp, "Patient CNP is required")
}
