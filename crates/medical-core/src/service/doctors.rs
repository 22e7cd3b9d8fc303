//! Doctor service.

use tracing::{debug, info};

use super::{require_text, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::{Doctor, Specialization};

pub struct DoctorService<'a> {
    db: &'a Database,
}

impl<'a> DoctorService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist a new doctor. The specialization is looked up by name and
    /// must already exist.
    pub fn create(&self, doctor: &Doctor) -> ServiceResult<Doctor> {
        validate(doctor)?;

        let saved = self.db.in_transaction(|db| {
            let mut saved = doctor.clone();
            saved.specialization = Some(resolve_specialization(db, doctor)?);
            saved.id = Some(db.insert_doctor(&saved)?);
            Ok::<_, ServiceError>(saved)
        })?;
        info!(
            id = ?saved.id,
            specialization = ?saved.specialization_name(),
            "created doctor"
        );
        Ok(saved)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Doctor> {
        debug!(id, "loading doctor");
        self.db
            .get_doctor(id)?
            .ok_or(ServiceError::DoctorNotFound(id))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Doctor>> {
        Ok(self.db.list_doctors()?)
    }

    /// Doctors holding a specialization. The specialization must exist; an
    /// empty list is a valid result.
    pub fn get_by_specialization(&self, specialization_id: i64) -> ServiceResult<Vec<Doctor>> {
        debug!(specialization_id, "listing doctors by specialization");
        self.db
            .get_specialization(specialization_id)?
            .ok_or(ServiceError::SpecializationNotFound(specialization_id))?;
        Ok(self.db.list_doctors_by_specialization(specialization_id)?)
    }

    /// Replace the scalar fields of an existing doctor and re-resolve the
    /// specialization by name.
    pub fn update(&self, id: i64, doctor: &Doctor) -> ServiceResult<Doctor> {
        validate(doctor)?;

        let updated = self.db.in_transaction(|db| {
            let mut existing = db
                .get_doctor(id)?
                .ok_or(ServiceError::DoctorNotFound(id))?;
            existing.first_name = doctor.first_name.clone();
            existing.last_name = doctor.last_name.clone();
            existing.email = doctor.email.clone();
            existing.phone = doctor.phone.clone();
            existing.specialization = Some(resolve_specialization(db, doctor)?);
            db.update_doctor(&existing)?;
            Ok::<_, ServiceError>(existing)
        })?;
        info!(id, "updated doctor");
        Ok(updated)
    }

    /// Delete a doctor and, through the cascade, their appointments.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db.in_transaction(|db| {
            db.get_doctor(id)?
                .ok_or(ServiceError::DoctorNotFound(id))?;
            db.delete_doctor(id)?;
            Ok::<_, ServiceError>(())
        })?;
        info!(id, "deleted doctor");
        Ok(())
    }
}

fn validate(doctor: &Doctor) -> ServiceResult<()> {
    require_text(&doctor.first_name, "Doctor first name is required")?;
    require_text(&doctor.last_name, "Doctor last name is required")
}

/// Look up the persisted specialization named on `doctor`.
fn resolve_specialization(db: &Database, doctor: &Doctor) -> ServiceResult<Specialization> {
    let name = doctor
        .specialization_name()
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ServiceError::InvalidArgument("Doctor specialization is required".into()))?;

    db.get_specialization_by_name(name)?
        .ok_or_else(|| ServiceError::SpecializationNameNotFound(name.to_string()))
}
