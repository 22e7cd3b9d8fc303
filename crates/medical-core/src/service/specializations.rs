//! Specialization service.

use tracing::{debug, info};

use super::{conflict_message, require_text, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::{Doctor, Specialization};

pub struct SpecializationService<'a> {
    db: &'a Database,
}

impl<'a> SpecializationService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist a new specialization. Names are unique.
    pub fn create(&self, specialization: &Specialization) -> ServiceResult<Specialization> {
        require_text(&specialization.name, "Specialization name is required")?;

        let saved = self.db.in_transaction(|db| {
            let mut saved = specialization.clone();
            saved.id = Some(db.insert_specialization(&saved)?);
            Ok::<_, ServiceError>(saved)
        })
        .map_err(conflict_message("Specialization name already exists"))?;
        info!(id = ?saved.id, name = %saved.name, "created specialization");
        Ok(saved)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Specialization> {
        debug!(id, "loading specialization");
        self.db
            .get_specialization(id)?
            .ok_or(ServiceError::SpecializationNotFound(id))
    }

    /// Exact name lookup.
    pub fn get_by_name(&self, name: &str) -> ServiceResult<Specialization> {
        debug!(name, "loading specialization by name");
        self.db
            .get_specialization_by_name(name)?
            .ok_or_else(|| ServiceError::SpecializationNameNotFound(name.to_string()))
    }

    /// A specialization together with the doctors holding it.
    pub fn get_with_doctors(&self, id: i64) -> ServiceResult<(Specialization, Vec<Doctor>)> {
        let specialization = self.get_by_id(id)?;
        let doctors = self.db.list_doctors_by_specialization(id)?;
        Ok((specialization, doctors))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Specialization>> {
        Ok(self.db.list_specializations()?)
    }

    /// Rename an existing specialization.
    pub fn update(&self, id: i64, specialization: &Specialization) -> ServiceResult<Specialization> {
        require_text(&specialization.name, "Specialization name is required")?;

        let updated = self.db.in_transaction(|db| {
            let mut existing = db
                .get_specialization(id)?
                .ok_or(ServiceError::SpecializationNotFound(id))?;
            existing.name = specialization.name.clone();
            db.update_specialization(&existing)?;
            Ok::<_, ServiceError>(existing)
        })
        .map_err(conflict_message("Specialization name already exists"))?;
        info!(id, name = %updated.name, "updated specialization");
        Ok(updated)
    }

    /// Delete a specialization and, through the cascade, its doctors.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db.in_transaction(|db| {
            db.get_specialization(id)?
                .ok_or(ServiceError::SpecializationNotFound(id))?;
            db.delete_specialization(id)?;
            Ok::<_, ServiceError>(())
        })?;
        info!(id, "deleted specialization");
        Ok(())
    }
}
