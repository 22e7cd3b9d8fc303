//! Medication service.

use tracing::{debug, info};

use super::{conflict_message, require_text, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::Medication;

pub struct MedicationService<'a> {
    db: &'a Database,
}

impl<'a> MedicationService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist a new medication. Names are unique.
    pub fn create(&self, medication: &Medication) -> ServiceResult<Medication> {
        require_text(&medication.name, "Medication name is required")?;

        let saved = self.db.in_transaction(|db| {
            let mut saved = medication.clone();
            saved.id = Some(db.insert_medication(&saved)?);
            Ok::<_, ServiceError>(saved)
        })
        .map_err(conflict_message("Medication name already exists"))?;
        info!(id = ?saved.id, name = %saved.name, "created medication");
        Ok(saved)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Medication> {
        debug!(id, "loading medication");
        self.db
            .get_medication(id)?
            .ok_or(ServiceError::MedicationNotFound(id))
    }

    /// All medications, sorted by name.
    pub fn get_all(&self) -> ServiceResult<Vec<Medication>> {
        Ok(self.db.list_medications()?)
    }

    pub fn update(&self, id: i64, medication: &Medication) -> ServiceResult<Medication> {
        require_text(&medication.name, "Medication name is required")?;

        let updated = self.db.in_transaction(|db| {
            let mut existing = db
                .get_medication(id)?
                .ok_or(ServiceError::MedicationNotFound(id))?;
            existing.name = medication.name.clone();
            existing.description = medication.description.clone();
            db.update_medication(&existing)?;
            Ok::<_, ServiceError>(existing)
        })
        .map_err(conflict_message("Medication name already exists"))?;
        info!(id, "updated medication");
        Ok(updated)
    }

    /// Delete a medication and every prescription entry using it.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db.in_transaction(|db| {
            db.get_medication(id)?
                .ok_or(ServiceError::MedicationNotFound(id))?;
            db.delete_medication(id)?;
            Ok::<_, ServiceError>(())
        })?;
        info!(id, "deleted medication");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ibuprofen() -> Medication {
        Medication::new("Ibuprofen".into(), Some("NSAID".into()))
    }

    #[test]
    fn test_create_get_update() {
        let db = Database::open_in_memory().unwrap();
        let service = MedicationService::new(&db);

        let id = service.create(&ibuprofen()).unwrap().id.unwrap();
        assert_eq!(service.get_by_id(id).unwrap().name, "Ibuprofen");

        let changes = Medication::new("Ibuprofen 400".into(), Some("Pain relief".into()));
        service.update(id, &changes).unwrap();

        let found = service.get_by_id(id).unwrap();
        assert_eq!(found.name, "Ibuprofen 400");
        assert_eq!(found.description, Some("Pain relief".into()));
    }

    #[test]
    fn test_missing_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let service = MedicationService::new(&db);

        assert!(matches!(service.get_by_id(5), Err(ServiceError::MedicationNotFound(5))));
        assert!(matches!(
            service.update(5, &ibuprofen()),
            Err(ServiceError::MedicationNotFound(5))
        ));
    }

    #[test]
    fn test_duplicate_name_conflicts() {
        let db = Database::open_in_memory().unwrap();
        let service = MedicationService::new(&db);
        service.create(&ibuprofen()).unwrap();

        let err = service.create(&ibuprofen()).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.to_string(), "Medication name already exists");
    }

    #[test]
    fn test_delete_twice() {
        let db = Database::open_in_memory().unwrap();
        let service = MedicationService::new(&db);
        let id = service.create(&ibuprofen()).unwrap().id.unwrap();

        service.delete(id).unwrap();
        assert!(matches!(service.delete(id), Err(ServiceError::MedicationNotFound(_))));
    }
}
