//! Prescription medication (join row) service.

use tracing::{debug, info};

use super::{require_text, ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::PrescriptionMedication;

pub struct PrescriptionMedicationService<'a> {
    db: &'a Database,
}

impl<'a> PrescriptionMedicationService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Persist a join row. Both the prescription and the medication must
    /// already exist.
    pub fn create(&self, entry: &PrescriptionMedication) -> ServiceResult<PrescriptionMedication> {
        let prescription_id = entry.prescription_id.ok_or_else(|| {
            ServiceError::InvalidArgument("Prescription is required".into())
        })?;
        let medication_id = entry
            .medication_id()
            .ok_or_else(|| ServiceError::InvalidArgument("Medication is required".into()))?;
        require_text(entry.dosage.as_deref().unwrap_or_default(), "Dosage is required")?;

        let saved = self.db.in_transaction(|db| {
            db.get_prescription(prescription_id)?
                .ok_or(ServiceError::PrescriptionNotFound(prescription_id))?;
            let medication = db
                .get_medication(medication_id)?
                .ok_or(ServiceError::MedicationNotFound(medication_id))?;

            let mut saved = PrescriptionMedication {
                id: None,
                prescription_id: Some(prescription_id),
                medication: Some(medication),
                dosage: entry.dosage.clone(),
            };
            saved.id = Some(db.insert_prescription_medication(&saved)?);
            Ok::<_, ServiceError>(saved)
        })?;
        info!(id = ?saved.id, prescription_id, medication_id, "created prescription medication");
        Ok(saved)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<PrescriptionMedication> {
        debug!(id, "loading prescription medication");
        self.db
            .get_prescription_medication(id)?
            .ok_or(ServiceError::PrescriptionMedicationNotFound(id))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<PrescriptionMedication>> {
        Ok(self.db.list_all_prescription_medications()?)
    }

    /// Only the dosage of an entry is mutable.
    pub fn update(
        &self,
        id: i64,
        entry: &PrescriptionMedication,
    ) -> ServiceResult<PrescriptionMedication> {
        let dosage = entry
            .dosage
            .as_deref()
            .ok_or_else(|| ServiceError::InvalidArgument("Dosage is required".into()))?;
        self.update_dosage(id, dosage)
    }

    /// Replace the dosage of an entry.
    pub fn update_dosage(&self, id: i64, dosage: &str) -> ServiceResult<PrescriptionMedication> {
        require_text(dosage, "Dosage is required")?;

        let updated = self.db.in_transaction(|db| {
            let mut existing = db
                .get_prescription_medication(id)?
                .ok_or(ServiceError::PrescriptionMedicationNotFound(id))?;
            db.update_prescription_medication_dosage(id, dosage)?;
            existing.dosage = Some(dosage.to_string());
            Ok::<_, ServiceError>(existing)
        })?;
        info!(id, dosage, "updated dosage");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db.in_transaction(|db| {
            db.get_prescription_medication(id)?
                .ok_or(ServiceError::PrescriptionMedicationNotFound(id))?;
            db.delete_prescription_medication(id)?;
            Ok::<_, ServiceError>(())
        })?;
        info!(id, "deleted prescription medication");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Doctor, Medication, Patient, Prescription, Specialization};

    struct Fixture {
        db: Database,
        prescription_id: i64,
        medication_id: i64,
    }

    fn setup() -> Fixture {
        let db = Database::open_in_memory().unwrap();
        let mut cardiology = Specialization::new("Cardiology".into());
        cardiology.id = Some(db.insert_specialization(&cardiology).unwrap());
        let mut patient = Patient::new("John".into(), "Doe".into(), "1234567890123".into());
        patient.id = Some(db.insert_patient(&patient).unwrap());
        let mut doctor = Doctor::new("Ann".into(), "Lee".into(), cardiology);
        doctor.id = Some(db.insert_doctor(&doctor).unwrap());

        let date = chrono::Local::now().naive_local() + chrono::Duration::days(1);
        let appointment_id = db
            .insert_appointment(&Appointment::new(patient, doctor, date))
            .unwrap();
        let prescription_id = db
            .insert_prescription(&Prescription::new(appointment_id, None))
            .unwrap();
        let medication_id = db
            .insert_medication(&Medication::new("Ibuprofen".into(), None))
            .unwrap();

        Fixture {
            db,
            prescription_id,
            medication_id,
        }
    }

    fn entry(prescription_id: i64, medication_id: i64) -> PrescriptionMedication {
        PrescriptionMedication::new(
            prescription_id,
            Medication::reference(medication_id),
            "1 pill".into(),
        )
    }

    #[test]
    fn test_create_loads_medication() {
        let f = setup();
        let service = PrescriptionMedicationService::new(&f.db);

        let created = service.create(&entry(f.prescription_id, f.medication_id)).unwrap();
        assert_eq!(created.medication.as_ref().unwrap().name, "Ibuprofen");
        assert_eq!(service.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_create_requires_existing_parents() {
        let f = setup();
        let service = PrescriptionMedicationService::new(&f.db);

        assert!(matches!(
            service.create(&entry(999, f.medication_id)),
            Err(ServiceError::PrescriptionNotFound(999))
        ));
        assert!(matches!(
            service.create(&entry(f.prescription_id, 999)),
            Err(ServiceError::MedicationNotFound(999))
        ));
        assert!(service.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_update_dosage() {
        let f = setup();
        let service = PrescriptionMedicationService::new(&f.db);
        let id = service
            .create(&entry(f.prescription_id, f.medication_id))
            .unwrap()
            .id
            .unwrap();

        let updated = service.update_dosage(id, "3 pills daily").unwrap();
        assert_eq!(updated.dosage, Some("3 pills daily".into()));
        assert_eq!(updated.prescription_id, Some(f.prescription_id));
        assert_eq!(
            service.get_by_id(id).unwrap().dosage,
            Some("3 pills daily".into())
        );

        assert!(matches!(
            service.update_dosage(999, "1 pill"),
            Err(ServiceError::PrescriptionMedicationNotFound(999))
        ));
    }

    #[test]
    fn test_delete_twice() {
        let f = setup();
        let service = PrescriptionMedicationService::new(&f.db);
        let id = service
            .create(&entry(f.prescription_id, f.medication_id))
            .unwrap()
            .id
            .unwrap();

        service.delete(id).unwrap();
        assert!(matches!(
            service.delete(id),
            Err(ServiceError::PrescriptionMedicationNotFound(_))
        ));
    }
}
