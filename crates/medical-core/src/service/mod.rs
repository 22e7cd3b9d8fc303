//! Service layer: existence checks, referential validation and
//! orchestration on top of the repository.
//!
//! Every service borrows the [`Database`] for the duration of one request.
//! Mutating operations run inside a single transaction.

mod appointments;
mod doctors;
mod medications;
mod patients;
mod prescription_medications;
mod prescriptions;
mod specializations;

pub use appointments::AppointmentService;
pub use doctors::DoctorService;
pub use medications::MedicationService;
pub use patients::PatientService;
pub use prescription_medications::PrescriptionMedicationService;
pub use prescriptions::PrescriptionService;
pub use specializations::SpecializationService;

use crate::db::DbError;
use thiserror::Error;
use tracing::debug;

/// Service errors.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Could not find patient with id {0}")]
    PatientNotFound(i64),

    #[error("Could not find doctor with id {0}")]
    DoctorNotFound(i64),

    #[error("Could not find specialization with id {0}")]
    SpecializationNotFound(i64),

    #[error("Could not find specialization with name {0}")]
    SpecializationNameNotFound(String),

    #[error("Could not find appointment with id {0}")]
    AppointmentNotFound(i64),

    #[error("Could not find prescription with id {0}")]
    PrescriptionNotFound(i64),

    #[error("Could not find medication with id {0}")]
    MedicationNotFound(i64),

    #[error("Could not find prescription medication with id {0}")]
    PrescriptionMedicationNotFound(i64),

    #[error("No appointments found for patient with id {0}")]
    NoAppointmentsForPatient(i64),

    #[error("No appointments found for doctor with id {0}")]
    NoAppointmentsForDoctor(i64),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(DbError),
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        if err.is_constraint_violation() {
            debug!(error = %err, "constraint violation");
            ServiceError::Conflict("Record conflicts with existing data".to_string())
        } else {
            ServiceError::Database(err)
        }
    }
}

impl ServiceError {
    /// True for every "could not find" condition, including empty derived
    /// appointment queries.
    pub fn is_not_found(&self) -> bool {
        self.not_found_label().is_some()
    }

    /// Short label naming the missing thing, e.g. "Patient Not Found".
    pub fn not_found_label(&self) -> Option<&'static str> {
        match self {
            ServiceError::PatientNotFound(_) => Some("Patient Not Found"),
            ServiceError::DoctorNotFound(_) => Some("Doctor Not Found"),
            ServiceError::SpecializationNotFound(_)
            | ServiceError::SpecializationNameNotFound(_) => Some("Specialization Not Found"),
            ServiceError::AppointmentNotFound(_) => Some("Appointment Not Found"),
            ServiceError::PrescriptionNotFound(_) => Some("Prescription Not Found"),
            ServiceError::MedicationNotFound(_) => Some("Medication Not Found"),
            ServiceError::PrescriptionMedicationNotFound(_) => {
                Some("Prescription Medication Not Found")
            }
            ServiceError::NoAppointmentsForPatient(_)
            | ServiceError::NoAppointmentsForDoctor(_) => Some("No Appointments Found"),
            _ => None,
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Replace the message of a conflict with one naming the clashing field.
pub(crate) fn conflict_message(message: &'static str) -> impl Fn(ServiceError) -> ServiceError {
    move |err| match err {
        ServiceError::Conflict(_) => ServiceError::Conflict(message.to_string()),
        other => other,
    }
}

/// Reject a blank required string.
pub(crate) fn require_text(value: &str, message: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        Err(ServiceError::InvalidArgument(message.to_string()))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_becomes_conflict() {
        let err: ServiceError =
            DbError::Constraint("UNIQUE constraint failed: patients.cnp".into()).into();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.to_string(), "Record conflicts with existing data");
    }

    #[test]
    fn test_conflict_message_only_rewrites_conflicts() {
        let rename = conflict_message("Medication name already exists");
        assert_eq!(
            rename(ServiceError::Conflict("raw".into())).to_string(),
            "Medication name already exists"
        );
        assert!(matches!(
            rename(ServiceError::MedicationNotFound(2)),
            ServiceError::MedicationNotFound(2)
        ));
    }

    #[test]
    fn test_other_db_errors_stay_database() {
        let err: ServiceError = DbError::NotFound("prescription 1".into()).into();
        assert!(matches!(err, ServiceError::Database(_)));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_labels_and_messages() {
        let err = ServiceError::PatientNotFound(7);
        assert_eq!(err.to_string(), "Could not find patient with id 7");
        assert_eq!(err.not_found_label(), Some("Patient Not Found"));

        let err = ServiceError::NoAppointmentsForDoctor(3);
        assert_eq!(err.to_string(), "No appointments found for doctor with id 3");
        assert_eq!(err.not_found_label(), Some("No Appointments Found"));

        assert_eq!(
            ServiceError::SpecializationNameNotFound("Oncology".into()).not_found_label(),
            Some("Specialization Not Found")
        );
        assert!(ServiceError::InvalidArgument("x".into()).not_found_label().is_none());
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("Cardiology", "Name is required").is_ok());
        let err = require_text("  ", "Name is required").unwrap_err();
        assert_eq!(err.to_string(), "Name is required");
    }
}
