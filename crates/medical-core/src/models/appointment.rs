//! Appointment entity.

use chrono::NaiveDateTime;

use super::{Doctor, Patient, Prescription};

/// An appointment between a patient and a doctor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Appointment {
    pub id: Option<i64>,
    /// Required when persisting
    pub appointment_date: Option<NaiveDateTime>,
    pub reason: Option<String>,
    /// Required when persisting
    pub patient: Option<Patient>,
    /// Required when persisting
    pub doctor: Option<Doctor>,
    /// Prescriptions issued during this appointment (loaded on read)
    pub prescriptions: Vec<Prescription>,
}

impl Appointment {
    /// Create a new, unsaved appointment referencing a patient and a doctor.
    pub fn new(patient: Patient, doctor: Doctor, appointment_date: NaiveDateTime) -> Self {
        Self {
            id: None,
            appointment_date: Some(appointment_date),
            reason: None,
            patient: Some(patient),
            doctor: Some(doctor),
            prescriptions: Vec::new(),
        }
    }

    pub fn patient_id(&self) -> Option<i64> {
        self.patient.as_ref().and_then(|p| p.id)
    }

    pub fn doctor_id(&self) -> Option<i64> {
        self.doctor.as_ref().and_then(|d| d.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_ids() {
        let date = chrono::NaiveDate::from_ymd_opt(2030, 1, 15)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let appointment = Appointment::new(Patient::reference(1), Doctor::reference(2), date);

        assert_eq!(appointment.patient_id(), Some(1));
        assert_eq!(appointment.doctor_id(), Some(2));
        assert!(appointment.prescriptions.is_empty());
    }
}
