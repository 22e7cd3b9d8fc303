//! Appointment service.

use tracing::{debug, info};

use super::{ServiceError, ServiceResult};
use crate::db::Database;
use crate::models::{Appointment, Doctor, Patient};

pub struct AppointmentService<'a> {
    db: &'a Database,
}

impl<'a> AppointmentService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Book an appointment. Patient and doctor are given by id and must
    /// already exist; the returned value carries the full records.
    pub fn create(&self, appointment: &Appointment) -> ServiceResult<Appointment> {
        let patient_id = appointment
            .patient_id()
            .ok_or_else(|| ServiceError::InvalidArgument("Appointment patient is required".into()))?;
        let doctor_id = appointment
            .doctor_id()
            .ok_or_else(|| ServiceError::InvalidArgument("Appointment doctor is required".into()))?;
        if appointment.appointment_date.is_none() {
            return Err(ServiceError::InvalidArgument(
                "Appointment date is required".into(),
            ));
        }

        let saved = self.db.in_transaction(|db| {
            let mut saved = Appointment {
                id: None,
                appointment_date: appointment.appointment_date,
                reason: appointment.reason.clone(),
                patient: Some(load_patient(db, patient_id)?),
                doctor: Some(load_doctor(db, doctor_id)?),
                prescriptions: Vec::new(),
            };
            saved.id = Some(db.insert_appointment(&saved)?);
            Ok::<_, ServiceError>(saved)
        })?;
        info!(id = ?saved.id, patient_id, doctor_id, "created appointment");
        Ok(saved)
    }

    /// An appointment with its participants and prescriptions.
    pub fn get_by_id(&self, id: i64) -> ServiceResult<Appointment> {
        debug!(id, "loading appointment");
        self.db
            .get_appointment(id)?
            .ok_or(ServiceError::AppointmentNotFound(id))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Appointment>> {
        Ok(self.db.list_appointments()?)
    }

    /// Appointments of an existing patient, possibly none.
    pub fn get_by_patient(&self, patient_id: i64) -> ServiceResult<Vec<Appointment>> {
        debug!(patient_id, "listing appointments by patient");
        load_patient(self.db, patient_id)?;
        Ok(self.db.list_appointments_by_patient(patient_id)?)
    }

    /// Appointments of an existing doctor, possibly none.
    pub fn get_by_doctor(&self, doctor_id: i64) -> ServiceResult<Vec<Appointment>> {
        debug!(doctor_id, "listing appointments by doctor");
        load_doctor(self.db, doctor_id)?;
        Ok(self.db.list_appointments_by_doctor(doctor_id)?)
    }

    /// Update date and reason. Patient and doctor are re-resolved when the
    /// input names them by id and kept otherwise.
    pub fn update(&self, id: i64, appointment: &Appointment) -> ServiceResult<Appointment> {
        let updated = self.db.in_transaction(|db| {
            let mut existing = db
                .get_appointment(id)?
                .ok_or(ServiceError::AppointmentNotFound(id))?;

            if appointment.appointment_date.is_some() {
                existing.appointment_date = appointment.appointment_date;
            }
            existing.reason = appointment.reason.clone();
            if let Some(patient_id) = appointment.patient_id() {
                existing.patient = Some(load_patient(db, patient_id)?);
            }
            if let Some(doctor_id) = appointment.doctor_id() {
                existing.doctor = Some(load_doctor(db, doctor_id)?);
            }

            db.update_appointment(&existing)?;
            Ok::<_, ServiceError>(existing)
        })?;
        info!(id, "updated appointment");
        Ok(updated)
    }

    /// Delete an appointment and, through the cascade, its prescriptions.
    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        self.db.in_transaction(|db| {
            db.get_appointment(id)?
                .ok_or(ServiceError::AppointmentNotFound(id))?;
            db.delete_appointment(id)?;
            Ok::<_, ServiceError>(())
        })?;
        info!(id, "deleted appointment");
        Ok(())
    }
}

fn load_patient(db: &Database, id: i64) -> ServiceResult<Patient> {
    db.get_patient(id)?.ok_or(ServiceError::PatientNotFound(id))
}

fn load_doctor(db: &Database, id: i64) -> ServiceResult<Doctor> {
    db.get_doctor(id)?.ok_or(ServiceError::DoctorNotFound(id))
}
