//! Appointment database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::doctors::{doctor_from_row, DOCTOR_COLUMNS};
use super::patients::{patient_from_row, PATIENT_COLUMNS};
use super::{Database, DbError, DbResult};
use crate::models::Appointment;

/// Appointment row joined with its patient, doctor and the doctor's
/// specialization.
fn select_appointments(filter: &str) -> String {
    format!(
        r#"
        SELECT a.id, a.appointment_date, a.reason, {}, {}
        FROM appointments a
        JOIN patients p ON p.id = a.patient_id
        JOIN doctors d ON d.id = a.doctor_id
        JOIN specializations s ON s.id = d.specialization_id
        {}
        ORDER BY a.appointment_date, a.id
        "#,
        PATIENT_COLUMNS, DOCTOR_COLUMNS, filter
    )
}

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: row.get(0)?,
        appointment_date: row.get(1)?,
        reason: row.get(2)?,
        patient: Some(patient_from_row(row, 3)?),
        doctor: Some(doctor_from_row(row, 9)?),
        prescriptions: Vec::new(),
    })
}

fn reference_ids(appointment: &Appointment) -> DbResult<(i64, i64)> {
    let patient_id = appointment
        .patient_id()
        .ok_or_else(|| DbError::Constraint("appointment has no patient id".into()))?;
    let doctor_id = appointment
        .doctor_id()
        .ok_or_else(|| DbError::Constraint("appointment has no doctor id".into()))?;
    Ok((patient_id, doctor_id))
}

impl Database {
    /// Insert a new appointment, returning the assigned id.
    ///
    /// Prescriptions on the value are ignored; they are created through
    /// their own operations.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<i64> {
        let (patient_id, doctor_id) = reference_ids(appointment)?;
        self.conn.execute(
            r#"
            INSERT INTO appointments (patient_id, doctor_id, appointment_date, reason)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                patient_id,
                doctor_id,
                appointment.appointment_date,
                appointment.reason,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update date, reason and participants of an existing appointment.
    pub fn update_appointment(&self, appointment: &Appointment) -> DbResult<bool> {
        let (patient_id, doctor_id) = reference_ids(appointment)?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE appointments SET
                patient_id = ?2,
                doctor_id = ?3,
                appointment_date = ?4,
                reason = ?5
            WHERE id = ?1
            "#,
            params![
                appointment.id,
                patient_id,
                doctor_id,
                appointment.appointment_date,
                appointment.reason,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get an appointment by id with patient, doctor and prescriptions.
    pub fn get_appointment(&self, id: i64) -> DbResult<Option<Appointment>> {
        let sql = select_appointments("WHERE a.id = ?1");
        let appointment = self
            .conn
            .query_row(&sql, [id], appointment_from_row)
            .optional()?;

        appointment
            .map(|appointment| self.with_prescriptions(appointment))
            .transpose()
    }

    /// List all appointments.
    pub fn list_appointments(&self) -> DbResult<Vec<Appointment>> {
        self.query_appointments(&select_appointments(""), None)
    }

    /// List appointments of a patient.
    pub fn list_appointments_by_patient(&self, patient_id: i64) -> DbResult<Vec<Appointment>> {
        self.query_appointments(&select_appointments("WHERE a.patient_id = ?1"), Some(patient_id))
    }

    /// List appointments of a doctor.
    pub fn list_appointments_by_doctor(&self, doctor_id: i64) -> DbResult<Vec<Appointment>> {
        self.query_appointments(&select_appointments("WHERE a.doctor_id = ?1"), Some(doctor_id))
    }

    /// Delete an appointment and its prescriptions.
    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    fn query_appointments(&self, sql: &str, key: Option<i64>) -> DbResult<Vec<Appointment>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match key {
            Some(key) => stmt.query_map([key], appointment_from_row)?,
            None => stmt.query_map([], appointment_from_row)?,
        };
        let appointments = rows.collect::<Result<Vec<_>, _>>()?;

        appointments
            .into_iter()
            .map(|appointment| self.with_prescriptions(appointment))
            .collect()
    }

    fn with_prescriptions(&self, mut appointment: Appointment) -> DbResult<Appointment> {
        if let Some(id) = appointment.id {
            appointment.prescriptions = self.list_prescriptions_by_appointment(id)?;
        }
        Ok(appointment)
    }
}
