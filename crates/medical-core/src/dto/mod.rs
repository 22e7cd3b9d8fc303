//! Wire-format DTOs exchanged over the REST API.
//!
//! Field names are camelCase on the wire. Every struct deserializes with
//! defaults for missing fields so that nested references may be sent as
//! `{"id": 1}`; required fields are enforced by [`Validate`] on the
//! top-level request body only.

mod validation;

pub use validation::{validate_dosage, Validate, ValidationErrors};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use validation::Checks;

/// Patient as exchanged over the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDto {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub cnp: String,
    pub email: String,
    pub phone: String,
}

impl Validate for PatientDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .text(
                &self.first_name,
                2,
                50,
                "First name is required",
                "First name must be between 2 and 50 characters",
            )
            .text(
                &self.last_name,
                2,
                50,
                "Last name is required",
                "Last name must be between 2 and 50 characters",
            )
            .text(&self.cnp, 13, 13, "CNP is required", "CNP must be exactly 13 characters")
            .required_text(Some(self.email.as_str()), "Email is required")
            .email(Some(self.email.as_str()), "Email should be valid")
            .required_text(Some(self.phone.as_str()), "Phone is required")
            .phone(Some(self.phone.as_str()), "Phone must be 10 digits")
            .finish()
    }
}

/// Doctor as exchanged over the API. The specialization travels by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DoctorDto {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
}

impl Validate for DoctorDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .text(
                &self.first_name,
                2,
                100,
                "First name is required",
                "First name must be between 2 and 100 characters",
            )
            .text(
                &self.last_name,
                2,
                100,
                "Last name is required",
                "Last name must be between 2 and 100 characters",
            )
            .email(self.email.as_deref(), "Email should be valid")
            .max_len(self.email.as_deref(), 150, "Email cannot exceed 150 characters")
            .phone(self.phone.as_deref(), "Phone must be 10 digits")
            .required_text(self.specialization.as_deref(), "Specialization is required")
            .finish()
    }
}

/// Specialization as exchanged over the API.
///
/// `doctors` is only filled when a single specialization is fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecializationDto {
    pub id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub doctors: Vec<DoctorDto>,
}

impl Validate for SpecializationDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .text(
                &self.name,
                2,
                100,
                "Specialization name is required",
                "Specialization name must be between 2 and 100 characters",
            )
            .finish()
    }
}

/// Medication as exchanged over the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MedicationDto {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

impl Validate for MedicationDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .text(
                &self.name,
                2,
                100,
                "Medication name is required",
                "Medication name must be between 2 and 100 characters",
            )
            .text(
                &self.description,
                1,
                500,
                "Description is required",
                "Description cannot exceed 500 characters",
            )
            .finish()
    }
}

/// Appointment as exchanged over the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppointmentDto {
    pub id: Option<i64>,
    pub patient: Option<PatientDto>,
    pub doctor: Option<DoctorDto>,
    pub appointment_date: Option<NaiveDateTime>,
    pub reason: String,
    pub prescriptions: Vec<PrescriptionDto>,
}

impl Validate for AppointmentDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let now = chrono::Local::now().naive_local();
        Checks::new()
            .required(self.doctor.as_ref(), "Doctor is required")
            .required(self.appointment_date.as_ref(), "Appointment date is required")
            .future(
                self.appointment_date.as_ref(),
                now,
                "Appointment date must be in the future",
            )
            .text(
                &self.reason,
                1,
                500,
                "Reason for appointment is required",
                "Reason cannot exceed 500 characters",
            )
            .finish()
    }
}

impl AppointmentDto {
    /// Rules for a replacement body. The date may be omitted to keep the
    /// stored one, and the doctor is only re-resolved when it carries an id.
    pub fn validate_update(&self) -> Result<(), ValidationErrors> {
        let now = chrono::Local::now().naive_local();
        Checks::new()
            .future(
                self.appointment_date.as_ref(),
                now,
                "Appointment date must be in the future",
            )
            .text(
                &self.reason,
                1,
                500,
                "Reason for appointment is required",
                "Reason cannot exceed 500 characters",
            )
            .finish()
    }
}

/// Prescription as exchanged over the API.
///
/// `appointment_id` is the back-reference to the owning appointment; it is
/// omitted when the prescription is nested inside that appointment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionDto {
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<i64>,
    pub issued_date: Option<NaiveDateTime>,
    pub instructions: Option<String>,
    pub medications: Vec<PrescriptionMedicationDto>,
}

impl Validate for PrescriptionDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let now = chrono::Local::now().naive_local();
        Checks::new()
            .required(self.issued_date.as_ref(), "Issued date is required")
            .past_or_present(
                self.issued_date.as_ref(),
                now,
                "Issued date cannot be in the future",
            )
            .required_text(self.instructions.as_deref(), "Instructions are required")
            .max_len(
                self.instructions.as_deref(),
                1000,
                "Instructions cannot exceed 1000 characters",
            )
            .finish()
    }
}

impl PrescriptionDto {
    /// Rules for a replacement body; an omitted issued date keeps the stored one.
    pub fn validate_update(&self) -> Result<(), ValidationErrors> {
        let now = chrono::Local::now().naive_local();
        Checks::new()
            .past_or_present(
                self.issued_date.as_ref(),
                now,
                "Issued date cannot be in the future",
            )
            .required_text(self.instructions.as_deref(), "Instructions are required")
            .max_len(
                self.instructions.as_deref(),
                1000,
                "Instructions cannot exceed 1000 characters",
            )
            .finish()
    }
}

/// A medication entry of a prescription.
///
/// `prescription_id` is the back-reference to the owning prescription; it
/// is omitted when the entry is nested inside that prescription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionMedicationDto {
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prescription_id: Option<i64>,
    pub medication: Option<MedicationDto>,
    pub dosage: Option<String>,
}

impl Validate for PrescriptionMedicationDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Checks::new()
            .required_text(self.dosage.as_deref(), "Dosage is required")
            .max_len(self.dosage.as_deref(), 50, "Dosage cannot exceed 50 characters")
            .finish()
    }
}
