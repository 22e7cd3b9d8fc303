//! Prescription and prescription/medication join entities.

use chrono::NaiveDateTime;

use super::Medication;

/// A prescription issued during an appointment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prescription {
    pub id: Option<i64>,
    /// Owning appointment (back-reference by id)
    pub appointment_id: Option<i64>,
    /// Set server-side on creation; never in the future
    pub issued_date: Option<NaiveDateTime>,
    pub instructions: Option<String>,
    /// Join rows. Rows with `id == None` are inserted when the
    /// prescription is saved.
    pub medications: Vec<PrescriptionMedication>,
}

impl Prescription {
    /// Create a new prescription for an appointment, issued now.
    pub fn new(appointment_id: i64, instructions: Option<String>) -> Self {
        Self {
            id: None,
            appointment_id: Some(appointment_id),
            issued_date: Some(chrono::Local::now().naive_local()),
            instructions,
            medications: Vec::new(),
        }
    }

    /// Number of join rows not yet persisted.
    pub fn unsaved_medication_count(&self) -> usize {
        self.medications.iter().filter(|m| m.id.is_none()).count()
    }
}

/// Join row between a prescription and a medication, with a dosage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrescriptionMedication {
    pub id: Option<i64>,
    /// Owning prescription (back-reference by id)
    pub prescription_id: Option<i64>,
    pub medication: Option<Medication>,
    pub dosage: Option<String>,
}

impl PrescriptionMedication {
    pub fn new(prescription_id: i64, medication: Medication, dosage: String) -> Self {
        Self {
            id: None,
            prescription_id: Some(prescription_id),
            medication: Some(medication),
            dosage: Some(dosage),
        }
    }

    pub fn medication_id(&self) -> Option<i64> {
        self.medication.as_ref().and_then(|m| m.id)
    }
}
