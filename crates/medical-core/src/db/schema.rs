//! SQLite schema definition.

/// Complete database schema for medical records.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    cnp TEXT NOT NULL UNIQUE,                    -- national personal id, 13 chars
    email TEXT,
    phone TEXT
);

-- ============================================================================
-- Specializations
-- ============================================================================

CREATE TABLE IF NOT EXISTS specializations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT,
    phone TEXT,
    specialization_id INTEGER NOT NULL
        REFERENCES specializations(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_doctors_specialization ON doctors(specialization_id);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id) ON DELETE CASCADE,
    doctor_id INTEGER NOT NULL REFERENCES doctors(id) ON DELETE CASCADE,
    appointment_date TEXT NOT NULL,
    reason TEXT
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
CREATE INDEX IF NOT EXISTS idx_appointments_doctor ON appointments(doctor_id);

-- ============================================================================
-- Prescriptions
-- ============================================================================

CREATE TABLE IF NOT EXISTS prescriptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    appointment_id INTEGER NOT NULL REFERENCES appointments(id) ON DELETE CASCADE,
    issued_date TEXT NOT NULL,
    instructions TEXT
);

CREATE INDEX IF NOT EXISTS idx_prescriptions_appointment ON prescriptions(appointment_id);

-- ============================================================================
-- Medications
-- ============================================================================

CREATE TABLE IF NOT EXISTS medications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT
);

-- ============================================================================
-- Prescription <-> Medication join rows
-- ============================================================================

CREATE TABLE IF NOT EXISTS prescription_medications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    prescription_id INTEGER NOT NULL REFERENCES prescriptions(id) ON DELETE CASCADE,
    medication_id INTEGER NOT NULL REFERENCES medications(id) ON DELETE CASCADE,
    dosage TEXT
);

CREATE INDEX IF NOT EXISTS idx_pm_prescription ON prescription_medications(prescription_id);
CREATE INDEX IF NOT EXISTS idx_pm_medication ON prescription_medications(medication_id);
"#;
