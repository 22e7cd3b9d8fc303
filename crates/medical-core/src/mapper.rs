//! Entity <-> DTO mapping.
//!
//! Entity to DTO conversions never re-enter an entity type already on the
//! path from the root: a prescription nested in an appointment drops its
//! `appointment_id`, and an entry nested in a prescription drops its
//! `prescription_id`. DTO to entity conversions are shallow: related
//! entities become reference placeholders carrying only their id (or, for a
//! doctor's specialization, only its name) and must be re-resolved by the
//! service layer before persisting.

use crate::dto::{
    AppointmentDto, DoctorDto, MedicationDto, PatientDto, PrescriptionDto,
    PrescriptionMedicationDto, SpecializationDto,
};
use crate::models::{
    Appointment, Doctor, Medication, Patient, Prescription, PrescriptionMedication,
    Specialization,
};

/// Blank strings become `None`.
fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// =========================================================================
// Patients
// =========================================================================

pub fn to_patient_dto(patient: &Patient) -> PatientDto {
    PatientDto {
        id: patient.id,
        first_name: patient.first_name.clone(),
        last_name: patient.last_name.clone(),
        cnp: patient.cnp.clone(),
        email: patient.email.clone().unwrap_or_default(),
        phone: patient.phone.clone().unwrap_or_default(),
    }
}

pub fn to_patient(dto: &PatientDto) -> Patient {
    Patient {
        id: dto.id,
        first_name: dto.first_name.clone(),
        last_name: dto.last_name.clone(),
        cnp: dto.cnp.clone(),
        email: non_blank(&dto.email),
        phone: non_blank(&dto.phone),
    }
}

// =========================================================================
// Doctors & specializations
// =========================================================================

pub fn to_doctor_dto(doctor: &Doctor) -> DoctorDto {
    DoctorDto {
        id: doctor.id,
        first_name: doctor.first_name.clone(),
        last_name: doctor.last_name.clone(),
        email: doctor.email.clone(),
        phone: doctor.phone.clone(),
        specialization: doctor.specialization_name().map(str::to_string),
    }
}

/// The specialization becomes a name-only placeholder.
pub fn to_doctor(dto: &DoctorDto) -> Doctor {
    Doctor {
        id: dto.id,
        first_name: dto.first_name.clone(),
        last_name: dto.last_name.clone(),
        email: dto.email.as_deref().and_then(non_blank),
        phone: dto.phone.as_deref().and_then(non_blank),
        specialization: dto
            .specialization
            .as_deref()
            .and_then(non_blank)
            .map(Specialization::new),
    }
}

pub fn to_specialization_dto(specialization: &Specialization) -> SpecializationDto {
    SpecializationDto {
        id: specialization.id,
        name: specialization.name.clone(),
        doctors: Vec::new(),
    }
}

/// Specialization with the doctors holding it. Nested doctors point back by
/// name only.
pub fn to_specialization_dto_with_doctors(
    specialization: &Specialization,
    doctors: &[Doctor],
) -> SpecializationDto {
    SpecializationDto {
        doctors: doctors.iter().map(to_doctor_dto).collect(),
        ..to_specialization_dto(specialization)
    }
}

/// Nested doctors are not carried over.
pub fn to_specialization(dto: &SpecializationDto) -> Specialization {
    Specialization {
        id: dto.id,
        name: dto.name.clone(),
    }
}

// =========================================================================
// Medications
// =========================================================================

pub fn to_medication_dto(medication: &Medication) -> MedicationDto {
    MedicationDto {
        id: medication.id,
        name: medication.name.clone(),
        description: medication.description.clone().unwrap_or_default(),
    }
}

pub fn to_medication(dto: &MedicationDto) -> Medication {
    Medication {
        id: dto.id,
        name: dto.name.clone(),
        description: non_blank(&dto.description),
    }
}

// =========================================================================
// Appointments
// =========================================================================

pub fn to_appointment_dto(appointment: &Appointment) -> AppointmentDto {
    AppointmentDto {
        id: appointment.id,
        patient: appointment.patient.as_ref().map(to_patient_dto),
        doctor: appointment.doctor.as_ref().map(to_doctor_dto),
        appointment_date: appointment.appointment_date,
        reason: appointment.reason.clone().unwrap_or_default(),
        prescriptions: appointment
            .prescriptions
            .iter()
            .map(prescription_dto_without_appointment)
            .collect(),
    }
}

/// Patient and doctor become id-only placeholders; nested prescriptions are
/// ignored.
pub fn to_appointment(dto: &AppointmentDto) -> Appointment {
    Appointment {
        id: dto.id,
        appointment_date: dto.appointment_date,
        reason: non_blank(&dto.reason),
        patient: dto
            .patient
            .as_ref()
            .and_then(|p| p.id)
            .map(Patient::reference),
        doctor: dto
            .doctor
            .as_ref()
            .and_then(|d| d.id)
            .map(Doctor::reference),
        prescriptions: Vec::new(),
    }
}

// =========================================================================
// Prescriptions
// =========================================================================

pub fn to_prescription_dto(prescription: &Prescription) -> PrescriptionDto {
    PrescriptionDto {
        appointment_id: prescription.appointment_id,
        ..prescription_dto_without_appointment(prescription)
    }
}

/// Variant used inside an appointment: no back-reference to it.
fn prescription_dto_without_appointment(prescription: &Prescription) -> PrescriptionDto {
    PrescriptionDto {
        id: prescription.id,
        appointment_id: None,
        issued_date: prescription.issued_date,
        instructions: prescription.instructions.clone(),
        medications: prescription
            .medications
            .iter()
            .map(entry_dto_without_prescription)
            .collect(),
    }
}

pub fn to_prescription(dto: &PrescriptionDto) -> Prescription {
    Prescription {
        id: dto.id,
        appointment_id: dto.appointment_id,
        issued_date: dto.issued_date,
        instructions: dto.instructions.clone(),
        medications: dto
            .medications
            .iter()
            .map(to_prescription_medication)
            .collect(),
    }
}

pub fn to_prescription_medication_dto(entry: &PrescriptionMedication) -> PrescriptionMedicationDto {
    PrescriptionMedicationDto {
        prescription_id: entry.prescription_id,
        ..entry_dto_without_prescription(entry)
    }
}

/// Variant used inside a prescription: no back-reference to it.
fn entry_dto_without_prescription(entry: &PrescriptionMedication) -> PrescriptionMedicationDto {
    PrescriptionMedicationDto {
        id: entry.id,
        prescription_id: None,
        medication: entry.medication.as_ref().map(to_medication_dto),
        dosage: entry.dosage.clone(),
    }
}

/// The medication becomes an id-only placeholder.
pub fn to_prescription_medication(dto: &PrescriptionMedicationDto) -> PrescriptionMedication {
    PrescriptionMedication {
        id: dto.id,
        prescription_id: dto.prescription_id,
        medication: dto
            .medication
            .as_ref()
            .and_then(|m| m.id)
            .map(Medication::reference),
        dosage: dto.dosage.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2030, 5, 1)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    }

    fn cardiologist() -> Doctor {
        let mut doctor = Doctor::new(
            "Ann".into(),
            "Lee".into(),
            Specialization {
                id: Some(1),
                name: "Cardiology".into(),
            },
        );
        doctor.id = Some(2);
        doctor
    }

    fn full_appointment() -> Appointment {
        let mut patient = Patient::new("John".into(), "Doe".into(), "1234567890123".into());
        patient.id = Some(1);

        let ibuprofen = Medication {
            id: Some(5),
            name: "Ibuprofen".into(),
            description: Some("NSAID".into()),
        };
        let mut entry = PrescriptionMedication::new(3, ibuprofen, "2 pills daily".into());
        entry.id = Some(4);

        let mut prescription = Prescription::new(9, Some("After meals".into()));
        prescription.id = Some(3);
        prescription.medications.push(entry);

        let mut appointment = Appointment::new(patient, cardiologist(), date());
        appointment.id = Some(9);
        appointment.reason = Some("Checkup".into());
        appointment.prescriptions.push(prescription);
        appointment
    }

    #[test]
    fn test_doctor_specialization_by_name() {
        let dto = to_doctor_dto(&cardiologist());
        assert_eq!(dto.specialization, Some("Cardiology".into()));

        let back = to_doctor(&dto);
        let specialization = back.specialization.unwrap();
        assert_eq!(specialization.name, "Cardiology");
        // Placeholder: the id must be resolved by the service
        assert_eq!(specialization.id, None);
    }

    #[test]
    fn test_blank_specialization_is_absent() {
        let dto = DoctorDto {
            specialization: Some("  ".into()),
            ..DoctorDto::default()
        };
        assert!(to_doctor(&dto).specialization.is_none());
    }

    #[test]
    fn test_blank_doctor_contact_is_absent() {
        let dto = DoctorDto {
            email: Some("".into()),
            phone: Some("   ".into()),
            ..DoctorDto::default()
        };
        let doctor = to_doctor(&dto);
        assert_eq!(doctor.email, None);
        assert_eq!(doctor.phone, None);
    }

    #[test]
    fn test_appointment_breaks_cycles() {
        let dto = to_appointment_dto(&full_appointment());

        assert_eq!(dto.patient.as_ref().unwrap().cnp, "1234567890123");
        assert_eq!(dto.doctor.as_ref().unwrap().specialization, Some("Cardiology".into()));

        let prescription = &dto.prescriptions[0];
        assert_eq!(prescription.appointment_id, None);
        assert_eq!(prescription.instructions, Some("After meals".into()));

        let entry = &prescription.medications[0];
        assert_eq!(entry.prescription_id, None);
        assert_eq!(entry.medication.as_ref().unwrap().name, "Ibuprofen");
        assert_eq!(entry.dosage, Some("2 pills daily".into()));
    }

    #[test]
    fn test_top_level_prescription_keeps_appointment_id() {
        let appointment = full_appointment();
        let dto = to_prescription_dto(&appointment.prescriptions[0]);

        assert_eq!(dto.appointment_id, Some(9));
        assert_eq!(dto.medications[0].prescription_id, None);

        let entry = to_prescription_medication_dto(&appointment.prescriptions[0].medications[0]);
        assert_eq!(entry.prescription_id, Some(3));
    }

    #[test]
    fn test_appointment_from_dto_is_shallow() {
        let mut dto = to_appointment_dto(&full_appointment());
        dto.patient.as_mut().unwrap().first_name = "Changed".into();

        let appointment = to_appointment(&dto);
        assert_eq!(appointment.patient, Some(Patient::reference(1)));
        assert_eq!(appointment.doctor, Some(Doctor::reference(2)));
        assert!(appointment.prescriptions.is_empty());
        assert_eq!(appointment.appointment_date, Some(date()));
        assert_eq!(appointment.reason, Some("Checkup".into()));
    }

    #[test]
    fn test_appointment_without_references() {
        let appointment = to_appointment(&AppointmentDto {
            patient: Some(PatientDto::default()),
            ..AppointmentDto::default()
        });
        assert!(appointment.patient.is_none());
        assert!(appointment.doctor.is_none());
    }

    #[test]
    fn test_entry_from_dto_uses_medication_reference() {
        let dto = PrescriptionMedicationDto {
            id: Some(4),
            prescription_id: Some(3),
            medication: Some(MedicationDto {
                id: Some(5),
                name: "Ibuprofen".into(),
                description: "NSAID".into(),
            }),
            dosage: Some("1 pill".into()),
        };

        let entry = to_prescription_medication(&dto);
        assert_eq!(entry.medication, Some(Medication::reference(5)));
        assert_eq!(entry.prescription_id, Some(3));
    }

    #[test]
    fn test_specialization_with_doctors() {
        let specialization = Specialization {
            id: Some(1),
            name: "Cardiology".into(),
        };
        let dto = to_specialization_dto_with_doctors(&specialization, &[cardiologist()]);

        assert_eq!(dto.doctors.len(), 1);
        assert_eq!(dto.doctors[0].specialization, Some("Cardiology".into()));
        assert!(to_specialization_dto(&specialization).doctors.is_empty());
    }

    #[test]
    fn test_medication_round_trip() {
        let medication = Medication {
            id: Some(5),
            name: "Ibuprofen".into(),
            description: Some("NSAID".into()),
        };
        assert_eq!(to_medication(&to_medication_dto(&medication)), medication);
    }

    proptest! {
        #[test]
        fn prop_patient_round_trip(
            id in proptest::option::of(1i64..1_000_000),
            first_name in "[A-Za-z]{2,50}",
            last_name in "[A-Za-z]{2,50}",
            cnp in "[0-9]{13}",
            email in proptest::option::of("[a-z]{1,10}@[a-z]{1,10}\\.com"),
            phone in proptest::option::of("[0-9]{10}"),
        ) {
            let patient = Patient { id, first_name, last_name, cnp, email, phone };
            prop_assert_eq!(to_patient(&to_patient_dto(&patient)), patient);
        }

        #[test]
        fn prop_doctor_round_trip_keeps_scalars(
            first_name in "[A-Za-z]{2,100}",
            email in proptest::option::of("[a-z]{1,10}@[a-z]{1,10}\\.org"),
            specialization in "[A-Za-z]{2,30}",
        ) {
            let doctor = Doctor {
                id: Some(1),
                first_name,
                last_name: "Lee".into(),
                email,
                phone: None,
                specialization: Some(Specialization::new(specialization)),
            };
            prop_assert_eq!(to_doctor(&to_doctor_dto(&doctor)), doctor);
        }
    }
}
