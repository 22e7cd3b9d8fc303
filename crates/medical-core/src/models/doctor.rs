//! Doctor and specialization entities.

/// A medical specialization (e.g. "Cardiology").
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Specialization {
    pub id: Option<i64>,
    /// Unique name
    pub name: String,
}

impl Specialization {
    pub fn new(name: String) -> Self {
        Self { id: None, name }
    }
}

/// A doctor record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Doctor {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Required when persisting. Placeholders built from a DTO carry only
    /// the name; the service resolves the full row before saving.
    pub specialization: Option<Specialization>,
}

impl Doctor {
    /// Create a new, unsaved doctor.
    pub fn new(first_name: String, last_name: String, specialization: Specialization) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            email: None,
            phone: None,
            specialization: Some(specialization),
        }
    }

    /// Reference placeholder carrying only an id.
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    /// Name of the linked specialization, if any.
    pub fn specialization_name(&self) -> Option<&str> {
        self.specialization.as_ref().map(|s| s.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_doctor() {
        let doctor = Doctor::new(
            "Ann".into(),
            "Lee".into(),
            Specialization::new("Cardiology".into()),
        );
        assert_eq!(doctor.id, None);
        assert_eq!(doctor.specialization_name(), Some("Cardiology"));
    }

    #[test]
    fn test_reference_has_no_specialization() {
        let doctor = Doctor::reference(3);
        assert_eq!(doctor.id, Some(3));
        assert_eq!(doctor.specialization_name(), None);
    }
}
