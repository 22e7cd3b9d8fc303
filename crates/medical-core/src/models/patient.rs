//! Patient entity.

/// A patient record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Patient {
    /// Database id - `None` until inserted
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    /// National personal identification code (13 characters, unique)
    pub cnp: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Patient {
    /// Create a new, unsaved patient with the required fields.
    pub fn new(first_name: String, last_name: String, cnp: String) -> Self {
        Self {
            id: None,
            first_name,
            last_name,
            cnp,
            email: None,
            phone: None,
        }
    }

    /// Reference placeholder carrying only an id.
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient() {
        let patient = Patient::new("John".into(), "Doe".into(), "1234567890123".into());
        assert_eq!(patient.id, None);
        assert_eq!(patient.full_name(), "John Doe");
        assert_eq!(patient.email, None);
    }

    #[test]
    fn test_reference_has_only_id() {
        let patient = Patient::reference(7);
        assert_eq!(patient.id, Some(7));
        assert!(patient.first_name.is_empty());
        assert!(patient.cnp.is_empty());
    }
}
