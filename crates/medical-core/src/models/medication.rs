//! Medication entity.

/// A medication in the formulary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Medication {
    pub id: Option<i64>,
    /// Unique name
    pub name: String,
    pub description: Option<String>,
}

impl Medication {
    pub fn new(name: String, description: Option<String>) -> Self {
        Self {
            id: None,
            name,
            description,
        }
    }

    /// Reference placeholder carrying only an id.
    pub fn reference(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
