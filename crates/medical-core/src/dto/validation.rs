//! Constraint checks for request DTOs.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

/// Constraint violations collected from one DTO, reported as a single
/// comma-joined message.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}", .0.join(", "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

/// Implemented by request DTOs.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Accumulates violation messages in field order.
#[derive(Debug, Default)]
pub(crate) struct Checks {
    errors: Vec<String>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    /// Required, non-blank, with a character count in `min..=max`.
    pub fn text(&mut self, value: &str, min: usize, max: usize, required: &str, size: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.fail(required);
        } else {
            let len = value.chars().count();
            if len < min || len > max {
                self.fail(size);
            }
        }
        self
    }

    /// Optional text: when present, at most `max` characters.
    pub fn max_len(&mut self, value: Option<&str>, max: usize, message: &str) -> &mut Self {
        if value.is_some_and(|v| v.chars().count() > max) {
            self.fail(message);
        }
        self
    }

    /// Required, non-blank.
    pub fn required_text(&mut self, value: Option<&str>, message: &str) -> &mut Self {
        if value.map_or(true, |v| v.trim().is_empty()) {
            self.fail(message);
        }
        self
    }

    pub fn required<T>(&mut self, value: Option<&T>, message: &str) -> &mut Self {
        if value.is_none() {
            self.fail(message);
        }
        self
    }

    pub fn email(&mut self, value: Option<&str>, message: &str) -> &mut Self {
        if value.is_some_and(|v| !v.trim().is_empty() && !EMAIL_RE.is_match(v)) {
            self.fail(message);
        }
        self
    }

    pub fn phone(&mut self, value: Option<&str>, message: &str) -> &mut Self {
        if value.is_some_and(|v| !v.trim().is_empty() && !PHONE_RE.is_match(v)) {
            self.fail(message);
        }
        self
    }

    /// When present, strictly after `now`.
    pub fn future(&mut self, value: Option<&NaiveDateTime>, now: NaiveDateTime, message: &str) -> &mut Self {
        if value.is_some_and(|v| *v <= now) {
            self.fail(message);
        }
        self
    }

    /// When present, not after `now`.
    pub fn past_or_present(&mut self, value: Option<&NaiveDateTime>, now: NaiveDateTime, message: &str) -> &mut Self {
        if value.is_some_and(|v| *v > now) {
            self.fail(message);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(std::mem::take(&mut self.errors)))
        }
    }
}

/// Validate a dosage given outside a DTO (query parameters).
pub fn validate_dosage(dosage: &str) -> Result<(), ValidationErrors> {
    Checks::new()
        .text(dosage, 1, 50, "Dosage is required", "Dosage cannot exceed 50 characters")
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_joined_with_comma() {
        let err = Checks::new()
            .text("", 2, 50, "First name is required", "bad size")
            .text("x", 2, 50, "required", "Last name must be between 2 and 50 characters")
            .finish()
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "First name is required, Last name must be between 2 and 50 characters"
        );
        assert_eq!(err.messages().len(), 2);
    }

    #[test]
    fn test_email_and_phone() {
        let mut checks = Checks::new();
        checks
            .email(Some("john.doe@example.com"), "bad email")
            .phone(Some("1234567890"), "bad phone");
        assert!(checks.finish().is_ok());

        let err = Checks::new()
            .email(Some("not-an-email"), "Email should be valid")
            .phone(Some("12345"), "Phone must be 10 digits")
            .phone(Some("12345678901"), "Phone must be 10 digits")
            .finish()
            .unwrap_err();
        assert_eq!(err.messages().len(), 3);
    }

    #[test]
    fn test_dates() {
        let now = chrono::Local::now().naive_local();
        let later = now + chrono::Duration::hours(1);

        assert!(Checks::new().future(Some(&later), now, "f").finish().is_ok());
        assert!(Checks::new().future(Some(&now), now, "f").finish().is_err());
        assert!(Checks::new().past_or_present(Some(&now), now, "p").finish().is_ok());
        assert!(Checks::new().past_or_present(Some(&later), now, "p").finish().is_err());
    }

    #[test]
    fn test_dosage() {
        assert!(validate_dosage("2 pills daily").is_ok());
        assert!(validate_dosage("  ").is_err());
        assert!(validate_dosage(&"x".repeat(51)).is_err());
    }
}
