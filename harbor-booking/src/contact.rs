use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"));

/// Lead contact for a booking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactViolation {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Please enter a valid 10-digit phone number.")]
    InvalidPhone,
}

impl ContactDetails {
    /// Missing fields are reported alone; format checks only run on a complete form.
    pub fn violations(&self) -> Vec<ContactViolation> {
        let fields = [&self.name, &self.email, &self.phone, &self.address];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return vec![ContactViolation::MissingFields];
        }

        let mut violations = Vec::new();
        if !EMAIL.is_match(&self.email) {
            violations.push(ContactViolation::InvalidEmail);
        }
        if !PHONE.is_match(&self.phone_digits()) {
            violations.push(ContactViolation::InvalidPhone);
        }
        violations
    }

    /// Phone number with formatting stripped.
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact() -> ContactDetails {
        ContactDetails {
            name: "Meera Iyer".into(),
            email: "meera@example.com".into(),
            phone: "(987) 654-3210".into(),
            address: "12 Marine Drive, Mumbai".into(),
        }
    }

    #[test]
    fn test_complete_contact_passes() {
        let c = contact();
        assert!(c.violations().is_empty());
        assert_eq!(c.phone_digits(), "9876543210");
    }

    #[test]
    fn test_missing_fields_reported_alone() {
        let mut c = contact();
        c.address = "   ".into();
        c.email = "broken".into();
        assert_eq!(c.violations(), vec![ContactViolation::MissingFields]);
    }

    #[test]
    fn test_format_checks() {
        let mut c = contact();
        c.email = "meera@example".into();
        c.phone = "98765-43210".into();
        assert_eq!(c.violations(), vec![ContactViolation::InvalidEmail]);

        c.email = "meera@example.com".into();
        c.phone = "12345".into();
        assert_eq!(c.violations(), vec![ContactViolation::InvalidPhone]);
        assert_eq!(
            ContactViolation::InvalidPhone.to_string(),
            "Please enter a valid 10-digit phone number."
        );
    }
}
