pub mod document;
pub mod passport;

pub use document::{DocumentEntry, DocumentField, DocumentStatus, PassengerDocument, ValidityStatus};
pub use passport::{
    calculate_age, format_remaining_validity, validate_passport_number, DateOfBirthValidation,
    PassportValidation, PassportValidator,
};

/// Minimum passport validity, in 30-day months, a passenger must hold.
pub const MIN_VALIDITY_MONTHS: i64 = 6;

/// The single kind of failure the rule modules report. Always returned inside a
/// result value, never raised; `Display` is the message shown to the agent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessRuleViolation {
    #[error("Passport expiry date is required")]
    ExpiryDateRequired,
    #[error("Passport expiry date is not a valid date")]
    ExpiryDateUnreadable,
    #[error("Passport has already expired")]
    PassportExpired,
    #[error("Passport must have at least 6 months validity from travel date")]
    InsufficientValidityAtTravel,
    #[error("Travel date is not a valid date")]
    TravelDateUnreadable,
    #[error("Passport number must be 6 to 9 letters or digits")]
    PassportNumberInvalid,
    #[error("Date of birth is required")]
    DateOfBirthRequired,
    #[error("Date of birth is not a valid date")]
    DateOfBirthUnreadable,
    #[error("Date of birth cannot be in the future")]
    DateOfBirthInFuture,
    #[error("Passenger must be at least 1 year old")]
    PassengerTooYoung,
    #[error("Date of birth does not match passport information")]
    DateOfBirthMismatch,
}

pub type Violations = Vec<BusinessRuleViolation>;
