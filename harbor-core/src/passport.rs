use crate::{BusinessRuleViolation, Violations, MIN_VALIDITY_MONTHS};
use chrono::{DateTime, Datelike, Utc};
use harbor_shared::dates::{ceil_div, parse_instant};
use harbor_shared::{Clock, SystemClock};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validity math uses a fixed 30-day month, not calendar months. The 6-month
/// threshold is calibrated against it.
const MONTH_MILLIS: i64 = 30 * 24 * 60 * 60 * 1000;

static PASSPORT_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]{6,9}$").expect("passport number pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportValidation {
    pub is_valid: bool,
    pub remaining_months: i64,
    pub renewal_required: bool,
    pub errors: Violations,
}

impl PassportValidation {
    fn rejected(error: BusinessRuleViolation) -> Self {
        Self {
            is_valid: false,
            remaining_months: 0,
            renewal_required: true,
            errors: vec![error],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateOfBirthValidation {
    pub is_valid: bool,
    pub error: Option<BusinessRuleViolation>,
}

impl DateOfBirthValidation {
    fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    fn invalid(error: BusinessRuleViolation) -> Self {
        Self {
            is_valid: false,
            error: Some(error),
        }
    }
}

/// Evaluates passenger travel documents against the agency's eligibility rules.
///
/// Every method is a pure function of its arguments and the injected clock, so
/// results must be re-derived before submission rather than cached.
#[derive(Debug, Clone, Default)]
pub struct PassportValidator<C = SystemClock> {
    clock: C,
}

impl<C: Clock> PassportValidator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Check remaining passport validity, optionally against a planned travel date.
    ///
    /// An empty or absent `travel_date` means travel happens now.
    pub fn validate_passport_expiry(
        &self,
        expiry_date: &str,
        travel_date: Option<&str>,
    ) -> PassportValidation {
        if expiry_date.trim().is_empty() {
            return PassportValidation::rejected(BusinessRuleViolation::ExpiryDateRequired);
        }

        let expiry = match parse_instant(expiry_date) {
            Some(expiry) => expiry,
            None => return PassportValidation::rejected(BusinessRuleViolation::ExpiryDateUnreadable),
        };

        let now = self.clock.now();
        if expiry <= now {
            return PassportValidation::rejected(BusinessRuleViolation::PassportExpired);
        }

        let mut errors = Vec::new();
        let remaining_months = months_between(now, expiry);

        let months_until_travel = match travel_date.filter(|t| !t.trim().is_empty()) {
            None => 0,
            Some(raw) => match parse_instant(raw) {
                Some(travel) => months_between(now, travel),
                None => {
                    errors.push(BusinessRuleViolation::TravelDateUnreadable);
                    0
                }
            },
        };

        if remaining_months - months_until_travel < MIN_VALIDITY_MONTHS {
            errors.push(BusinessRuleViolation::InsufficientValidityAtTravel);
        }

        PassportValidation {
            is_valid: errors.is_empty() && remaining_months >= MIN_VALIDITY_MONTHS,
            remaining_months: remaining_months.max(0),
            renewal_required: remaining_months < MIN_VALIDITY_MONTHS,
            errors,
        }
    }

    /// Check a date of birth, optionally against the one printed in the passport.
    ///
    /// The passport comparison is an exact string comparison: `2001-02-03` and
    /// `2001-02-03T00:00:00` do not match.
    pub fn validate_date_of_birth(
        &self,
        date_of_birth: &str,
        reference_dob: Option<&str>,
    ) -> DateOfBirthValidation {
        if date_of_birth.trim().is_empty() {
            return DateOfBirthValidation::invalid(BusinessRuleViolation::DateOfBirthRequired);
        }

        let dob = match parse_instant(date_of_birth) {
            Some(dob) => dob,
            None => return DateOfBirthValidation::invalid(BusinessRuleViolation::DateOfBirthUnreadable),
        };

        let now = self.clock.now();
        if dob > now {
            return DateOfBirthValidation::invalid(BusinessRuleViolation::DateOfBirthInFuture);
        }

        // Calendar-year difference only; month and day are ignored here.
        if now.year() - dob.year() < 1 {
            return DateOfBirthValidation::invalid(BusinessRuleViolation::PassengerTooYoung);
        }

        match reference_dob {
            Some(reference) if !reference.is_empty() && reference != date_of_birth => {
                DateOfBirthValidation::invalid(BusinessRuleViolation::DateOfBirthMismatch)
            }
            _ => DateOfBirthValidation::valid(),
        }
    }

    /// Completed years of age. Zero for blank or unreadable input.
    pub fn calculate_age(&self, date_of_birth: &str) -> u32 {
        calculate_age(date_of_birth, self.clock.now())
    }
}

fn months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    ceil_div((to - from).num_milliseconds(), MONTH_MILLIS)
}

/// Passport numbers are 6 to 9 letters or digits, case-insensitive.
/// Surrounding whitespace is ignored.
pub fn validate_passport_number(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && PASSPORT_NUMBER.is_match(&value.to_uppercase())
}

/// Completed years between `date_of_birth` and `now`.
pub fn calculate_age(date_of_birth: &str, now: DateTime<Utc>) -> u32 {
    let dob = match parse_instant(date_of_birth) {
        Some(dob) => dob,
        None => return 0,
    };

    let mut age = now.year() - dob.year();
    if (now.month(), now.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Human readable remaining validity: `Expired`, `5 months`, `2 years`, `1y 2m`.
pub fn format_remaining_validity(months: i64) -> String {
    if months <= 0 {
        return "Expired".to_string();
    }
    if months < 12 {
        return format!("{} month{}", months, plural(months));
    }

    let years = months / 12;
    match months % 12 {
        0 => format!("{} year{}", years, plural(years)),
        rest => format!("{}y {}m", years, rest),
    }
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}
