use chrono::{DateTime, Utc};
use harbor_core::{
    format_remaining_validity, validate_passport_number, BusinessRuleViolation,
    DateOfBirthValidation, PassportValidation, PassportValidator,
};
use harbor_hold::{HoldCalculator, HoldTier};
use harbor_shared::Clock;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct PassportReport {
    pub expiry: PassportValidation,
    pub messages: Vec<String>,
    pub remaining_validity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_number_valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<DateOfBirthValidation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

/// Optional inputs to a passport report besides the expiry date.
#[derive(Debug, Default)]
pub struct PassportInput<'a> {
    pub travel_date: Option<&'a str>,
    pub passport_number: Option<&'a str>,
    pub date_of_birth: Option<&'a str>,
    pub passport_dob: Option<&'a str>,
}

pub fn passport_report<C: Clock>(
    validator: &PassportValidator<C>,
    expiry_date: &str,
    input: PassportInput<'_>,
) -> PassportReport {
    let expiry = validator.validate_passport_expiry(expiry_date, input.travel_date);
    let date_of_birth = input
        .date_of_birth
        .map(|dob| validator.validate_date_of_birth(dob, input.passport_dob));

    let mut messages: Vec<String> = expiry.errors.iter().map(ToString::to_string).collect();
    let passport_number_valid = input.passport_number.map(validate_passport_number);
    if passport_number_valid == Some(false) {
        messages.push(BusinessRuleViolation::PassportNumberInvalid.to_string());
    }
    if let Some(error) = date_of_birth.as_ref().and_then(|d| d.error.as_ref()) {
        messages.push(error.to_string());
    }

    PassportReport {
        remaining_validity: format_remaining_validity(expiry.remaining_months),
        age: input.date_of_birth.map(|dob| validator.calculate_age(dob)),
        expiry,
        messages,
        passport_number_valid,
        date_of_birth,
    }
}

#[derive(Debug, Serialize)]
pub struct HoldReport {
    pub cruise_duration_nights: i64,
    pub hold_days: u32,
    pub hold_period: String,
    pub booked_at: DateTime<Utc>,
    pub hold_expiry: DateTime<Utc>,
    pub is_hold_valid: bool,
    pub remaining_hours: i64,
    pub policy: Vec<HoldTier>,
}

pub fn hold_report<C: Clock>(
    calculator: &HoldCalculator<C>,
    nights: i64,
    booked_at: DateTime<Utc>,
) -> HoldReport {
    let window = calculator.open_window(booked_at, nights);
    HoldReport {
        cruise_duration_nights: nights,
        hold_days: window.hold_days,
        hold_period: calculator.format_hold_period(nights),
        booked_at: window.booked_at,
        hold_expiry: window.expires_at,
        is_hold_valid: calculator.is_hold_valid(window.expires_at),
        remaining_hours: calculator.remaining_hold_hours(window.expires_at),
        policy: calculator.policy().tiers().to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use harbor_shared::ManualClock;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 1, 6, 0, 0).unwrap()
    }

    #[test]
    fn test_passport_report_collects_messages() {
        let validator = PassportValidator::new(ManualClock::new(now()));
        let report = passport_report(
            &validator,
            "2025-12-01",
            PassportInput {
                passport_number: Some("AB12"),
                date_of_birth: Some("1990-01-01"),
                passport_dob: Some("1990-01-02"),
                ..Default::default()
            },
        );

        assert!(!report.expiry.is_valid);
        assert_eq!(report.remaining_validity, "4 months");
        assert_eq!(report.passport_number_valid, Some(false));
        assert_eq!(report.age, Some(35));
        assert_eq!(
            report.messages,
            vec![
                "Passport must have at least 6 months validity from travel date".to_string(),
                "Passport number must be 6 to 9 letters or digits".to_string(),
                "Date of birth does not match passport information".to_string(),
            ]
        );
    }

    #[test]
    fn test_hold_report_for_past_booking() {
        let calculator = HoldCalculator::with_clock(ManualClock::new(now()));
        let report = hold_report(&calculator, 20, now() - Duration::days(4));

        assert_eq!(report.hold_days, 3);
        assert_eq!(report.hold_period, "3 days");
        assert!(!report.is_hold_valid);
        assert_eq!(report.remaining_hours, 0);
        assert_eq!(report.policy, harbor_hold::STANDARD_HOLD_TIERS.to_vec());

        let report = hold_report(&calculator, 7, now());
        assert!(report.is_hold_valid);
        assert_eq!(report.remaining_hours, 24);
    }
}
