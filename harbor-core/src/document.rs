use crate::passport::{format_remaining_validity, validate_passport_number, PassportValidator};
use crate::{BusinessRuleViolation, Violations};
use harbor_shared::Clock;
use serde::{Deserialize, Serialize};

/// Raw document fields as typed by the agent. Dates are `YYYY-MM-DD` strings;
/// empty means not entered yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentEntry {
    pub passport_number: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub date_of_birth: String,
    pub front_image: Option<String>,
    pub back_image: Option<String>,
    /// Planned travel date the document is checked against. Absent means now.
    pub travel_date: Option<String>,
}

/// A single field write coming from the document form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentField {
    PassportNumber(String),
    IssueDate(String),
    ExpiryDate(String),
    DateOfBirth(String),
    FrontImage(Option<String>),
    BackImage(Option<String>),
    TravelDate(Option<String>),
}

impl DocumentField {
    fn apply(self, entry: &mut DocumentEntry) {
        match self {
            DocumentField::PassportNumber(v) => entry.passport_number = v,
            DocumentField::IssueDate(v) => entry.issue_date = v,
            DocumentField::ExpiryDate(v) => entry.expiry_date = v,
            DocumentField::DateOfBirth(v) => entry.date_of_birth = v,
            DocumentField::FrontImage(v) => entry.front_image = v,
            DocumentField::BackImage(v) => entry.back_image = v,
            DocumentField::TravelDate(v) => entry.travel_date = v,
        }
    }
}

/// Where a document sits in the entry flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Empty,
    PartiallyEntered,
    Eligible,
    RenewalRequired,
    Invalid,
}

/// Badge shown next to the expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidityStatus {
    Valid,
    ExpiringSoon,
    RenewalRequired,
}

/// A passenger's travel document together with its derived eligibility.
///
/// Only [`PassportValidator::evaluate`] and [`PassportValidator::recompute`]
/// build one, so the derived fields always agree with the entry fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassengerDocument {
    #[serde(flatten)]
    entry: DocumentEntry,
    is_eligible: bool,
    remaining_validity_months: i64,
    renewal_required: bool,
    violations: Violations,
}

impl PassengerDocument {
    pub fn new<C: Clock>(validator: &PassportValidator<C>) -> Self {
        validator.evaluate(DocumentEntry::default())
    }

    /// Write one field and re-derive eligibility in the same step.
    pub fn set<C: Clock>(&mut self, field: DocumentField, validator: &PassportValidator<C>) {
        let mut entry = self.entry.clone();
        field.apply(&mut entry);
        *self = validator.evaluate(entry);
    }

    pub fn entry(&self) -> &DocumentEntry {
        &self.entry
    }

    pub fn into_entry(self) -> DocumentEntry {
        self.entry
    }

    pub fn passport_number(&self) -> &str {
        &self.entry.passport_number
    }

    pub fn is_eligible(&self) -> bool {
        self.is_eligible
    }

    pub fn remaining_validity_months(&self) -> i64 {
        self.remaining_validity_months
    }

    pub fn renewal_required(&self) -> bool {
        self.renewal_required
    }

    pub fn violations(&self) -> &[BusinessRuleViolation] {
        &self.violations
    }

    pub fn remaining_validity_label(&self) -> String {
        format_remaining_validity(self.remaining_validity_months)
    }

    pub fn validity_status(&self) -> Option<ValidityStatus> {
        if self.entry.expiry_date.trim().is_empty() {
            return None;
        }
        Some(match self.remaining_validity_months {
            m if m >= 12 => ValidityStatus::Valid,
            m if m >= crate::MIN_VALIDITY_MONTHS => ValidityStatus::ExpiringSoon,
            _ => ValidityStatus::RenewalRequired,
        })
    }

    pub fn status(&self) -> DocumentStatus {
        let e = &self.entry;
        let required = [
            &e.passport_number,
            &e.issue_date,
            &e.expiry_date,
            &e.date_of_birth,
        ];
        let blank = required.iter().filter(|f| f.trim().is_empty()).count();

        if blank == required.len() && e.front_image.is_none() && e.back_image.is_none() {
            return DocumentStatus::Empty;
        }
        if blank > 0 {
            return DocumentStatus::PartiallyEntered;
        }
        if self.is_eligible {
            return DocumentStatus::Eligible;
        }

        let only_validity_problems = self.violations.iter().all(|v| {
            matches!(
                v,
                BusinessRuleViolation::PassportExpired
                    | BusinessRuleViolation::InsufficientValidityAtTravel
            )
        });
        if self.renewal_required && only_validity_problems {
            DocumentStatus::RenewalRequired
        } else {
            DocumentStatus::Invalid
        }
    }
}

impl<C: Clock> PassportValidator<C> {
    /// Derive eligibility for a set of entry fields. Passport numbers are
    /// normalized to uppercase.
    pub fn evaluate(&self, mut entry: DocumentEntry) -> PassengerDocument {
        entry.passport_number = entry.passport_number.trim().to_uppercase();

        let expiry = self.validate_passport_expiry(&entry.expiry_date, entry.travel_date.as_deref());
        let mut violations = expiry.errors;

        if !validate_passport_number(&entry.passport_number) {
            violations.push(BusinessRuleViolation::PassportNumberInvalid);
        }
        if let Some(error) = self.validate_date_of_birth(&entry.date_of_birth, None).error {
            violations.push(error);
        }

        PassengerDocument {
            is_eligible: expiry.is_valid && violations.is_empty(),
            remaining_validity_months: expiry.remaining_months,
            renewal_required: expiry.renewal_required,
            violations,
            entry,
        }
    }

    /// Re-derive a document against the current clock.
    pub fn recompute(&self, document: PassengerDocument) -> PassengerDocument {
        self.evaluate(document.entry)
    }
}
