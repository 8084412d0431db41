use chrono::{DateTime, Utc};
use harbor_core::{BusinessRuleViolation, DocumentEntry, PassengerDocument, PassportValidator, Violations};
use harbor_shared::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nationality pre-filled for passengers added through the booking form.
pub const DEFAULT_NATIONALITY: &str = "Indian";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingType {
    Cruise,
    Hotel,
    Flight,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default = "default_nationality")]
    pub nationality: String,
    #[serde(default)]
    pub document: DocumentEntry,
}

fn default_nationality() -> String {
    DEFAULT_NATIONALITY.to_string()
}

impl Passenger {
    /// An empty passenger row, numbered from 1.
    pub fn blank(index: usize) -> Self {
        Self {
            id: format!("passenger-{}", index),
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            nationality: default_nationality(),
            document: DocumentEntry::default(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Evaluate the passport against `travel_date`, which takes precedence over
    /// any travel date stored on the document itself.
    pub fn evaluate_document<C: Clock>(
        &self,
        validator: &PassportValidator<C>,
        travel_date: Option<&str>,
    ) -> PassengerDocument {
        let mut entry = self.document.clone();
        if let Some(travel) = travel_date {
            entry.travel_date = Some(travel.to_string());
        }
        validator.evaluate(entry)
    }

    /// Document violations plus the check that the date of birth typed for the
    /// passenger matches the one on the passport.
    pub fn document_violations<C: Clock>(
        &self,
        validator: &PassportValidator<C>,
        document: &PassengerDocument,
    ) -> Violations {
        let mut violations = document.violations().to_vec();

        if !self.date_of_birth.trim().is_empty() {
            let check = validator.validate_date_of_birth(
                &self.date_of_birth,
                Some(&document.entry().date_of_birth),
            );
            if let Some(error) = check.error {
                if !violations.contains(&error) {
                    violations.push(error);
                }
            }
        }

        violations
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CruiseSailing {
    pub id: String,
    pub name: String,
    pub duration_nights: i64,
    #[serde(default)]
    pub departure_date: String,
    /// Base fare per person, before the cabin multiplier.
    pub price_per_person: f64,
}

/// A submitted cruise booking. Held without payment until `hold_expiry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CruiseBooking {
    pub id: Uuid,
    pub booking_type: BookingType,
    pub item_id: String,
    pub item_name: String,
    pub agent_id: String,
    pub passengers: Vec<Passenger>,
    pub total_amount: f64,
    pub payment_status: PaymentStatus,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub travel_date: String,
    pub departure_date: String,
    pub cabin_category: String,
    pub cabin_number: Option<String>,
    pub duration_nights: i64,
    pub hold_period_days: u32,
    pub hold_expiry: DateTime<Utc>,
}

impl CruiseBooking {
    pub fn is_awaiting_payment(&self) -> bool {
        self.status == BookingStatus::Pending && self.payment_status == PaymentStatus::Pending
    }

    pub fn mark_paid(&mut self) {
        self.payment_status = PaymentStatus::Paid;
        self.status = BookingStatus::Confirmed;
    }

    /// Release an unpaid hold. Paid bookings are never touched.
    pub fn lapse(&mut self) {
        if self.is_awaiting_payment() {
            self.status = BookingStatus::Cancelled;
        }
    }
}

/// True when nothing blocks the passenger from travelling.
pub fn is_cleared(violations: &[BusinessRuleViolation], document: &PassengerDocument) -> bool {
    document.is_eligible() && violations.is_empty()
}
