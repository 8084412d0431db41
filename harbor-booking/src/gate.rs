use crate::contact::{ContactDetails, ContactViolation};
use crate::models::{
    is_cleared, BookingStatus, BookingType, CruiseBooking, CruiseSailing, Passenger, PaymentStatus,
};
use crate::pricing::quote_total;
use harbor_core::{PassengerDocument, PassportValidator, Violations};
use harbor_hold::{HoldCalculator, HoldPolicy};
use harbor_shared::{Clock, Masked, SystemClock};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A booking being filled in by the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub sailing: CruiseSailing,
    #[serde(default)]
    pub passengers: Vec<Passenger>,
    #[serde(default)]
    pub contact: ContactDetails,
    #[serde(default)]
    pub travel_date: Option<String>,
}

impl BookingDraft {
    pub fn new(sailing: CruiseSailing) -> Self {
        Self {
            sailing,
            passengers: Vec::new(),
            contact: ContactDetails::default(),
            travel_date: None,
        }
    }

    /// Grow or shrink the passenger list. Rows already filled in are kept.
    pub fn set_passenger_count(&mut self, count: usize) {
        self.passengers.truncate(count);
        let start = self.passengers.len();
        self.passengers
            .extend((start + 1..=count).map(Passenger::blank));
    }

    pub fn passenger_mut(&mut self, passenger_id: &str) -> Option<&mut Passenger> {
        self.passengers.iter_mut().find(|p| p.id == passenger_id)
    }

    /// Falls back to the sailing's departure date when no travel date was entered.
    pub fn effective_travel_date(&self) -> Option<&str> {
        self.travel_date
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .or(Some(self.sailing.departure_date.as_str()).filter(|d| !d.trim().is_empty()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PassengerCheck {
    pub passenger_id: String,
    pub name: String,
    pub cleared: bool,
    pub violations: Violations,
    pub document: PassengerDocument,
}

/// Everything the confirm button needs to know.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionCheck {
    pub can_confirm: bool,
    pub passengers: Vec<PassengerCheck>,
    pub contact_violations: Vec<ContactViolation>,
    pub hold_days: u32,
    pub hold_period_label: String,
}

impl SubmissionCheck {
    pub fn ineligible_passengers(&self) -> Vec<&str> {
        self.passengers
            .iter()
            .filter(|p| !p.cleared)
            .map(|p| p.passenger_id.as_str())
            .collect()
    }
}

/// Commercial details attached when the agent submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub agent_id: String,
    pub cabin_category: String,
    #[serde(default)]
    pub cabin_number: Option<String>,
}

/// Decides whether a draft may become a booking and, if so, stamps its hold.
pub struct BookingGate<C = SystemClock> {
    validator: PassportValidator<C>,
    holds: HoldCalculator<C>,
}

impl<C: Clock + Clone> BookingGate<C> {
    pub fn new(policy: HoldPolicy, clock: C) -> Self {
        Self {
            validator: PassportValidator::new(clock.clone()),
            holds: HoldCalculator::new(policy, clock),
        }
    }
}

impl<C: Clock> BookingGate<C> {
    pub fn validator(&self) -> &PassportValidator<C> {
        &self.validator
    }

    pub fn holds(&self) -> &HoldCalculator<C> {
        &self.holds
    }

    /// Re-validate every passenger and the contact form against the current time.
    pub fn check(&self, draft: &BookingDraft) -> SubmissionCheck {
        let travel_date = draft.effective_travel_date();

        let passengers: Vec<PassengerCheck> = draft
            .passengers
            .iter()
            .map(|p| self.check_passenger(p, travel_date))
            .collect();

        let contact_violations = draft.contact.violations();
        let nights = draft.sailing.duration_nights;

        let can_confirm = !passengers.is_empty()
            && nights > 0
            && passengers.iter().all(|p| p.cleared)
            && contact_violations.is_empty();

        SubmissionCheck {
            can_confirm,
            passengers,
            contact_violations,
            hold_days: self.holds.calculate_hold_period(nights),
            hold_period_label: self.holds.format_hold_period(nights),
        }
    }

    fn check_passenger(&self, passenger: &Passenger, travel_date: Option<&str>) -> PassengerCheck {
        let document = passenger.evaluate_document(&self.validator, travel_date);
        let violations = passenger.document_violations(&self.validator, &document);
        let cleared = is_cleared(&violations, &document);

        tracing::debug!(
            passenger = %passenger.id,
            passport = %Masked(document.passport_number()),
            status = ?document.status(),
            remaining_months = document.remaining_validity_months(),
            cleared,
            "Evaluated passenger document"
        );

        PassengerCheck {
            passenger_id: passenger.id.clone(),
            name: passenger.full_name(),
            cleared,
            violations,
            document,
        }
    }

    /// Turn a draft into a held cruise booking.
    ///
    /// Checks run in the order the agent sees them: passengers present, cabin
    /// on sale, contact fields filled, passports eligible, then email and phone
    /// format. The fare is quoted from the sailing price and cabin category.
    pub fn submit(
        &self,
        draft: &BookingDraft,
        request: SubmitRequest,
    ) -> Result<CruiseBooking, BookingError> {
        let nights = draft.sailing.duration_nights;
        if nights <= 0 {
            return Err(self.reject(BookingError::InvalidDuration(nights)));
        }
        if draft.passengers.is_empty() {
            return Err(self.reject(BookingError::NoPassengers));
        }
        let total_amount = quote_total(
            draft.sailing.price_per_person,
            &request.cabin_category,
            draft.passengers.len(),
        )
        .ok_or_else(|| {
            self.reject(BookingError::UnknownCabinCategory(
                request.cabin_category.clone(),
            ))
        })?;

        let check = self.check(draft);

        if check.contact_violations.contains(&ContactViolation::MissingFields) {
            return Err(self.reject(ContactViolation::MissingFields.into()));
        }

        let ineligible: Vec<String> = check
            .ineligible_passengers()
            .into_iter()
            .map(str::to_string)
            .collect();
        if !ineligible.is_empty() {
            return Err(self.reject(BookingError::IneligiblePassengers {
                count: ineligible.len(),
                passenger_ids: ineligible,
            }));
        }

        if let Some(violation) = check.contact_violations.first() {
            return Err(self.reject(violation.clone().into()));
        }

        let window = self.holds.open_window(self.holds.now(), nights);
        let booking = CruiseBooking {
            id: Uuid::new_v4(),
            booking_type: BookingType::Cruise,
            item_id: draft.sailing.id.clone(),
            item_name: draft.sailing.name.clone(),
            agent_id: request.agent_id,
            passengers: draft.passengers.clone(),
            total_amount,
            payment_status: PaymentStatus::Pending,
            status: BookingStatus::Pending,
            booking_date: window.booked_at,
            travel_date: draft.effective_travel_date().unwrap_or_default().to_string(),
            departure_date: draft.sailing.departure_date.clone(),
            cabin_category: request.cabin_category,
            cabin_number: request.cabin_number,
            duration_nights: nights,
            hold_period_days: window.hold_days,
            hold_expiry: window.expires_at,
        };

        tracing::info!(
            booking_id = %booking.id,
            sailing = %booking.item_id,
            passengers = booking.passengers.len(),
            total_amount = booking.total_amount,
            hold_expiry = %booking.hold_expiry,
            "Cruise booking held"
        );

        Ok(booking)
    }

    fn reject(&self, error: BookingError) -> BookingError {
        tracing::warn!("Booking rejected: {}", error);
        error
    }
}

impl Default for BookingGate<SystemClock> {
    fn default() -> Self {
        Self::new(HoldPolicy::default(), SystemClock)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("Cruise duration must be at least one night, got {0}")]
    InvalidDuration(i64),

    #[error("Booking has no passengers")]
    NoPassengers,

    #[error("Unknown cabin category: {0}")]
    UnknownCabinCategory(String),

    #[error("{count} passenger(s) have invalid or expired passports. Please update documents.")]
    IneligiblePassengers {
        count: usize,
        passenger_ids: Vec<String>,
    },

    #[error(transparent)]
    Contact(#[from] ContactViolation),
}
