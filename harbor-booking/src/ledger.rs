use crate::models::CruiseBooking;
use harbor_hold::HoldCalculator;
use harbor_shared::models::events::{BookingHeldEvent, BookingPaidEvent, HoldLapsedEvent};
use harbor_shared::{Clock, SystemClock};
use std::collections::HashMap;
use uuid::Uuid;

/// Tracks held bookings for the current session and releases lapsed holds.
/// Persistence belongs to the caller.
pub struct HoldLedger<C = SystemClock> {
    bookings: HashMap<Uuid, CruiseBooking>,
    holds: HoldCalculator<C>,
}

impl<C: Clock> HoldLedger<C> {
    pub fn new(clock: C) -> Self {
        Self {
            bookings: HashMap::new(),
            holds: HoldCalculator::with_clock(clock),
        }
    }

    pub fn insert(&mut self, booking: CruiseBooking) -> BookingHeldEvent {
        let event = BookingHeldEvent {
            booking_id: booking.id,
            agent_id: booking.agent_id.clone(),
            item_id: booking.item_id.clone(),
            passenger_count: booking.passengers.len(),
            hold_expiry: booking.hold_expiry.timestamp(),
            timestamp: self.holds.now().timestamp(),
        };
        self.bookings.insert(booking.id, booking);
        event
    }

    pub fn get(&self, booking_id: &Uuid) -> Option<&CruiseBooking> {
        self.bookings.get(booking_id)
    }

    /// Whole hours left before the hold lapses.
    pub fn remaining_hours(&self, booking_id: &Uuid) -> Option<i64> {
        self.bookings
            .get(booking_id)
            .map(|b| self.holds.remaining_hold_hours(b.hold_expiry))
    }

    /// Pay for a held booking. Fails once the hold window has passed, even if
    /// [`HoldLedger::lapse_expired`] has not run yet.
    pub fn record_payment(&mut self, booking_id: &Uuid) -> Result<BookingPaidEvent, LedgerError> {
        let timestamp = self.holds.now().timestamp();
        let booking = self
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| LedgerError::NotFound(booking_id.to_string()))?;

        if !booking.is_awaiting_payment() {
            return Err(LedgerError::NotAwaitingPayment(booking_id.to_string()));
        }
        if !self.holds.is_hold_valid(booking.hold_expiry) {
            return Err(LedgerError::HoldLapsed(booking_id.to_string()));
        }

        booking.mark_paid();
        tracing::info!(booking_id = %booking_id, "Held booking paid");

        Ok(BookingPaidEvent {
            booking_id: booking.id,
            agent_id: booking.agent_id.clone(),
            total_amount: booking.total_amount,
            timestamp,
        })
    }

    /// Cancel every unpaid booking whose hold has passed.
    pub fn lapse_expired(&mut self) -> Vec<HoldLapsedEvent> {
        let timestamp = self.holds.now().timestamp();
        let holds = &self.holds;

        let mut lapsed = Vec::new();
        for booking in self.bookings.values_mut() {
            if booking.is_awaiting_payment() && !holds.is_hold_valid(booking.hold_expiry) {
                booking.lapse();
                lapsed.push(HoldLapsedEvent {
                    booking_id: booking.id,
                    item_id: booking.item_id.clone(),
                    hold_expiry: booking.hold_expiry.timestamp(),
                    timestamp,
                });
            }
        }

        if !lapsed.is_empty() {
            tracing::info!(count = lapsed.len(), "Released lapsed holds");
        }
        lapsed
    }

    /// Unpaid bookings still inside their hold window.
    pub fn active_count(&self) -> usize {
        self.bookings
            .values()
            .filter(|b| b.is_awaiting_payment() && self.holds.is_hold_valid(b.hold_expiry))
            .count()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

impl Default for HoldLedger<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Hold has lapsed for booking: {0}")]
    HoldLapsed(String),

    #[error("Booking is not awaiting payment: {0}")]
    NotAwaitingPayment(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingStatus, BookingType, PaymentStatus};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use harbor_shared::ManualClock;
    use std::sync::Arc;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 2, 8, 0, 0).unwrap()
    }

    fn held(hold_days: i64) -> CruiseBooking {
        CruiseBooking {
            id: Uuid::new_v4(),
            booking_type: BookingType::Cruise,
            item_id: "cr-kochi-10".into(),
            item_name: "Kochi Backwaters".into(),
            agent_id: "agent-2".into(),
            passengers: vec![],
            total_amount: 56000.0,
            payment_status: PaymentStatus::Pending,
            status: BookingStatus::Pending,
            booking_date: now(),
            travel_date: "2025-07-01".into(),
            departure_date: "2025-07-01".into(),
            cabin_category: "Interior".into(),
            cabin_number: Some("4021".into()),
            duration_nights: 10,
            hold_period_days: hold_days as u32,
            hold_expiry: now() + Duration::days(hold_days),
        }
    }

    #[test]
    fn test_payment_inside_hold_confirms() {
        let clock = Arc::new(ManualClock::new(now()));
        let mut ledger = HoldLedger::new(clock.clone());
        let booking = held(2);
        let id = booking.id;

        let event = ledger.insert(booking);
        assert_eq!(event.booking_id, id);
        assert_eq!(ledger.remaining_hours(&id), Some(48));
        assert_eq!(ledger.active_count(), 1);

        clock.advance(Duration::hours(30));
        let paid = ledger.record_payment(&id).unwrap();
        assert_eq!(paid.total_amount, 56000.0);

        let stored = ledger.get(&id).unwrap();
        assert_eq!(stored.status, BookingStatus::Confirmed);
        assert_eq!(stored.payment_status, PaymentStatus::Paid);
        assert_eq!(ledger.active_count(), 0);

        assert_eq!(
            ledger.record_payment(&id),
            Err(LedgerError::NotAwaitingPayment(id.to_string()))
        );
    }

    #[test]
    fn test_lapsed_holds_are_released() {
        let clock = Arc::new(ManualClock::new(now()));
        let mut ledger = HoldLedger::new(clock.clone());
        let short = held(1);
        let long = held(3);
        let (short_id, long_id) = (short.id, long.id);
        ledger.insert(short);
        ledger.insert(long);

        assert!(ledger.lapse_expired().is_empty());

        clock.advance(Duration::days(1));
        assert_eq!(
            ledger.record_payment(&short_id),
            Err(LedgerError::HoldLapsed(short_id.to_string()))
        );

        let lapsed = ledger.lapse_expired();
        assert_eq!(lapsed.len(), 1);
        assert_eq!(lapsed[0].booking_id, short_id);
        assert_eq!(ledger.get(&short_id).unwrap().status, BookingStatus::Cancelled);
        assert_eq!(ledger.get(&long_id).unwrap().status, BookingStatus::Pending);
        assert_eq!(ledger.remaining_hours(&short_id), Some(0));

        // Already cancelled, nothing more to release.
        assert!(ledger.lapse_expired().is_empty());
        assert_eq!(ledger.active_count(), 1);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_unknown_booking() {
        let mut ledger = HoldLedger::new(ManualClock::new(now()));
        let id = Uuid::new_v4();
        assert!(ledger.is_empty());
        assert_eq!(ledger.remaining_hours(&id), None);
        assert_eq!(ledger.record_payment(&id), Err(LedgerError::NotFound(id.to_string())));
    }
}
