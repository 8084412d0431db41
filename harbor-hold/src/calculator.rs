use crate::policy::HoldPolicy;
use chrono::{DateTime, Days, Utc};
use harbor_shared::dates::ceil_div;
use harbor_shared::{Clock, SystemClock};
use serde::{Deserialize, Serialize};

const HOUR_MILLIS: i64 = 60 * 60 * 1000;

/// The reservation window a tentative booking gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldWindow {
    pub hold_days: u32,
    pub booked_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// Derives hold windows from cruise duration and answers expiry queries
/// against the injected clock.
#[derive(Debug, Clone, Default)]
pub struct HoldCalculator<C = SystemClock> {
    policy: HoldPolicy,
    clock: C,
}

impl<C: Clock> HoldCalculator<C> {
    pub fn new(policy: HoldPolicy, clock: C) -> Self {
        Self { policy, clock }
    }

    pub fn with_clock(clock: C) -> Self {
        Self::new(HoldPolicy::default(), clock)
    }

    pub fn policy(&self) -> &HoldPolicy {
        &self.policy
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn calculate_hold_period(&self, cruise_duration_nights: i64) -> u32 {
        self.policy.hold_days_for(cruise_duration_nights)
    }

    /// `booking_date` plus the hold period in whole calendar days. Time of day is kept.
    pub fn calculate_hold_expiry(
        &self,
        booking_date: DateTime<Utc>,
        cruise_duration_nights: i64,
    ) -> DateTime<Utc> {
        let days = Days::new(u64::from(self.calculate_hold_period(cruise_duration_nights)));
        booking_date
            .checked_add_days(days)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    pub fn open_window(&self, booking_date: DateTime<Utc>, cruise_duration_nights: i64) -> HoldWindow {
        HoldWindow {
            hold_days: self.calculate_hold_period(cruise_duration_nights),
            booked_at: booking_date,
            expires_at: self.calculate_hold_expiry(booking_date, cruise_duration_nights),
        }
    }

    /// Reads the clock on every call.
    pub fn is_hold_valid(&self, hold_expiry: DateTime<Utc>) -> bool {
        self.clock.now() < hold_expiry
    }

    /// Whole hours left on the hold, rounded up. Zero once it has lapsed.
    pub fn remaining_hold_hours(&self, hold_expiry: DateTime<Utc>) -> i64 {
        let diff = (hold_expiry - self.clock.now()).num_milliseconds();
        ceil_div(diff, HOUR_MILLIS).max(0)
    }

    pub fn format_hold_period(&self, cruise_duration_nights: i64) -> String {
        let days = self.calculate_hold_period(cruise_duration_nights);
        format!("{} day{}", days, if days > 1 { "s" } else { "" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Timelike};
    use harbor_shared::ManualClock;
    use std::sync::Arc;

    fn booked_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 14, 25, 30).unwrap()
    }

    fn calculator() -> (Arc<ManualClock>, HoldCalculator<Arc<ManualClock>>) {
        let clock = Arc::new(ManualClock::new(booked_at()));
        (clock.clone(), HoldCalculator::with_clock(clock))
    }

    #[test]
    fn test_hold_period_by_duration() {
        let (_, calc) = calculator();
        assert_eq!(calc.calculate_hold_period(7), 1);
        assert_eq!(calc.calculate_hold_period(8), 2);
        assert_eq!(calc.calculate_hold_period(15), 2);
        assert_eq!(calc.calculate_hold_period(16), 3);
        assert_eq!(calc.calculate_hold_period(30), 3);
    }

    #[test]
    fn test_expiry_adds_calendar_days_and_keeps_time() {
        let (_, calc) = calculator();
        let expiry = calc.calculate_hold_expiry(booked_at(), 7);

        assert_eq!(expiry, booked_at() + Duration::days(1));
        assert_eq!(expiry.hour(), 14);
        assert_eq!(expiry.minute(), 25);
        assert_eq!(expiry.second(), 30);

        assert_eq!(
            calc.calculate_hold_expiry(booked_at(), 21),
            Utc.with_ymd_and_hms(2025, 3, 13, 14, 25, 30).unwrap()
        );
    }

    #[test]
    fn test_expiry_crosses_month_end() {
        let (_, calc) = calculator();
        let late_feb = Utc.with_ymd_and_hms(2025, 2, 27, 23, 0, 0).unwrap();
        assert_eq!(
            calc.calculate_hold_expiry(late_feb, 10),
            Utc.with_ymd_and_hms(2025, 3, 1, 23, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_hold_valid_until_expiry_passes() {
        let (clock, calc) = calculator();
        let expiry = calc.calculate_hold_expiry(booked_at(), 7);

        assert!(calc.is_hold_valid(expiry));

        clock.set(expiry - Duration::milliseconds(1));
        assert!(calc.is_hold_valid(expiry));

        clock.set(expiry);
        assert!(!calc.is_hold_valid(expiry));

        clock.advance(Duration::minutes(1));
        assert!(!calc.is_hold_valid(expiry));
    }

    #[test]
    fn test_remaining_hours_decrease_and_clamp() {
        let (clock, calc) = calculator();
        let expiry = calc.calculate_hold_expiry(booked_at(), 10);

        assert_eq!(calc.remaining_hold_hours(expiry), 48);

        let mut last = calc.remaining_hold_hours(expiry);
        for _ in 0..60 {
            clock.advance(Duration::minutes(55));
            let now = calc.remaining_hold_hours(expiry);
            assert!(now <= last);
            assert!(now >= 0);
            last = now;
        }
        assert_eq!(last, 0);

        clock.set(expiry + Duration::days(3));
        assert_eq!(calc.remaining_hold_hours(expiry), 0);
    }

    #[test]
    fn test_partial_hours_round_up() {
        let (clock, calc) = calculator();
        let expiry = booked_at() + Duration::hours(5);

        clock.advance(Duration::minutes(1));
        assert_eq!(calc.remaining_hold_hours(expiry), 5);

        clock.set(expiry - Duration::seconds(1));
        assert_eq!(calc.remaining_hold_hours(expiry), 1);
    }

    #[test]
    fn test_open_window() {
        let (_, calc) = calculator();
        let window = calc.open_window(booked_at(), 12);

        assert_eq!(window.hold_days, 2);
        assert_eq!(window.booked_at, booked_at());
        assert_eq!(window.expires_at, booked_at() + Duration::days(2));
    }

    #[test]
    fn test_format_hold_period() {
        let (_, calc) = calculator();
        assert_eq!(calc.format_hold_period(5), "1 day");
        assert_eq!(calc.format_hold_period(10), "2 days");
        assert_eq!(calc.format_hold_period(40), "3 days");
    }
}
