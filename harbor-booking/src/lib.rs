pub mod contact;
pub mod gate;
pub mod ledger;
pub mod models;
pub mod pricing;

pub use contact::{ContactDetails, ContactViolation};
pub use gate::{BookingDraft, BookingError, BookingGate, PassengerCheck, SubmissionCheck, SubmitRequest};
pub use ledger::{HoldLedger, LedgerError};
pub use models::{BookingStatus, BookingType, CruiseBooking, CruiseSailing, Passenger, PaymentStatus};
pub use pricing::{cabin_multiplier, quote_total, CabinRate, STANDARD_CABIN_RATES};
