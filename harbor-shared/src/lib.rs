pub mod clock;
pub mod dates;
pub mod models;
pub mod pii;

pub use clock::{Clock, ManualClock, SystemClock};
pub use pii::Masked;
