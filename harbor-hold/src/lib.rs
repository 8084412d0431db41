pub mod calculator;
pub mod policy;

pub use calculator::{HoldCalculator, HoldWindow};
pub use policy::{HoldPolicy, HoldTier, PolicyError, STANDARD_HOLD_TIERS};
