use serde::{Deserialize, Serialize};

/// One bucket of the hold policy: cruises of up to `max_nights` nights are held
/// for `hold_days` days. `None` is the unbounded catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldTier {
    #[serde(default)]
    pub max_nights: Option<i64>,
    pub hold_days: u32,
}

/// The agency's hold policy. Everything that needs a hold length reads it from here.
pub const STANDARD_HOLD_TIERS: [HoldTier; 3] = [
    HoldTier { max_nights: Some(7), hold_days: 1 },
    HoldTier { max_nights: Some(15), hold_days: 2 },
    HoldTier { max_nights: None, hold_days: 3 },
];

/// Returned when no tier matches. A well-formed table always ends unbounded,
/// so this is only reached if that guarantee is broken.
pub(crate) const FALLBACK_HOLD_DAYS: u32 = 3;

/// Ordered hold tiers, scanned in ascending threshold order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoldPolicy {
    tiers: Vec<HoldTier>,
}

impl HoldPolicy {
    /// Build a policy from configured tiers, rejecting tables that are empty,
    /// out of order, or missing the unbounded catch-all.
    pub fn new(tiers: Vec<HoldTier>) -> Result<Self, PolicyError> {
        let (last, bounded) = tiers.split_last().ok_or(PolicyError::Empty)?;

        if last.max_nights.is_some() {
            return Err(PolicyError::MissingCatchAll);
        }

        let mut previous: Option<i64> = None;
        for (index, tier) in bounded.iter().enumerate() {
            let max = tier.max_nights.ok_or(PolicyError::UnboundedTierNotLast(index))?;
            if let Some(prev) = previous {
                if max <= prev {
                    return Err(PolicyError::NotAscending { previous: prev, next: max });
                }
            }
            previous = Some(max);
        }

        if let Some(index) = tiers.iter().position(|t| t.hold_days == 0) {
            return Err(PolicyError::ZeroHoldDays(index));
        }

        Ok(Self { tiers })
    }

    pub fn tiers(&self) -> &[HoldTier] {
        &self.tiers
    }

    /// Hold days for a cruise of `nights` nights.
    ///
    /// Non-positive durations are not rejected here; they simply land in the
    /// first tier.
    pub fn hold_days_for(&self, nights: i64) -> u32 {
        self.tiers
            .iter()
            .find(|tier| tier.max_nights.map_or(true, |max| nights <= max))
            .map(|tier| tier.hold_days)
            .unwrap_or(FALLBACK_HOLD_DAYS)
    }
}

impl Default for HoldPolicy {
    fn default() -> Self {
        Self {
            tiers: STANDARD_HOLD_TIERS.to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PolicyError {
    #[error("Hold policy has no tiers")]
    Empty,

    #[error("Hold policy must end with an unbounded tier")]
    MissingCatchAll,

    #[error("Unbounded hold tier at position {0} must be the last tier")]
    UnboundedTierNotLast(usize),

    #[error("Hold tiers must be strictly ascending: {next} nights follows {previous}")]
    NotAscending { previous: i64, next: i64 },

    #[error("Hold tier at position {0} holds for zero days")]
    ZeroHoldDays(usize),
}
