use serde::Serialize;

/// Fare multiplier applied to a sailing's per-person price for one cabin category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CabinRate {
    pub category: &'static str,
    pub multiplier: f64,
}

/// Cabin categories the agency sells, cheapest first.
pub const STANDARD_CABIN_RATES: [CabinRate; 5] = [
    CabinRate { category: "Interior", multiplier: 1.0 },
    CabinRate { category: "Ocean View", multiplier: 1.3 },
    CabinRate { category: "Balcony", multiplier: 1.6 },
    CabinRate { category: "Suite", multiplier: 2.2 },
    CabinRate { category: "Penthouse", multiplier: 3.0 },
];

/// Multiplier for `category`, matched exactly. `None` for categories not on sale.
pub fn cabin_multiplier(category: &str) -> Option<f64> {
    STANDARD_CABIN_RATES
        .iter()
        .find(|rate| rate.category == category)
        .map(|rate| rate.multiplier)
}

/// Total fare: per-person price times the cabin multiplier times the head count.
pub fn quote_total(price_per_person: f64, category: &str, passengers: usize) -> Option<f64> {
    cabin_multiplier(category).map(|multiplier| price_per_person * multiplier * passengers as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cabin_multipliers() {
        assert_eq!(cabin_multiplier("Interior"), Some(1.0));
        assert_eq!(cabin_multiplier("Ocean View"), Some(1.3));
        assert_eq!(cabin_multiplier("Balcony"), Some(1.6));
        assert_eq!(cabin_multiplier("Suite"), Some(2.2));
        assert_eq!(cabin_multiplier("Penthouse"), Some(3.0));
    }

    #[test]
    fn test_unknown_category_has_no_rate() {
        assert_eq!(cabin_multiplier("Owner's Loft"), None);
        assert_eq!(cabin_multiplier("suite"), None);
        assert_eq!(quote_total(40000.0, "", 2), None);
    }

    #[test]
    fn test_quote_scales_with_passenger_count() {
        assert_eq!(quote_total(40000.0, "Interior", 1), Some(40000.0));
        assert_eq!(quote_total(40000.0, "Interior", 3), Some(120000.0));
        assert_eq!(quote_total(50000.0, "Balcony", 2), Some(160000.0));
        assert_eq!(quote_total(50000.0, "Penthouse", 4), Some(600000.0));
        assert_eq!(quote_total(50000.0, "Suite", 0), Some(0.0));
    }
}
