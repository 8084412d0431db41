use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Parse a form-supplied date into an instant.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM[:SS]` (taken as UTC, the
/// shape a `datetime-local` input submits) and plain `YYYY-MM-DD` dates (UTC
/// midnight). Returns `None` for blank or unrecognised input.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// `ceil(numerator / denominator)` for a positive denominator.
pub fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    let quotient = numerator / denominator;
    if numerator % denominator > 0 {
        quotient + 1
    } else {
        quotient
    }
}
