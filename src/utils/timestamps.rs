use chrono::{DateTime, Datelike, Utc};

const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Convert fractional epoch seconds to a UTC datetime (microsecond precision).
///
/// Returns `None` for non-finite values and for instants outside years 1..=9999,
/// which cannot be rendered as a four-digit ISO-8601 year.
pub fn epoch_to_datetime(secs: f64) -> Option<DateTime<Utc>> {
    if !secs.is_finite() {
        return None;
    }
    let micros = (secs * MICROS_PER_SECOND).round();
    if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64).filter(|dt| (1..=9999).contains(&dt.year()))
}

/// ISO-8601 with an explicit `+00:00` offset; fractional seconds only when non-zero
///
/// `2023-11-14T22:13:20+00:00`, `2023-11-14T22:13:20.500000+00:00`
pub fn format_iso(dt: &DateTime<Utc>) -> String {
    if dt.timestamp_subsec_micros() == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S+00:00").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
    }
}

/// Epoch seconds straight to an ISO-8601 string
pub fn epoch_to_iso(secs: f64) -> Option<String> {
    epoch_to_datetime(secs).map(|dt| format_iso(&dt))
}

/// UTC calendar day as `YYYY-MM-DD`
pub fn utc_day(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}
