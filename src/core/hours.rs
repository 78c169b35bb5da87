//! Hours parsing: HH:MM (base-60 minutes) and HH.MM (fraction digits read as minutes).

use crate::errors::{AppError, AppResult};

/// Convert an hours string into decimal hours.
///
/// - `"42:30"` → 42.5
/// - `"37.25"` → 37 + 25/60 (the fraction digits are a minute count, not 0.25 h)
/// - `"37.3"`  → 37 + 30/60
///
/// Minutes are not range checked: `"1:75"` and `"1.75"` both give 2.25.
pub fn parse_hours(input: &str) -> AppResult<f64> {
    let s = input.trim();
    let invalid = || AppError::Parse(input.to_string());

    let (hours, minutes) = if s.contains(':') {
        let mut parts = s.split(':');
        let (h, m) = match (parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(m), None) => (h, m),
            _ => return Err(invalid()),
        };
        (
            parse_digits(h).ok_or_else(invalid)?,
            parse_digits(m).ok_or_else(invalid)? as f64,
        )
    } else {
        let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let hours = if int_part.is_empty() {
            0
        } else {
            parse_digits(int_part).ok_or_else(invalid)?
        };
        let minutes = if frac_part.is_empty() {
            0
        } else {
            fraction_to_minutes(frac_part).ok_or_else(invalid)?
        };
        (hours, minutes as f64)
    };

    Ok(hours as f64 + minutes / 60.0)
}

/// Unsigned integer made only of ASCII digits (no sign, no blanks).
fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Read fraction digits as a base-100 count: the first two digits (right
/// padded with 0) are the minutes, the third digit rounds half-up.
fn fraction_to_minutes(frac: &str) -> Option<u64> {
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits: Vec<u64> = frac.bytes().map(|b| u64::from(b - b'0')).collect();
    let tens = digits.first().copied().unwrap_or(0);
    let units = digits.get(1).copied().unwrap_or(0);
    let round_up = digits.get(2).is_some_and(|d| *d >= 5);

    Some(tens * 10 + units + u64::from(round_up))
}
