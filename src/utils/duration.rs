use std::time::Duration;

use crate::error::DurationError;

/// Run length used when the trigger omits `duration` or sends one we can't use.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(1);

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

// Fraction digits past this add nothing at nanosecond resolution.
const MAX_FRACTION_DIGITS: u32 = 18;

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parses a duration such as `"300ms"`, `"1.5h"` or `"2h45m"`.
///
/// Each component is a decimal number with an optional fraction followed by
/// a unit (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`). A bare `"0"` is the only
/// unit-less input accepted. Negative durations are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let mut s = input;
    if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    } else if s.starts_with('-') {
        return Err(invalid());
    }

    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut total: u128 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid());
        }

        let int_len = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
        let (int_part, rest) = s.split_at(int_len);
        s = rest;

        let mut frac_part = "";
        if let Some(rest) = s.strip_prefix('.') {
            let frac_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            frac_part = &rest[..frac_len];
            s = &rest[frac_len..];
        }

        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_len = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        let (unit, rest) = s.split_at(unit_len);
        s = rest;

        if unit.is_empty() {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let whole: u128 = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse()
                .map_err(|_| DurationError::Overflow(input.to_string()))?
        };

        let digits = &frac_part[..frac_part.len().min(MAX_FRACTION_DIGITS as usize)];
        let fraction = if digits.is_empty() {
            0
        } else {
            let numerator: u128 = digits.parse().map_err(|_| invalid())?;
            numerator * scale / 10u128.pow(digits.len() as u32)
        };

        total = whole
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction))
            .and_then(|v| v.checked_add(total))
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
    }

    let nanos = u64::try_from(total).map_err(|_| DurationError::Overflow(input.to_string()))?;
    Ok(Duration::from_nanos(nanos))
}

/// Lenient form used by the trigger: anything missing, malformed or
/// non-positive becomes [`DEFAULT_DURATION`].
pub fn duration_or_default(raw: Option<&str>) -> Duration {
    match raw.map(parse_duration) {
        Some(Ok(d)) if !d.is_zero() => d,
        _ => DEFAULT_DURATION,
    }
}
