// Copyright (c) 2026 - present gotest-report contributors
// SPDX-License-Identifier: MIT

//! Go duration text
//!
//! `go test` prints durations in Go's `time.Duration` syntax (`0.012s`,
//! `1m2.5s`, `350µs`). Test result lines sometimes carry a bare number, which
//! is read as seconds.

/// Decimal places kept for per-test durations
pub const TEST_PRECISION: u32 = 2;

/// Decimal places kept for package durations
pub const PACKAGE_PRECISION: u32 = 3;

/// Parse Go duration text into seconds rounded to `precision` decimals
///
/// Bare numbers are retried as seconds. Anything unreadable or too large to
/// be finite yields `0.0`.
#[must_use]
pub fn parse_seconds(raw: &str, precision: u32) -> f64 {
    let raw = raw.trim();
    parse_go_duration(raw)
        .or_else(|| parse_go_duration(&format!("{raw}s")))
        .map(|seconds| round_to(seconds, precision))
        .filter(|seconds| seconds.is_finite())
        .unwrap_or(0.0)
}

/// Round half away from zero to `precision` decimals
#[must_use]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision.min(15) as i32);
    (value * factor).round() / factor
}

/// Parse a Go duration string (`"1h2m3.5s"`, `"-1.5ms"`) into seconds
#[must_use]
pub fn parse_go_duration(text: &str) -> Option<f64> {
    let (sign, mut rest) = match text.as_bytes().first() {
        Some(b'-') => (-1.0, &text[1..]),
        Some(b'+') => (1.0, &text[1..]),
        _ => (1.0, text),
    };

    if rest == "0" {
        return Some(0.0);
    }
    if rest.is_empty() {
        return None;
    }

    let mut total = 0.0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        if number.is_empty() || number == "." {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = unit_scale(&rest[..unit_len])?;
        rest = &rest[unit_len..];

        total += value * scale;
    }

    Some(sign * total)
}

fn unit_scale(unit: &str) -> Option<f64> {
    match unit {
        "ns" => Some(1e-9),
        "us" | "µs" | "μs" => Some(1e-6),
        "ms" => Some(1e-3),
        "s" => Some(1.0),
        "m" => Some(60.0),
        "h" => Some(3600.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_parse_go_duration_units() {
        assert_eq!(parse_go_duration("0.012s"), Some(0.012));
        assert!(parse_go_duration("1.5ms").is_some_and(|s| (s - 0.0015).abs() < 1e-12));
        assert_eq!(parse_go_duration("2m3s"), Some(123.0));
        assert_eq!(parse_go_duration("1h"), Some(3600.0));
        assert_eq!(parse_go_duration("0"), Some(0.0));
        assert_eq!(parse_go_duration("-2s"), Some(-2.0));
        assert!(parse_go_duration("350µs").is_some_and(|s| (s - 0.00035).abs() < 1e-12));
    }

    #[test]
    fn test_parse_go_duration_rejects_garbage() {
        assert_eq!(parse_go_duration(""), None);
        assert_eq!(parse_go_duration("1.5"), None);
        assert_eq!(parse_go_duration("s"), None);
        assert_eq!(parse_go_duration("12parsecs"), None);
        assert_eq!(parse_go_duration("(cached)"), None);
    }

    #[test]
    fn test_parse_seconds_retries_bare_numbers() {
        assert_eq!(parse_seconds("0.01", TEST_PRECISION), 0.01);
        assert_eq!(parse_seconds("3", TEST_PRECISION), 3.0);
    }

    #[test]
    fn test_parse_seconds_rounds() {
        assert_eq!(parse_seconds("0.0126s", PACKAGE_PRECISION), 0.013);
        assert_eq!(parse_seconds("0.0126s", TEST_PRECISION), 0.01);
        assert_eq!(parse_seconds("1.005s", 0), 1.0);
        assert_eq!(parse_seconds("1500ms", TEST_PRECISION), 1.5);
    }

    #[test]
    fn test_parse_seconds_unreadable_is_zero() {
        assert_eq!(parse_seconds("(cached)", PACKAGE_PRECISION), 0.0);
        assert_eq!(parse_seconds("", PACKAGE_PRECISION), 0.0);
    }

    #[test]
    fn test_parse_seconds_overflow_is_zero() {
        let huge = format!("{}s", "9".repeat(400));
        assert_eq!(parse_seconds(&huge, PACKAGE_PRECISION), 0.0);
        assert_eq!(parse_seconds(&"9".repeat(400), TEST_PRECISION), 0.0);
        assert_eq!(parse_seconds("2000000h", PACKAGE_PRECISION), 7_200_000_000.0);
    }
}
