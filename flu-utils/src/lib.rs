//! Shared utility functions for the flu season crates.

/// Date utility functions
pub mod dates {
    use crate::error::InvalidDateError;
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

    /// Milliseconds in one day.
    pub const DAY_MILLIS: i64 = 86_400_000;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse an ISO-8601 date or timestamp into its UTC calendar date.
    ///
    /// Accepts "YYYY-MM-DD", a naive "YYYY-MM-DDTHH:MM:SS[.fff]" (read as
    /// UTC), or an RFC 3339 timestamp with an offset, which is shifted to UTC
    /// before the date is taken.
    pub fn parse_iso_date(s: &str) -> Result<NaiveDate, InvalidDateError> {
        let trimmed = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(stamp.with_timezone(&Utc).date_naive());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(naive.date());
        }
        Err(InvalidDateError(s.to_string()))
    }

    /// Milliseconds since the Unix epoch at UTC midnight of `date`.
    pub fn utc_midnight_millis(date: &NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_iso_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_iso_date_plain() {
            let parsed = parse_iso_date("2023-10-01").unwrap();
            assert_eq!(parsed, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        }

        #[test]
        fn test_parse_iso_date_naive_timestamp() {
            let parsed = parse_iso_date("2023-10-01T23:59:59.500").unwrap();
            assert_eq!(parsed, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        }

        #[test]
        fn test_parse_iso_date_offset_shifts_to_utc() {
            // 02:00 at +05:00 is 21:00 UTC on the previous day
            let parsed = parse_iso_date("2023-10-01T02:00:00+05:00").unwrap();
            assert_eq!(parsed, NaiveDate::from_ymd_opt(2023, 9, 30).unwrap());

            let parsed = parse_iso_date("2023-09-30T22:00:00-05:00").unwrap();
            assert_eq!(parsed, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        }

        #[test]
        fn test_parse_iso_date_rejects_garbage() {
            assert!(parse_iso_date("").is_err());
            assert!(parse_iso_date("not a date").is_err());
            assert!(parse_iso_date("2023-02-30").is_err());
            assert!(parse_iso_date("2023-13-01").is_err());
        }

        #[test]
        fn test_utc_midnight_millis() {
            let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
            assert_eq!(utc_midnight_millis(&epoch), 0);

            let next = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
            assert_eq!(utc_midnight_millis(&next), DAY_MILLIS);

            let before = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
            assert_eq!(utc_midnight_millis(&before), -DAY_MILLIS);
        }
    }
}

/// Number formatting for axis labels.
pub mod format {
    const SI_PREFIXES: [&str; 17] = [
        "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
    ];

    /// Format a value with an SI prefix and `precision` significant digits,
    /// the way d3-format's `.{precision}s` does (e.g. `1500` -> `"1.5k"`,
    /// `0` -> `"0.0"` at precision 2).
    pub fn si_format(value: f64, precision: usize) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let precision = precision.max(1);
        let sign = if value < 0.0 { "\u{2212}" } else { "" };
        let x = value.abs();

        let (coefficient, exponent) = decimal_parts(x, precision);
        let prefix_exponent = exponent.div_euclid(3).clamp(-8, 8) * 3;
        let i = exponent - prefix_exponent + 1;
        let n = coefficient.len() as i32;

        let digits = if i == n {
            coefficient
        } else if i > n {
            format!("{}{}", coefficient, "0".repeat((i - n) as usize))
        } else if i > 0 {
            let (int_part, frac_part) = coefficient.split_at(i as usize);
            format!("{int_part}.{frac_part}")
        } else {
            let shortened = (precision as i32 + i - 1).max(0) as usize;
            let (small, _) = decimal_parts(x, shortened);
            format!("0.{}{}", "0".repeat((-i) as usize), small)
        };

        let prefix = SI_PREFIXES[(8 + prefix_exponent / 3) as usize];
        format!("{sign}{digits}{prefix}")
    }

    /// Extra digits printed past the requested precision so ties can be
    /// rounded half-up, as JavaScript's `toExponential` does, rather than
    /// half-to-even.
    const GUARD_DIGITS: usize = 24;

    /// Split `x` into its significant digits (no decimal point) and decimal
    /// exponent, rounded half-up to `precision` digits. A precision of 0
    /// keeps the shortest exact representation.
    fn decimal_parts(x: f64, precision: usize) -> (String, i32) {
        if precision == 0 {
            let (digits, exponent) = scientific_digits(&format!("{:e}", x));
            return (digits.iter().map(|&d| d as char).collect(), exponent);
        }

        let (digits, mut exponent) =
            scientific_digits(&format!("{:.*e}", precision - 1 + GUARD_DIGITS, x));
        let mut kept = digits[..precision].to_vec();
        if digits[precision] >= b'5' {
            let mut carry = true;
            for digit in kept.iter_mut().rev() {
                if *digit == b'9' {
                    *digit = b'0';
                } else {
                    *digit += 1;
                    carry = false;
                    break;
                }
            }
            if carry {
                kept.insert(0, b'1');
                kept.pop();
                exponent += 1;
            }
        }
        (kept.iter().map(|&d| d as char).collect(), exponent)
    }

    fn scientific_digits(scientific: &str) -> (Vec<u8>, i32) {
        let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific, "0"));
        let digits = mantissa.bytes().filter(u8::is_ascii_digit).collect();
        (digits, exponent.parse().unwrap_or(0))
    }

    #[cfg(test)]
    mod tests {
        use super::si_format;

        #[test]
        fn test_si_format_matches_axis_labels() {
            assert_eq!(si_format(0.0, 2), "0.0");
            assert_eq!(si_format(5.0, 2), "5.0");
            assert_eq!(si_format(10.0, 2), "10");
            assert_eq!(si_format(250.0, 2), "250");
            assert_eq!(si_format(500.0, 2), "500");
            assert_eq!(si_format(1000.0, 2), "1.0k");
            assert_eq!(si_format(1500.0, 2), "1.5k");
            assert_eq!(si_format(20000.0, 2), "20k");
            assert_eq!(si_format(2_500_000.0, 2), "2.5M");
        }

        #[test]
        fn test_si_format_small_values() {
            assert_eq!(si_format(0.2, 2), "200m");
            assert_eq!(si_format(0.05, 2), "50m");
        }

        #[test]
        fn test_si_format_rounds_ties_up() {
            assert_eq!(si_format(125.0, 2), "130");
            assert_eq!(si_format(1250.0, 2), "1.3k");
            assert_eq!(si_format(0.125, 2), "130m");
            assert_eq!(si_format(2.5, 1), "3");
            assert_eq!(si_format(995.0, 2), "1.0k");
            assert_eq!(si_format(124.0, 2), "120");
        }

        #[test]
        fn test_si_format_negative_and_non_finite() {
            assert_eq!(si_format(-1500.0, 2), "\u{2212}1.5k");
            assert_eq!(si_format(f64::NAN, 2), "NaN");
        }
    }
}

/// Error types
pub mod error {
    use std::fmt;

    /// A date string that could not be parsed into a calendar date.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct InvalidDateError(pub String);

    impl fmt::Display for InvalidDateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "invalid date: {:?}", self.0)
        }
    }

    impl std::error::Error for InvalidDateError {}
}
