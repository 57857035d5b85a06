//! Locale-independent numeric parsing that yields `None` instead of an error.
//!
//! Benchmark reports are written with `.` as the decimal point and no digit
//! grouping, so every implementation here accepts exactly that shape:
//! an optional sign, ASCII digits, and at most one `.`.

use rust_decimal::Decimal;
use std::str::FromStr;

/// A numeric kind that can be parsed from plain report text
pub trait ParseNullable: Sized {
    /// Parse `s`, returning `None` if it is not a plain number
    fn parse_nullable(s: &str) -> Option<Self>;
}

/// Extension for choosing the numeric kind at the call site
///
/// ```ignore
/// let mean = "907.4".parse_nullable::<Decimal>();
/// ```
pub trait StrParseExt {
    fn parse_nullable<T: ParseNullable>(&self) -> Option<T>;
}

impl StrParseExt for str {
    fn parse_nullable<T: ParseNullable>(&self) -> Option<T> {
        T::parse_nullable(self)
    }
}

impl ParseNullable for Decimal {
    fn parse_nullable(s: &str) -> Option<Self> {
        if !is_plain_number(s, true) {
            return None;
        }
        Decimal::from_str(s.strip_prefix('+').unwrap_or(s)).ok()
    }
}

impl ParseNullable for f64 {
    fn parse_nullable(s: &str) -> Option<Self> {
        if !is_plain_number(s, true) {
            return None;
        }
        s.parse().ok()
    }
}

impl ParseNullable for i64 {
    fn parse_nullable(s: &str) -> Option<Self> {
        if !is_plain_number(s, false) {
            return None;
        }
        s.parse().ok()
    }
}

/// Check that `s` is `[+-]digits[.digits]` with at least one digit
fn is_plain_number(s: &str, allow_fraction: bool) -> bool {
    let unsigned = s.strip_prefix(['+', '-']).unwrap_or(s);

    let mut digits = 0usize;
    let mut seen_point = false;
    for c in unsigned.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' if allow_fraction && !seen_point => seen_point = true,
            _ => return false,
        }
    }

    digits > 0
}
