//! Unit normalization for report values.
//!
//! Converts text such as `907.4 ms` or `5.88 GB` into a magnitude in the
//! canonical base unit (nanoseconds for time, bytes for memory) so that
//! values reported with different units compare directly.

use rust_decimal::Decimal;

use super::parse::{ParseNullable, StrParseExt};
use crate::utils::config::UNIT_MULTIPLIERS;

/// Convert a report value to its base-unit magnitude
///
/// # Arguments
/// * `value` - Raw cell text, `None` when the cell does not exist
///
/// # Returns
/// * `None` for absent, blank or unparseable input
/// * the number itself when there is no unit
/// * the number times the unit multiplier for `<number> <unit>`
///
/// # Example
/// ```ignore
/// assert_eq!(convert_value(Some("907.4 ms")), Some(Decimal::from(907_400_000)));
/// ```
pub fn convert_value(value: Option<&str>) -> Option<Decimal> {
    convert_value_as::<Decimal>(value)
}

/// Scaling by a unit multiplier that yields `None` instead of overflowing
pub trait CheckedScale: Sized {
    fn checked_scale(self, multiplier: u32) -> Option<Self>;
}

impl CheckedScale for Decimal {
    fn checked_scale(self, multiplier: u32) -> Option<Self> {
        self.checked_mul(Decimal::from(multiplier))
    }
}

impl CheckedScale for i64 {
    fn checked_scale(self, multiplier: u32) -> Option<Self> {
        self.checked_mul(i64::from(multiplier))
    }
}

impl CheckedScale for f64 {
    fn checked_scale(self, multiplier: u32) -> Option<Self> {
        let scaled = self * f64::from(multiplier);
        scaled.is_finite().then_some(scaled)
    }
}

/// Same as [`convert_value`] for any numeric kind
///
/// A magnitude too large for `T` once scaled is treated as unparseable.
pub fn convert_value_as<T>(value: Option<&str>) -> Option<T>
where
    T: ParseNullable + CheckedScale,
{
    let mut tokens = value?.split_whitespace();

    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(number), None, None) => number.parse_nullable::<T>(),
        (Some(number), Some(unit), None) => {
            let magnitude = number.parse_nullable::<T>()?;
            magnitude.checked_scale(unit_multiplier(unit))
        }
        // blank, or more than `<number> <unit>`
        _ => None,
    }
}

/// Look up the multiplier for a unit symbol
///
/// Unknown units are assumed to already be in the base unit.
pub fn unit_multiplier(unit: &str) -> u32 {
    UNIT_MULTIPLIERS
        .iter()
        .find(|(symbol, _)| *symbol == unit)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1)
}
