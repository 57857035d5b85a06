//! Numeric parsing and unit normalization for report values.

pub mod normalizer;
pub mod parse;

// Re-export main types
pub use normalizer::{convert_value, convert_value_as, unit_multiplier, CheckedScale};
pub use parse::{ParseNullable, StrParseExt};
