//! Monetary value recognition
//!
//! A monetary string is a group of digits split by thousands separators,
//! optionally wrapped in parentheses to mark a negative amount.

use crate::tagging::Sign;
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern for a monetary cell: `1,234`, `(10,000)`, `  2,500,000 `.
pub const MONEY_PATTERN: &str = r"^\s*\(?(\d+(,\d+)+)\)?\s*$";

static MONEY: Lazy<Regex> = Lazy::new(|| Regex::new(MONEY_PATTERN).expect("valid money pattern"));

/// Whether the whole fragment is a monetary value.
pub fn is_money(text: &str) -> bool {
    MONEY.is_match(text)
}

/// Parse a monetary fragment into a signed amount.
///
/// Separators, parentheses and whitespace are stripped. A leading
/// parenthesis marks the amount negative. Returns `None` for anything
/// that is not a monetary fragment or does not fit in an `i64`.
pub fn parse_money(text: &str) -> Option<(i64, Sign)> {
    if !is_money(text) {
        return None;
    }

    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    let magnitude: i64 = digits.parse().ok()?;

    if text.trim_start().starts_with('(') {
        Some((-magnitude, Sign::Negative))
    } else {
        Some((magnitude, Sign::Positive))
    }
}
