//! Prices
//!
//! The storefront quotes everything in Vietnamese đồng, which has no minor
//! unit, so one minor unit is one đồng.

use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use thiserror::Error;

/// An amount of Vietnamese đồng.
pub type Vnd = Money<'static, iso::Currency>;

/// Currency markers the store appends to prices, longest first.
const CURRENCY_SUFFIXES: [&str; 4] = ["VNĐ", "VND", "đ", "₫"];

/// Errors raised while reading a price string.
#[derive(Debug, Error, PartialEq)]
pub enum PriceParseError {
    /// Nothing left once the currency marker and separators were removed.
    #[error("price {0:?} has no digits")]
    Empty(String),

    /// The remaining characters do not form a number.
    #[error("price {input:?} is not a number")]
    NotANumber {
        /// Raw input.
        input: String,

        /// Decimal parser error.
        #[source]
        source: rust_decimal::Error,
    },

    /// Prices can't be negative.
    #[error("price {0:?} is negative")]
    Negative(String),

    /// The amount does not fit in the minor-unit range.
    #[error("price {0:?} is out of range")]
    OutOfRange(String),
}

/// Create an amount from whole đồng.
#[must_use]
pub fn vnd(amount: i64) -> Vnd {
    Money::from_minor(amount, iso::VND)
}

/// Parse a localized price such as `"120.000đ"`.
///
/// A trailing currency marker and every thousands separator (`.`, `,` and
/// whitespace) are stripped before the remainder is parsed as a decimal.
///
/// # Errors
///
/// Returns a [`PriceParseError`] when the input is empty, not numeric,
/// negative or too large.
pub fn parse_price(raw: &str) -> Result<Vnd, PriceParseError> {
    let trimmed = raw.trim();

    let without_suffix = CURRENCY_SUFFIXES
        .iter()
        .find_map(|suffix| trimmed.strip_suffix(suffix))
        .unwrap_or(trimmed);

    let digits: String = without_suffix
        .chars()
        .filter(|c| !matches!(c, '.' | ',') && !c.is_whitespace())
        .collect();

    if digits.is_empty() {
        return Err(PriceParseError::Empty(raw.to_string()));
    }

    let amount: Decimal = digits
        .parse()
        .map_err(|source| PriceParseError::NotANumber {
            input: raw.to_string(),
            source,
        })?;

    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceParseError::Negative(raw.to_string()));
    }

    let minor = i64::try_from(amount.trunc())
        .map_err(|error| PriceParseError::OutOfRange(format!("{raw}: {error}")))?;

    Ok(vnd(minor))
}

/// Render an amount the way the storefront shows it, e.g. `"120.000đ"`.
#[must_use]
pub fn format_price(amount: &Vnd) -> String {
    let minor = amount.to_minor_units();
    let digits = minor.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);

    if minor < 0 {
        grouped.push('-');
    }

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }

        grouped.push(c);
    }

    grouped.push('đ');

    grouped
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_thousands_separated_price() -> TestResult {
        assert_eq!(parse_price("120.000đ")?, vnd(120_000));

        Ok(())
    }

    #[test]
    fn parses_zero_price() -> TestResult {
        assert_eq!(parse_price("0đ")?, vnd(0));

        Ok(())
    }

    #[test]
    fn strips_every_separator_not_just_the_first() -> TestResult {
        assert_eq!(parse_price("1.250.000đ")?, vnd(1_250_000));
        assert_eq!(parse_price("1,250,000 VND")?, vnd(1_250_000));
        assert_eq!(parse_price("35 000₫")?, vnd(35_000));

        Ok(())
    }

    #[test]
    fn accepts_bare_numbers() -> TestResult {
        assert_eq!(parse_price("45000")?, vnd(45_000));

        Ok(())
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            parse_price("free"),
            Err(PriceParseError::NotANumber { .. })
        ));
    }

    #[test]
    fn rejects_currency_marker_alone() {
        assert!(matches!(parse_price("đ"), Err(PriceParseError::Empty(_))));
        assert!(matches!(parse_price(""), Err(PriceParseError::Empty(_))));
    }

    #[test]
    fn rejects_negative_prices() {
        assert!(matches!(
            parse_price("-5.000đ"),
            Err(PriceParseError::Negative(_))
        ));
    }

    #[test]
    fn formats_with_dot_grouping() {
        assert_eq!(format_price(&vnd(0)), "0đ");
        assert_eq!(format_price(&vnd(999)), "999đ");
        assert_eq!(format_price(&vnd(15_000)), "15.000đ");
        assert_eq!(format_price(&vnd(1_250_000)), "1.250.000đ");
        assert_eq!(format_price(&vnd(-20_000)), "-20.000đ");
    }
}
