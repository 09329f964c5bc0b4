//! Pricing

use rusty_money::MoneyError;
use thiserror::Error;

use crate::{
    cart::CartLine,
    prices::{Vnd, vnd},
};

/// Errors that can occur while pricing cart lines.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// `price * quantity` does not fit in the minor-unit range.
    #[error("line total for {0} overflows")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// `price * quantity` for one line.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: the product does not fit.
pub fn line_total(line: &CartLine) -> Result<Vnd, PricingError> {
    line.price
        .to_minor_units()
        .checked_mul(i64::from(line.quantity.get()))
        .map(vnd)
        .ok_or_else(|| PricingError::Overflow(line.id.to_string()))
}

/// Sum of `price * quantity` over every given line, selected or not.
///
/// An empty slice totals zero.
///
/// # Errors
///
/// - [`PricingError::Overflow`]: a line total does not fit.
/// - [`PricingError::Money`]: wrapped money arithmetic error.
pub fn total<'a>(lines: impl IntoIterator<Item = &'a CartLine>) -> Result<Vnd, PricingError> {
    lines
        .into_iter()
        .try_fold(vnd(0), |acc, line| -> Result<Vnd, PricingError> {
            Ok(acc.add(line_total(line)?)?)
        })
}

/// Sum of `price * quantity` over the checked lines only.
///
/// # Errors
///
/// See [`total`].
pub fn subtotal(lines: &[CartLine]) -> Result<Vnd, PricingError> {
    total(lines.iter().filter(|line| line.checked))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::cart::Quantity;

    use super::*;

    fn line(id: &str, price: i64, quantity: u32, checked: bool) -> CartLine {
        CartLine {
            id: id.into(),
            product_id: format!("p{id}").into(),
            category_id: "c1".into(),
            name: format!("Item {id}"),
            category: "Indoor".to_string(),
            price: vnd(price),
            quantity: Quantity::new(quantity),
            image: String::new(),
            checked,
        }
    }

    #[test]
    fn empty_selection_is_zero() -> TestResult {
        let lines = [line("1", 50_000, 2, false), line("2", 10_000, 1, false)];

        assert_eq!(subtotal(&lines)?, vnd(0));
        assert_eq!(subtotal(&[])?, vnd(0));

        Ok(())
    }

    #[test]
    fn full_selection_sums_price_times_quantity() -> TestResult {
        let lines = [line("1", 50_000, 2, true), line("2", 10_000, 3, true)];

        assert_eq!(subtotal(&lines)?, vnd(130_000));
        assert_eq!(subtotal(&lines)?, total(&lines)?);

        Ok(())
    }

    #[test]
    fn partial_selection_ignores_unchecked_lines() -> TestResult {
        let lines = [line("1", 50_000, 2, true), line("2", 10_000, 3, false)];

        assert_eq!(subtotal(&lines)?, vnd(100_000));

        Ok(())
    }

    #[test]
    fn overflowing_line_is_an_error() {
        let lines = [line("1", i64::MAX, 2, true)];

        assert!(matches!(subtotal(&lines), Err(PricingError::Overflow(_))));
    }
}
