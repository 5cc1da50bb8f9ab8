//! Pricing

use std::{fmt, str::FromStr};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when building a [`TaxRate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRateError {
    /// The rate was not a valid decimal number.
    #[error("tax rate `{0}` is not a decimal number")]
    NotANumber(String),

    /// The rate was outside `[0, 1]`.
    #[error("tax rate {0} must be a fraction between 0 and 1")]
    OutOfRange(Decimal),
}

/// Sales tax (IGV) applied on top of the subtotal, as a fraction of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Create a tax rate from a fraction, e.g. `0.18` for 18%.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRateError::OutOfRange`] if the fraction is negative or above one.
    pub fn new(fraction: Decimal) -> Result<Self, TaxRateError> {
        if fraction.is_sign_negative() || fraction > Decimal::ONE {
            return Err(TaxRateError::OutOfRange(fraction));
        }

        Ok(Self(fraction))
    }

    /// The rate as a fraction.
    pub fn fraction(self) -> Decimal {
        self.0
    }

    /// Tax owed on the given amount.
    pub fn tax_on(self, amount: Decimal) -> Decimal {
        Percentage::from(self.0) * amount
    }
}

impl Default for TaxRate {
    /// Peruvian IGV, 18%.
    fn default() -> Self {
        Self(Decimal::new(18, 2))
    }
}

impl FromStr for TaxRate {
    type Err = TaxRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fraction =
            Decimal::from_str(s.trim()).map_err(|_err| TaxRateError::NotANumber(s.to_string()))?;

        Self::new(fraction)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

/// Subtotal, tax and grand total of a set of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    /// Sum of line totals, before tax
    pub subtotal: Decimal,

    /// Tax on the subtotal
    pub tax: Decimal,

    /// Subtotal plus tax
    pub total: Decimal,
}

impl Totals {
    /// Derive tax and total from a subtotal.
    pub fn from_subtotal(subtotal: Decimal, rate: TaxRate) -> Self {
        let tax = rate.tax_on(subtotal);

        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Price of `quantity` units at `unit_price`.
pub fn line_total(unit_price: Decimal, quantity: u32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_rate_is_eighteen_percent() {
        assert_eq!(TaxRate::default().fraction(), Decimal::new(18, 2));
        assert_eq!(TaxRate::default().to_string(), "18%");
    }

    #[test]
    fn parses_fraction_from_str() -> TestResult {
        let rate: TaxRate = "0.10".parse()?;

        assert_eq!(rate.fraction(), Decimal::new(10, 2));

        Ok(())
    }

    #[test]
    fn rejects_rates_outside_unit_interval() {
        assert_eq!(
            TaxRate::new(Decimal::new(15, 1)),
            Err(TaxRateError::OutOfRange(Decimal::new(15, 1)))
        );
        assert!(TaxRate::new(Decimal::new(-1, 2)).is_err());
        assert!(matches!(
            "eighteen".parse::<TaxRate>(),
            Err(TaxRateError::NotANumber(_))
        ));
    }

    #[test]
    fn totals_add_tax_to_subtotal() {
        let totals = Totals::from_subtotal(Decimal::new(1000, 2), TaxRate::default());

        assert_eq!(totals.subtotal, Decimal::new(1000, 2));
        assert_eq!(totals.tax, Decimal::new(180, 2));
        assert_eq!(totals.total, Decimal::new(1180, 2));
    }

    #[test]
    fn zero_subtotal_has_zero_total() {
        let totals = Totals::from_subtotal(Decimal::ZERO, TaxRate::default());

        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        assert_eq!(line_total(Decimal::new(250, 2), 3), Decimal::new(750, 2));
    }
}
