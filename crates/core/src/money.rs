//! Money display

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Findable, Money, iso::Currency};

/// Look up an ISO currency by its alpha code, e.g. `PEN`.
pub fn find_currency(code: &str) -> Option<&'static Currency> {
    Currency::find(&code.trim().to_ascii_uppercase())
}

/// Round an amount to the currency's minor unit and render it with its symbol.
///
/// Amounts are carried unrounded through the cart; this is the only place
/// they are rounded.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> String {
    let rounded =
        amount.round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero);

    Money::from_decimal(rounded, currency).to_string()
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn finds_currency_case_insensitively() -> TestResult {
        let currency = find_currency(" pen ").ok_or("PEN not found")?;

        assert_eq!(currency, iso::PEN);
        assert!(find_currency("XXZ").is_none());

        Ok(())
    }

    #[test]
    fn formats_with_two_decimals() {
        let formatted = format_amount(Decimal::new(1180, 2), iso::PEN);

        assert!(formatted.contains("11.80"), "{formatted}");
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let formatted = format_amount(Decimal::new(10005, 3), iso::PEN);

        assert!(formatted.contains("10.01"), "{formatted}");
    }
}
