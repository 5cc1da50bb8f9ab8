//! Display formatting.

use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use revenge::money::format_amount;

use crate::domain::dates::parse_datetime;

/// Amount with the currency symbol, e.g. `S/11.80`.
pub fn money(amount: Decimal, currency: &'static Currency) -> String {
    format_amount(amount, currency)
}

/// `DD/MM/YYYY`, or the raw text when it is not a date the backend sends.
pub fn date(raw: &str) -> String {
    parse_datetime(raw).map_or_else(
        || raw.to_string(),
        |datetime| datetime.strftime("%d/%m/%Y").to_string(),
    )
}

/// `DD/MM/YYYY HH:mm`, or the raw text when it is not a date the backend sends.
pub fn datetime(raw: &str) -> String {
    parse_datetime(raw).map_or_else(
        || raw.to_string(),
        |datetime| datetime.strftime("%d/%m/%Y %H:%M").to_string(),
    )
}

/// A share such as `42.5%`.
pub fn percent(share: Decimal) -> String {
    format!("{}%", share.round_dp(2).normalize())
}

/// The value, or `-` when missing or empty.
pub fn or_dash(value: Option<&str>) -> &str {
    value.filter(|value| !value.is_empty()).unwrap_or("-")
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;

    #[test]
    fn formats_backend_dates() {
        assert_eq!(date("Tue, 14 Jan 2025 10:30:00 GMT"), "14/01/2025");
        assert_eq!(datetime("2025-01-14T09:05:00"), "14/01/2025 09:05");
        assert_eq!(date("2025-01-14"), "14/01/2025");
    }

    #[test]
    fn unparseable_date_is_shown_as_is() {
        assert_eq!(datetime("ayer"), "ayer");
    }

    #[test]
    fn money_uses_currency_symbol() {
        let text = money(Decimal::new(1180, 2), iso::PEN);

        assert!(text.contains("S/"), "{text}");
        assert!(text.contains("11.80"), "{text}");
    }

    #[test]
    fn percent_trims_trailing_zeros() {
        assert_eq!(percent(Decimal::new(42_500, 3)), "42.5%");
        assert_eq!(or_dash(Some("")), "-");
    }
}
