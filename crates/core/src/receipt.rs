//! Receipt

use std::io;

use rusty_money::iso::Currency;
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{cart::Cart, money::format_amount};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Write the cart lines and its totals as a table.
///
/// # Errors
///
/// Returns [`ReceiptError::IO`] if writing to `out` fails.
pub fn write_cart(
    out: &mut impl io::Write,
    cart: &Cart,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    if cart.is_empty() {
        return writeln!(out, "\n  (cart is empty)\n").map_err(|_err| ReceiptError::IO);
    }

    write_lines_table(out, cart, currency)?;
    write_summary(out, cart, currency)
}

fn write_lines_table(
    out: &mut impl io::Write,
    cart: &Cart,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Code", "Product", "Qty", "Price", "Total"]);

    for (idx, line) in cart.lines().iter().enumerate() {
        builder.push_record([
            format!("#{:<3}", idx + 1),
            line.barcode.clone(),
            line.name.clone(),
            format!("{}/{}", line.quantity, line.available_stock),
            format_amount(line.unit_price, currency),
            format_amount(line.line_total(), currency),
        ]);
    }

    let mut table = builder.build();
    let theme = Theme::from(Style::modern_rounded());

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..6), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

fn write_summary(
    out: &mut impl io::Write,
    cart: &Cart,
    currency: &'static Currency,
) -> Result<(), ReceiptError> {
    let totals = cart.totals();

    let tax_label = format!("IGV ({}):", cart.tax_rate());
    let rows = [
        ("Subtotal:".to_string(), format_amount(totals.subtotal, currency)),
        (tax_label, format_amount(totals.tax, currency)),
        ("Total:".to_string(), format_amount(totals.total, currency)),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in &rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}  ")
            .map_err(|_err| ReceiptError::IO)?;
    }

    if let Some(method) = cart.payment_method() {
        writeln!(out, " Payment: {method}").map_err(|_err| ReceiptError::IO)?;
    }

    if let Some(customer) = cart.customer() {
        writeln!(out, " {}", customer.note()).map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;
    use crate::{
        checkout::PaymentMethod,
        products::{Product, ProductId},
    };

    #[test]
    fn writes_lines_and_totals() -> TestResult {
        let mut cart = Cart::default();

        cart.add_item(
            &Product {
                id: ProductId::new(1),
                name: "Widget".to_string(),
                barcode: "7750001".to_string(),
                sale_price: Decimal::new(1000, 2),
                stock: 5,
            },
            1,
        )?;
        cart.set_payment_method(PaymentMethod::Cash);

        let mut out = Vec::new();
        write_cart(&mut out, &cart, iso::PEN)?;

        let text = String::from_utf8(out)?;

        assert!(text.contains("Widget"), "{text}");
        assert!(text.contains("7750001"), "{text}");
        assert!(text.contains("IGV (18%):"), "{text}");
        assert!(text.contains("11.80"), "{text}");
        assert!(text.contains("Payment: Efectivo"), "{text}");

        Ok(())
    }

    #[test]
    fn empty_cart_writes_placeholder() -> TestResult {
        let mut out = Vec::new();
        write_cart(&mut out, &Cart::default(), iso::PEN)?;

        assert!(String::from_utf8(out)?.contains("cart is empty"));

        Ok(())
    }
}
