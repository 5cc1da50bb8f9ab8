//! Integration tests for cart stock ceilings and derived totals.

use rust_decimal::Decimal;
use testresult::TestResult;

use revenge::{
    cart::{Cart, CartError},
    checkout::PaymentMethod,
    pricing::TaxRate,
    products::{Product, ProductId},
};

fn widget() -> Product {
    Product {
        id: ProductId::new(1),
        name: "Widget".to_string(),
        barcode: "7750000000017".to_string(),
        sale_price: Decimal::new(1000, 2),
        stock: 5,
    }
}

fn assert_totals_consistent(cart: &Cart) {
    let rate = cart.tax_rate().fraction();

    assert_eq!(
        cart.total(),
        cart.subtotal() + cart.subtotal() * rate,
        "total must equal subtotal plus tax"
    );
    assert_eq!(cart.tax(), cart.subtotal() * rate, "tax must follow subtotal");
}

#[test]
fn adding_widget_to_empty_cart_totals_with_igv() -> TestResult {
    let mut cart = Cart::new(TaxRate::default());

    cart.add_item(&widget(), 1)?;

    assert_eq!(cart.line_count(), 1);
    assert_eq!(cart.lines().first().map(|line| line.quantity), Some(1));
    assert_eq!(cart.subtotal(), Decimal::new(1000, 2));
    assert_eq!(cart.tax(), Decimal::new(180, 2));
    assert_eq!(cart.total(), Decimal::new(1180, 2));

    Ok(())
}

#[test]
fn adding_beyond_stock_fails_and_keeps_quantity() -> TestResult {
    let mut cart = Cart::new(TaxRate::default());

    cart.add_item(&widget(), 1)?;

    let result = cart.add_item(&widget(), 10);

    assert_eq!(
        result,
        Err(CartError::StockExceeded {
            product: ProductId::new(1),
            requested: 11,
            available: 5,
        })
    );
    assert_eq!(cart.line(ProductId::new(1)).map(|l| l.quantity), Some(1));

    Ok(())
}

#[test]
fn setting_quantity_to_zero_empties_single_line_cart() -> TestResult {
    let mut cart = Cart::new(TaxRate::default());

    cart.add_item(&widget(), 1)?;
    cart.set_quantity(ProductId::new(1), 0)?;

    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);

    Ok(())
}

#[test]
fn quantity_never_exceeds_stock_over_any_add_and_increment_sequence() -> TestResult {
    let product = widget();

    // Every sequence of up to eight operations, encoded as bits: 1 = add(1), 0 = increment.
    for sequence in 0u32..256 {
        let mut cart = Cart::new(TaxRate::default());

        for step in 0..8 {
            let before = cart.line(product.id).map_or(0, |line| line.quantity);

            let result = if (sequence >> step) & 1 == 1 || before == 0 {
                cart.add_item(&product, 1)
            } else {
                cart.increment(product.id)
            };

            let after = cart.line(product.id).map_or(0, |line| line.quantity);

            if before == product.stock {
                assert!(result.is_err(), "sequence {sequence:08b} passed the ceiling");
                assert_eq!(after, before, "failed call changed quantity");
            } else {
                result?;
                assert_eq!(after, before + 1, "successful call added one unit");
            }

            assert!(after <= product.stock, "quantity above stock");
            assert_totals_consistent(&cart);
        }
    }

    Ok(())
}

#[test]
fn adding_twice_equals_adding_summed_quantity() -> TestResult {
    let mut twice = Cart::new(TaxRate::default());
    let mut once = Cart::new(TaxRate::default());

    twice.add_item(&widget(), 2)?;
    twice.add_item(&widget(), 3)?;
    once.add_item(&widget(), 5)?;

    assert_eq!(twice.lines(), once.lines());
    assert_eq!(twice.totals(), once.totals());

    Ok(())
}

#[test]
fn clear_always_yields_empty_cart_without_payment_method() -> TestResult {
    let mut cart = Cart::new(TaxRate::default());

    cart.add_item(&widget(), 3)?;
    cart.set_payment_method(PaymentMethod::CreditCard);
    cart.clear();

    assert!(cart.lines().is_empty());
    assert_eq!(cart.payment_method(), None);
    assert_eq!(cart.subtotal(), Decimal::ZERO);
    assert_totals_consistent(&cart);

    Ok(())
}

#[test]
fn totals_follow_configured_rate() -> TestResult {
    let mut cart = Cart::new("0.10".parse()?);

    cart.add_item(&widget(), 2)?;
    cart.add_item(
        &Product {
            id: ProductId::new(2),
            name: "Gadget".to_string(),
            barcode: "7750000000024".to_string(),
            sale_price: Decimal::new(333, 2),
            stock: 3,
        },
        3,
    )?;

    assert_eq!(cart.subtotal(), Decimal::new(2999, 2));
    assert_eq!(cart.tax(), Decimal::new(2999, 3));
    assert_totals_consistent(&cart);

    Ok(())
}
