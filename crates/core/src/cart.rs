//! Cart

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    checkout::{CheckoutItem, CheckoutPayload, CustomerInfo, PaymentMethod},
    pricing::{TaxRate, Totals, line_total},
    products::{Product, ProductId},
};

/// Errors raised by cart mutations. A failed mutation leaves the cart unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Zero units were requested.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// The requested quantity is more than the product has in stock.
    #[error("only {available} units of product {product} in stock, {requested} requested")]
    StockExceeded {
        /// Product whose stock would be exceeded
        product: ProductId,

        /// Quantity the line would have ended up with
        requested: u32,

        /// Stock at the time of the check
        available: u32,
    },

    /// There is no line for the product.
    #[error("product {0} is not in the cart")]
    LineNotFound(ProductId),

    /// Checkout was attempted on an empty cart.
    #[error("the cart is empty")]
    Empty,

    /// Checkout was attempted before choosing how to pay.
    #[error("no payment method selected")]
    MissingPaymentMethod,
}

/// One product in the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    /// Product id
    pub product_id: ProductId,

    /// Product name, for display
    pub name: String,

    /// Product barcode, for display
    pub barcode: String,

    /// Sale price captured when the product was first added
    pub unit_price: Decimal,

    /// Units in the cart, always between 1 and `available_stock`
    pub quantity: u32,

    /// Stock snapshot the quantity is bounded by
    pub available_stock: u32,
}

impl CartLine {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Decimal {
        line_total(self.unit_price, self.quantity)
    }
}

/// The sale in progress at a checkout.
///
/// Lines are unique by product and keep the order products were first added
/// in. Totals are derived from the lines on every call and never stored.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: SmallVec<[CartLine; 8]>,
    tax_rate: TaxRate,
    payment_method: Option<PaymentMethod>,
    customer: Option<CustomerInfo>,
}

impl Cart {
    /// Create an empty cart taxed at the given rate.
    pub fn new(tax_rate: TaxRate) -> Self {
        Cart {
            lines: SmallVec::new(),
            tax_rate,
            payment_method: None,
            customer: None,
        }
    }

    /// Add `quantity` units of a product.
    ///
    /// An existing line for the product grows by `quantity` and has its stock
    /// snapshot refreshed from `product`; its price snapshot is kept.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for zero units and
    /// [`CartError::StockExceeded`] if the line would end up above the
    /// product's stock.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let exceeded = |requested| CartError::StockExceeded {
            product: product.id,
            requested,
            available: product.stock,
        };

        if let Some(line) = self.line_mut(product.id) {
            let requested = line
                .quantity
                .checked_add(quantity)
                .ok_or_else(|| exceeded(u32::MAX))?;

            if requested > product.stock {
                return Err(exceeded(requested));
            }

            line.quantity = requested;
            line.available_stock = product.stock;

            return Ok(());
        }

        if quantity > product.stock {
            return Err(exceeded(quantity));
        }

        self.lines.push(CartLine {
            product_id: product.id,
            name: product.name.clone(),
            barcode: product.barcode.clone(),
            unit_price: product.sale_price,
            quantity,
            available_stock: product.stock,
        });

        Ok(())
    }

    /// Remove the line for a product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<CartLine, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.product_id == product_id)
            .ok_or(CartError::LineNotFound(product_id))?;

        Ok(self.lines.remove(index))
    }

    /// Set a line's quantity. Zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart
    /// and [`CartError::StockExceeded`] if `quantity` is above its stock snapshot.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(product_id).map(|_line| ());
        }

        let line = self
            .line_mut(product_id)
            .ok_or(CartError::LineNotFound(product_id))?;

        if quantity > line.available_stock {
            return Err(CartError::StockExceeded {
                product: product_id,
                requested: quantity,
                available: line.available_stock,
            });
        }

        line.quantity = quantity;

        Ok(())
    }

    /// Add one unit to a line.
    ///
    /// # Errors
    ///
    /// See [`Cart::set_quantity`].
    pub fn increment(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let quantity = self
            .line(product_id)
            .ok_or(CartError::LineNotFound(product_id))?
            .quantity;

        self.set_quantity(product_id, quantity.saturating_add(1))
    }

    /// Take one unit off a line, removing it when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the product is not in the cart.
    pub fn decrement(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let quantity = self
            .line(product_id)
            .ok_or(CartError::LineNotFound(product_id))?
            .quantity;

        self.set_quantity(product_id, quantity.saturating_sub(1))
    }

    /// Empty the cart and forget the payment method and customer.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.payment_method = None;
        self.customer = None;
    }

    /// Choose how the sale will be paid.
    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
    }

    /// Attach customer details to the sale, or detach them with `None`.
    pub fn set_customer_info(&mut self, customer: Option<CustomerInfo>) {
        self.customer = customer;
    }

    /// Lines in the order they were added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a product, if present.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id == product_id)
    }

    /// Chosen payment method.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Attached customer.
    pub fn customer(&self) -> Option<&CustomerInfo> {
        self.customer.as_ref()
    }

    /// Tax rate applied to the subtotal.
    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of units across all lines.
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Tax on the subtotal.
    pub fn tax(&self) -> Decimal {
        self.totals().tax
    }

    /// Subtotal plus tax.
    pub fn total(&self) -> Decimal {
        self.totals().total
    }

    /// Subtotal, tax and total together.
    pub fn totals(&self) -> Totals {
        Totals::from_subtotal(self.subtotal(), self.tax_rate)
    }

    /// Project the cart into the sale submission body.
    ///
    /// The cart itself is left untouched so a failed submission can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] for an empty cart and
    /// [`CartError::MissingPaymentMethod`] if no payment method was chosen.
    pub fn to_checkout_payload(&self) -> Result<CheckoutPayload, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }

        let payment_method = self.payment_method.ok_or(CartError::MissingPaymentMethod)?;

        let items = self
            .lines
            .iter()
            .map(|line| CheckoutItem {
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();

        Ok(CheckoutPayload {
            items,
            payment_method,
            notes: self.customer.as_ref().map(CustomerInfo::note),
        })
    }
}
