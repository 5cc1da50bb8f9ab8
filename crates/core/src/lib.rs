//! Revenge
//!
//! Checkout engine for the Revenge point-of-sale client: typed backend ids,
//! stock-bounded cart lines, tax-inclusive totals and receipt rendering.

pub mod cart;
pub mod checkout;
pub mod ids;
pub mod money;
pub mod pricing;
pub mod products;
pub mod receipt;

pub use cart::{Cart, CartError, CartLine};
pub use checkout::{CheckoutItem, CheckoutPayload, CustomerInfo, PaymentMethod};
pub use pricing::{TaxRate, Totals};
pub use products::{Product, ProductId};
