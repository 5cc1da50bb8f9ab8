//! Products

use rust_decimal::Decimal;

use crate::ids::TypedId;

/// Product Id
pub type ProductId = TypedId<Product>;

/// A product as the checkout sees it at the moment it is scanned.
///
/// Only the fields the cart needs survive here; the richer catalog record
/// lives with the API models and converts into this snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Barcode printed on the package
    pub barcode: String,

    /// Current sale price per unit
    pub sale_price: Decimal,

    /// Units currently in stock
    pub stock: u32,
}
