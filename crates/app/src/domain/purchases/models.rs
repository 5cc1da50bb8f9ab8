//! Purchase models.

use jiff::civil::{Date, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use revenge::{ids::TypedId, products::ProductId};

use crate::{
    auth::UserId,
    domain::{dates::parse_datetime, store::Entity, suppliers::models::SupplierId},
};

/// Purchase Id
pub type PurchaseId = TypedId<Purchase>;

/// Stock bought from a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Purchase {
    /// Backend id
    pub id: PurchaseId,

    /// Supplier invoice number
    #[serde(rename = "numero_factura", default)]
    pub invoice_number: Option<String>,

    /// Supplier bought from
    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,

    /// Supplier name, when the backend joins it
    #[serde(rename = "proveedor_nombre", default)]
    pub supplier_name: Option<String>,

    /// Who registered it
    #[serde(rename = "usuario_id", default)]
    pub user_id: Option<UserId>,

    /// User name, when the backend joins it
    #[serde(rename = "usuario_nombre", default)]
    pub user_name: Option<String>,

    /// As sent by the backend; see [`Purchase::datetime`]
    #[serde(rename = "fecha", default)]
    pub date: String,

    /// Before tax
    #[serde(default)]
    pub subtotal: Decimal,

    /// IGV paid
    #[serde(rename = "impuestos", default)]
    pub tax: Decimal,

    /// Amount paid
    pub total: Decimal,

    /// Free-text note
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,

    /// Lines, present on the detail view only
    #[serde(rename = "detalles", default)]
    pub lines: Vec<PurchaseLine>,
}

impl Purchase {
    /// When the purchase was registered, if the date is readable.
    pub fn datetime(&self) -> Option<DateTime> {
        parse_datetime(&self.date)
    }
}

impl Entity for Purchase {
    type Id = PurchaseId;

    fn id(&self) -> PurchaseId {
        self.id
    }
}

/// A bought line of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PurchaseLine {
    /// Product bought
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,

    /// Product name
    #[serde(rename = "producto_nombre", default)]
    pub product_name: Option<String>,

    /// Units bought
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Cost per unit
    #[serde(rename = "precio_unitario")]
    pub unit_price: Decimal,

    /// Quantity times unit cost
    #[serde(default)]
    pub subtotal: Decimal,
}

/// Body of `POST compras`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct NewPurchase {
    /// Supplier bought from
    #[serde(rename = "proveedor_id")]
    pub supplier_id: SupplierId,

    /// Set by the store to the logged-in user.
    #[serde(rename = "usuario_id")]
    pub user_id: Option<UserId>,

    /// Supplier invoice number, 1 to 50 characters
    #[serde(rename = "numero_factura", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 50, message = "número de factura inválido"))]
    pub invoice_number: Option<String>,

    /// Free-text note
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// At least one line
    #[validate(length(min = 1, message = "agregue al menos un producto"))]
    #[validate(nested)]
    pub items: Vec<PurchaseItem>,
}

/// A line of a new purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct PurchaseItem {
    /// Product bought
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,

    /// Units bought, at least one
    #[serde(rename = "cantidad")]
    #[validate(range(min = 1, message = "la cantidad debe ser mayor a cero"))]
    pub quantity: u32,

    /// Cost per unit, not negative
    #[serde(rename = "precio_unitario", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_cost"))]
    pub unit_price: Decimal,
}

fn validate_cost(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut error = ValidationError::new("range");
        error.message = Some("el precio no puede ser negativo".into());
        return Err(error);
    }

    Ok(())
}

/// Server-side filters of the purchases list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurchaseFilters {
    /// First day, inclusive
    pub from: Option<Date>,
    /// Last day, inclusive
    pub to: Option<Date>,
    /// Only purchases from this supplier
    pub supplier: Option<SupplierId>,
}

impl PurchaseFilters {
    /// Query parameters; unset filters are left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(from) = self.from {
            query.push(("fecha_desde", from.to_string()));
        }

        if let Some(to) = self.to {
            query.push(("fecha_hasta", to.to_string()));
        }

        if let Some(supplier) = self.supplier {
            query.push(("proveedor", supplier.to_string()));
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase(items: Vec<PurchaseItem>) -> NewPurchase {
        NewPurchase {
            supplier_id: SupplierId::new(1),
            user_id: None,
            invoice_number: Some("F001-123".to_string()),
            notes: None,
            items,
        }
    }

    #[test]
    fn purchase_needs_items() {
        assert!(purchase(Vec::new()).validate().is_err());
    }

    #[test]
    fn items_are_validated() {
        let zero = purchase(vec![PurchaseItem {
            product_id: ProductId::new(1),
            quantity: 0,
            unit_price: Decimal::ONE,
        }]);

        let fine = purchase(vec![PurchaseItem {
            product_id: ProductId::new(1),
            quantity: 12,
            unit_price: Decimal::new(180, 2),
        }]);

        assert!(zero.validate().is_err());
        assert!(fine.validate().is_ok());
    }
}
