//! Product models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use revenge::products::{self as checkout, ProductId};

use crate::domain::{categories::models::CategoryId, status::Status, store::Entity};

/// A catalog product with its prices and stock levels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Product {
    /// Backend id
    pub id: ProductId,

    /// Barcode, unique in the catalog
    #[serde(rename = "codigo_barras")]
    pub barcode: String,

    /// Product name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Optional description
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Category
    #[serde(rename = "categoria_id")]
    pub category_id: CategoryId,

    /// Category name, when the backend joins it
    #[serde(rename = "categoria_nombre", default)]
    pub category_name: Option<String>,

    /// Unit cost
    #[serde(rename = "precio_compra")]
    pub purchase_price: Decimal,

    /// Unit price charged at checkout
    #[serde(rename = "precio_venta")]
    pub sale_price: Decimal,

    /// Units on hand. Older backends call it `stock_actual`.
    #[serde(alias = "stock_actual")]
    pub stock: u32,

    /// Threshold at or below which the product counts as low on stock.
    #[serde(rename = "stock_minimo", default)]
    pub min_stock: u32,

    /// Inactive products cannot be sold
    #[serde(rename = "estado_id", default)]
    pub status: Status,
}

impl Product {
    /// Whether stock is at or below the minimum.
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    /// Whether no units are left.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Purchase value of the units on hand.
    pub fn inventory_value(&self) -> Decimal {
        self.purchase_price * Decimal::from(self.stock)
    }

    /// What the cart needs to know about this product right now.
    pub fn snapshot(&self) -> checkout::Product {
        checkout::Product {
            id: self.id,
            name: self.name.clone(),
            barcode: self.barcode.clone(),
            sale_price: self.sale_price,
            stock: self.stock,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Create or update form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[validate(schema(function = "validate_margin"))]
pub struct ProductForm {
    /// Up to 50 characters
    #[serde(rename = "codigo_barras")]
    #[validate(length(min = 1, max = 50, message = "el código de barras es requerido"))]
    pub barcode: String,

    /// Up to 200 characters
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 200, message = "el nombre es requerido"))]
    pub name: String,

    /// Optional description
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category
    #[serde(rename = "categoria_id")]
    pub category_id: CategoryId,

    /// Unit cost, not negative
    #[serde(rename = "precio_compra", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_not_negative"))]
    pub purchase_price: Decimal,

    /// Unit price, not below cost
    #[serde(rename = "precio_venta", with = "rust_decimal::serde::float")]
    #[validate(custom(function = "validate_not_negative"))]
    pub sale_price: Decimal,

    /// Units on hand
    pub stock: u32,

    /// Low-stock threshold
    #[serde(rename = "stock_minimo")]
    pub min_stock: u32,

    /// Left unchanged when `None`
    #[serde(rename = "estado_id", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            category_id: product.category_id,
            purchase_price: product.purchase_price,
            sale_price: product.sale_price,
            stock: product.stock,
            min_stock: product.min_stock,
            status: Some(product.status),
        }
    }
}

fn validate_not_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        let mut error = ValidationError::new("range");
        error.message = Some("los precios no pueden ser negativos".into());
        return Err(error);
    }

    Ok(())
}

/// The backend refuses to sell below cost.
fn validate_margin(form: &ProductForm) -> Result<(), ValidationError> {
    if form.sale_price < form.purchase_price {
        let mut error = ValidationError::new("margin");
        error.message =
            Some("el precio de venta no puede ser menor al precio de compra".into());
        return Err(error);
    }

    Ok(())
}
