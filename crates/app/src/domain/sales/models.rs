//! Sale models.

use jiff::civil::{Date, DateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use revenge::{
    checkout::{CheckoutPayload, PaymentMethod},
    ids::TypedId,
    products::ProductId,
};

use crate::{
    auth::UserId,
    domain::{dates::parse_datetime, store::Entity},
};

/// Label for sales without a known payment method.
pub const UNSPECIFIED_PAYMENT: &str = "Sin especificar";

/// Sale Id
pub type SaleId = TypedId<Sale>;

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Sale {
    /// Backend id
    pub id: SaleId,

    /// Receipt number shown to the customer.
    #[serde(rename = "numero_boleta", alias = "folio", default)]
    pub receipt_number: String,

    /// Who sold it
    #[serde(rename = "cajero_id", default)]
    pub cashier_id: Option<UserId>,

    /// Cashier name, when the backend joins it
    #[serde(rename = "cajero_nombre", alias = "usuario_nombre", default)]
    pub cashier_name: Option<String>,

    /// As sent by the backend; see [`Sale::datetime`].
    #[serde(rename = "fecha", default)]
    pub date: String,

    /// Before tax
    #[serde(default)]
    pub subtotal: Decimal,

    /// Discount applied
    #[serde(rename = "descuento", default)]
    pub discount: Decimal,

    /// IGV charged
    #[serde(rename = "impuestos", default)]
    pub tax: Decimal,

    /// Amount charged
    pub total: Decimal,

    /// Payment method id, see [`Sale::payment_method`]
    #[serde(rename = "metodo_pago_id", default)]
    pub payment_method_id: Option<u8>,

    /// Payment method name, when the backend joins it
    #[serde(rename = "metodo_pago_nombre", default)]
    pub payment_method_name: Option<String>,

    /// Customer note
    #[serde(rename = "observaciones", default)]
    pub notes: Option<String>,

    /// Lines, present on the detail view only.
    #[serde(rename = "detalles", default)]
    pub lines: Vec<SaleLine>,
}

impl Sale {
    /// When the sale happened, if the date is readable.
    pub fn datetime(&self) -> Option<DateTime> {
        parse_datetime(&self.date)
    }

    /// Whether the sale happened on `day`.
    pub fn is_on(&self, day: Date) -> bool {
        self.datetime().is_some_and(|datetime| datetime.date() == day)
    }

    /// The payment method, if the id is a known one.
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method_id
            .and_then(|id| PaymentMethod::try_from(id).ok())
    }

    /// Payment method name for grouping and display.
    pub fn payment_label(&self) -> String {
        self.payment_method_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| self.payment_method().map(|method| method.label().to_string()))
            .unwrap_or_else(|| UNSPECIFIED_PAYMENT.to_string())
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> SaleId {
        self.id
    }
}

/// A sold line of a sale.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaleLine {
    /// Product sold
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,

    /// Product name at the time of the sale
    #[serde(rename = "producto_nombre", default)]
    pub product_name: Option<String>,

    /// Product barcode
    #[serde(rename = "codigo_barras", default)]
    pub barcode: Option<String>,

    /// Units sold
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Price charged per unit
    #[serde(rename = "precio_unitario")]
    pub unit_price: Decimal,

    /// Quantity times unit price
    #[serde(default)]
    pub subtotal: Decimal,
}

/// What `POST ventas` answers: the committed sale's id and receipt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaleReceipt {
    /// Id of the new sale
    #[serde(rename = "venta_id", alias = "id")]
    pub id: SaleId,

    /// Receipt number assigned by the server
    #[serde(rename = "numero_boleta", alias = "folio", default)]
    pub receipt_number: String,

    /// Amount charged
    #[serde(default)]
    pub total: Decimal,
}

impl SaleReceipt {
    /// A stand-in record for a sale that was registered but could not be
    /// reloaded: the receipt plus what was sent.
    pub fn into_sale(self, sent: &NewSale, date: String) -> Sale {
        Sale {
            id: self.id,
            receipt_number: self.receipt_number,
            cashier_id: Some(sent.cashier_id),
            cashier_name: None,
            date,
            subtotal: Decimal::ZERO,
            discount: Decimal::ZERO,
            tax: Decimal::ZERO,
            total: self.total,
            payment_method_id: Some(sent.payload.payment_method.id()),
            payment_method_name: None,
            notes: sent.payload.notes.clone(),
            lines: Vec::new(),
        }
    }
}

/// Body of `POST ventas`: the cart payload plus who sold it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSale {
    /// Who sells
    #[serde(rename = "cajero_id")]
    pub cashier_id: UserId,

    /// Lines, payment method and note
    #[serde(flatten)]
    pub payload: CheckoutPayload,
}

/// Server-side filters of the sales list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaleFilters {
    /// First day, inclusive
    pub from: Option<Date>,
    /// Last day, inclusive
    pub to: Option<Date>,
    /// Only sales paid this way
    pub payment_method: Option<PaymentMethod>,
    /// Only sales by this cashier
    pub cashier: Option<UserId>,
}

impl SaleFilters {
    /// Sales of a single day.
    pub fn on(day: Date) -> Self {
        Self {
            from: Some(day),
            to: Some(day),
            ..Self::default()
        }
    }

    /// Query parameters; unset filters are left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(from) = self.from {
            query.push(("fecha_desde", from.to_string()));
        }

        if let Some(to) = self.to {
            query.push(("fecha_hasta", to.to_string()));
        }

        if let Some(method) = self.payment_method {
            query.push(("metodo_pago", method.id().to_string()));
        }

        if let Some(cashier) = self.cashier {
            query.push(("cajero", cashier.to_string()));
        }

        query
    }
}

/// Count and amount of a group of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesSummary {
    /// Number of sales
    pub count: usize,
    /// Sum of their totals
    pub amount: Decimal,
}

impl SalesSummary {
    /// Count `sale` in.
    pub fn add(&mut self, sale: &Sale) {
        self.count += 1;
        self.amount += sale.total;
    }
}
