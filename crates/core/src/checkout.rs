//! Checkout payload

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::products::ProductId;

/// How the customer pays. Serialized as the backend's numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PaymentMethod {
    /// Cash
    Cash,

    /// Credit card
    CreditCard,

    /// Debit card
    DebitCard,

    /// Bank transfer
    Transfer,

    /// Yape wallet
    Yape,

    /// Plin wallet
    Plin,
}

impl PaymentMethod {
    /// Every method, in backend id order.
    pub const ALL: [Self; 6] = [
        Self::Cash,
        Self::CreditCard,
        Self::DebitCard,
        Self::Transfer,
        Self::Yape,
        Self::Plin,
    ];

    /// Backend id of the method.
    pub const fn id(self) -> u8 {
        match self {
            Self::Cash => 1,
            Self::CreditCard => 2,
            Self::DebitCard => 3,
            Self::Transfer => 4,
            Self::Yape => 5,
            Self::Plin => 6,
        }
    }

    /// Name shown to the cashier.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "Efectivo",
            Self::CreditCard => "Tarjeta Crédito",
            Self::DebitCard => "Tarjeta Débito",
            Self::Transfer => "Transferencia",
            Self::Yape => "Yape",
            Self::Plin => "Plin",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for PaymentMethod {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|method| method.id() == value)
            .ok_or_else(|| format!("unknown payment method id {value}"))
    }
}

impl From<PaymentMethod> for u8 {
    fn from(value: PaymentMethod) -> Self {
        value.id()
    }
}

/// Optional customer details attached to a sale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerInfo {
    /// Customer name
    pub name: String,

    /// DNI or RUC, when given
    pub document: Option<String>,
}

impl CustomerInfo {
    /// Free-text note the backend stores with the sale.
    pub fn note(&self) -> String {
        match &self.document {
            Some(document) => format!("Cliente: {} ({document})", self.name),
            None => format!("Cliente: {}", self.name),
        }
    }
}

/// One line of a sale submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutItem {
    /// Product sold
    #[serde(rename = "producto_id")]
    pub product_id: ProductId,

    /// Units sold
    #[serde(rename = "cantidad")]
    pub quantity: u32,

    /// Price snapshot taken when the product was added
    #[serde(rename = "precio_unitario", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
}

/// Cart contents in the shape the sales endpoint accepts.
///
/// The cashier id is added by the sales store, which knows who is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutPayload {
    /// Sold lines
    pub items: Vec<CheckoutItem>,

    /// Payment method
    #[serde(rename = "metodo_pago_id")]
    pub payment_method: PaymentMethod,

    /// Customer note
    #[serde(rename = "observaciones", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn payment_methods_map_to_backend_ids() -> TestResult {
        assert_eq!(PaymentMethod::Cash.id(), 1);
        assert_eq!(PaymentMethod::Plin.id(), 6);
        assert_eq!(PaymentMethod::try_from(5)?, PaymentMethod::Yape);
        assert!(PaymentMethod::try_from(7).is_err());

        Ok(())
    }

    #[test]
    fn payload_serializes_with_backend_field_names() -> TestResult {
        let payload = CheckoutPayload {
            items: vec![CheckoutItem {
                product_id: ProductId::new(3),
                quantity: 2,
                unit_price: Decimal::new(450, 2),
            }],
            payment_method: PaymentMethod::DebitCard,
            notes: None,
        };

        let value = serde_json::to_value(&payload)?;

        assert_eq!(value["metodo_pago_id"], 3);
        assert_eq!(value["items"][0]["producto_id"], 3);
        assert_eq!(value["items"][0]["cantidad"], 2);
        assert_eq!(value["items"][0]["precio_unitario"], 4.5);
        assert!(value.get("observaciones").is_none());

        Ok(())
    }

    #[test]
    fn customer_note_includes_document_when_present() {
        let customer = CustomerInfo {
            name: "Ana".to_string(),
            document: Some("12345678".to_string()),
        };

        assert_eq!(customer.note(), "Cliente: Ana (12345678)");
    }
}
