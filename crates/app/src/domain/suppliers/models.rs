//! Supplier models.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use revenge::ids::TypedId;

use crate::domain::{status::Status, store::Entity};

/// Supplier Id
pub type SupplierId = TypedId<Supplier>;

/// A supplier purchases are bought from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Supplier {
    /// Backend id
    pub id: SupplierId,

    /// Business name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Peruvian tax id.
    #[serde(default)]
    pub ruc: Option<String>,

    /// Phone
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,

    /// Address
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,

    /// Email
    #[serde(default)]
    pub email: Option<String>,

    /// Contact person
    #[serde(rename = "contacto", default)]
    pub contact: Option<String>,

    /// Whether it is in use
    #[serde(rename = "estado_id", default)]
    pub status: Status,
}

impl Entity for Supplier {
    type Id = SupplierId;

    fn id(&self) -> SupplierId {
        self.id
    }
}

/// Create or update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct SupplierForm {
    /// Business name, required
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 150, message = "el nombre es requerido"))]
    pub name: String,

    /// Eleven digits when given
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_ruc"))]
    pub ruc: Option<String>,

    /// Up to 20 characters
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 20, message = "el teléfono no debe exceder 20 caracteres"))]
    pub phone: Option<String>,

    /// Address
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// Must be a valid email when given
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,

    /// Contact person
    #[serde(rename = "contacto", skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl From<&Supplier> for SupplierForm {
    fn from(supplier: &Supplier) -> Self {
        Self {
            name: supplier.name.clone(),
            ruc: supplier.ruc.clone(),
            phone: supplier.phone.clone(),
            address: supplier.address.clone(),
            email: supplier.email.clone(),
            contact: supplier.contact.clone(),
        }
    }
}

/// A RUC is eleven digits.
fn validate_ruc(ruc: &str) -> Result<(), ValidationError> {
    if ruc.len() == 11 && ruc.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(());
    }

    let mut error = ValidationError::new("ruc");
    error.message = Some("el RUC debe tener 11 dígitos".into());

    Err(error)
}
