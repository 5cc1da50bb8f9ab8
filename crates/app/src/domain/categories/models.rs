//! Category models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use revenge::ids::TypedId;

use crate::domain::{status::Status, store::Entity};

/// Category Id
pub type CategoryId = TypedId<Category>;

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    /// Backend id
    pub id: CategoryId,

    /// Category name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Optional description
    #[serde(rename = "descripcion", default)]
    pub description: Option<String>,

    /// Whether it is in use
    #[serde(rename = "estado_id", default)]
    pub status: Status,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
        self.id
    }
}

/// Create or update form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Validate)]
pub struct CategoryForm {
    /// Category name, 1 to 100 characters
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 100, message = "el nombre es requerido (máx. 100 caracteres)"))]
    pub name: String,

    /// Up to 255 characters
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 255, message = "la descripción no debe exceder 255 caracteres"))]
    pub description: Option<String>,

    /// Left unchanged when `None`
    #[serde(rename = "estado_id", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            description: category.description.clone(),
            status: Some(category.status),
        }
    }
}
