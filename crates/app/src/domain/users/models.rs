//! User account models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    auth::{Role, User, UserId},
    domain::{status::Status, store::Entity},
};

/// A user account as the administrator manages it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserAccount {
    /// Backend id
    pub id: UserId,

    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Login email
    pub email: String,

    /// Role, which decides the screens
    #[serde(rename = "rol_id")]
    pub role: Role,

    /// Role name as the backend spells it
    #[serde(rename = "rol_nombre", default)]
    pub role_name: String,

    /// Inactive accounts cannot log in
    #[serde(rename = "estado_id", default)]
    pub status: Status,
}

impl Entity for UserAccount {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

impl From<&UserAccount> for User {
    fn from(account: &UserAccount) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
            role_name: account.role_name.clone(),
        }
    }
}

/// Create or update form. The password is required on create and optional on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
pub struct UserForm {
    /// Display name
    #[serde(rename = "nombre")]
    #[validate(length(min = 1, max = 100, message = "el nombre es requerido"))]
    pub name: String,

    /// Login email
    #[validate(email(message = "email inválido"))]
    pub email: String,

    /// At least 6 characters; `None` keeps the current one
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "la contraseña debe tener al menos 6 caracteres"))]
    pub password: Option<String>,

    /// Role
    #[serde(rename = "rol_id")]
    pub role: Role,

    /// Left unchanged when `None`
    #[serde(rename = "estado_id", skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// Edit form of an existing account; the password is left unchanged.
impl From<&UserAccount> for UserForm {
    fn from(account: &UserAccount) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            password: None,
            role: account.role,
            status: Some(account.status),
        }
    }
}
