//! Auth data models.

use serde::{Deserialize, Serialize};
use validator::Validate;

use revenge::ids::TypedId;

use crate::auth::roles::Role;

/// User Id
pub type UserId = TypedId<User>;

/// The logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
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
}

/// User and bearer token, as persisted between commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Who is logged in
    pub user: User,
    /// Bearer token for every request
    pub token: String,
}

/// Login form.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct Credentials {
    /// Login email
    #[validate(email(message = "enter a valid email"))]
    pub email: String,

    /// Password, sent as typed
    #[validate(length(min = 1, message = "the password is required"))]
    pub password: String,
}

/// Body of a successful login: the user fields plus the token, flat.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}

impl From<LoginData> for Session {
    fn from(data: LoginData) -> Self {
        Self {
            user: data.user,
            token: data.token,
        }
    }
}
