//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    auth::UserId,
    domain::{
        rest::Resource,
        users::models::{UserAccount, UserForm},
    },
    gateway::{ApiClient, ApiError},
};

/// Backend calls for user accounts.
#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Retrieves all user accounts.
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError>;

    /// Retrieves one user account.
    async fn get_user(&self, user: UserId) -> Result<UserAccount, ApiError>;

    /// Creates an account and returns it as stored.
    async fn create_user(&self, form: UserForm) -> Result<UserAccount, ApiError>;

    /// Updates an account and returns it as stored.
    async fn update_user(&self, user: UserId, form: UserForm) -> Result<UserAccount, ApiError>;

    /// Deletes an account.
    async fn delete_user(&self, user: UserId) -> Result<(), ApiError>;
}

/// [`UsersService`] over the `usuarios` endpoints.
#[derive(Debug, Clone)]
pub struct HttpUsersService {
    resource: Resource,
}

impl HttpUsersService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, "usuarios", "usuario_id"),
        }
    }
}

#[async_trait]
impl UsersService for HttpUsersService {
    async fn list_users(&self) -> Result<Vec<UserAccount>, ApiError> {
        self.resource.list(&[]).await
    }

    async fn get_user(&self, user: UserId) -> Result<UserAccount, ApiError> {
        self.resource.get(user).await
    }

    async fn create_user(&self, form: UserForm) -> Result<UserAccount, ApiError> {
        self.resource.create(&form).await
    }

    async fn update_user(&self, user: UserId, form: UserForm) -> Result<UserAccount, ApiError> {
        self.resource.update(user, &form).await
    }

    async fn delete_user(&self, user: UserId) -> Result<(), ApiError> {
        self.resource.delete(user).await
    }
}
