//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        categories::models::{Category, CategoryForm, CategoryId},
        rest::Resource,
    },
    gateway::{ApiClient, ApiError},
};

/// Backend calls for categories.
#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all categories.
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Retrieves one category.
    async fn get_category(&self, category: CategoryId) -> Result<Category, ApiError>;

    /// Creates a category and returns it as stored.
    async fn create_category(&self, form: CategoryForm) -> Result<Category, ApiError>;

    /// Updates a category and returns it as stored.
    async fn update_category(
        &self,
        category: CategoryId,
        form: CategoryForm,
    ) -> Result<Category, ApiError>;

    /// Deletes a category.
    async fn delete_category(&self, category: CategoryId) -> Result<(), ApiError>;
}

/// [`CategoriesService`] over the `categorias` endpoints.
#[derive(Debug, Clone)]
pub struct HttpCategoriesService {
    resource: Resource,
}

impl HttpCategoriesService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, "categorias", "categoria_id"),
        }
    }
}

#[async_trait]
impl CategoriesService for HttpCategoriesService {
    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.resource.list(&[]).await
    }

    async fn get_category(&self, category: CategoryId) -> Result<Category, ApiError> {
        self.resource.get(category).await
    }

    async fn create_category(&self, form: CategoryForm) -> Result<Category, ApiError> {
        self.resource.create(&form).await
    }

    async fn update_category(
        &self,
        category: CategoryId,
        form: CategoryForm,
    ) -> Result<Category, ApiError> {
        self.resource.update(category, &form).await
    }

    async fn delete_category(&self, category: CategoryId) -> Result<(), ApiError> {
        self.resource.delete(category).await
    }
}
