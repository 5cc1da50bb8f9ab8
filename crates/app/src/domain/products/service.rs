//! Products service.

use async_trait::async_trait;
use mockall::automock;

use revenge::products::ProductId;

use crate::{
    domain::{
        products::models::{Product, ProductForm},
        rest::Resource,
    },
    gateway::{ApiClient, ApiError},
};

/// Backend calls for products.
#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves all products.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Retrieves one product.
    async fn get_product(&self, product: ProductId) -> Result<Product, ApiError>;

    /// Look a product up by its exact barcode.
    async fn search_by_barcode(&self, barcode: String) -> Result<Product, ApiError>;

    /// Products at or below their minimum stock, as the server computes it.
    async fn list_low_stock(&self) -> Result<Vec<Product>, ApiError>;

    /// Creates a product and returns it as stored.
    async fn create_product(&self, form: ProductForm) -> Result<Product, ApiError>;

    /// Updates a product and returns it as stored.
    async fn update_product(
        &self,
        product: ProductId,
        form: ProductForm,
    ) -> Result<Product, ApiError>;

    /// Deletes a product.
    async fn delete_product(&self, product: ProductId) -> Result<(), ApiError>;
}

/// [`ProductsService`] over the `productos` endpoints.
#[derive(Debug, Clone)]
pub struct HttpProductsService {
    resource: Resource,
}

impl HttpProductsService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, "productos", "producto_id"),
        }
    }
}

#[async_trait]
impl ProductsService for HttpProductsService {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.resource.list(&[]).await
    }

    async fn get_product(&self, product: ProductId) -> Result<Product, ApiError> {
        self.resource.get(product).await
    }

    async fn search_by_barcode(&self, barcode: String) -> Result<Product, ApiError> {
        self.resource
            .api()
            .get(&self.resource.path("buscar"), &[("codigo", barcode)])
            .await
    }

    async fn list_low_stock(&self) -> Result<Vec<Product>, ApiError> {
        self.resource
            .api()
            .get(&self.resource.path("stock-bajo"), &[])
            .await
    }

    async fn create_product(&self, form: ProductForm) -> Result<Product, ApiError> {
        self.resource.create(&form).await
    }

    async fn update_product(
        &self,
        product: ProductId,
        form: ProductForm,
    ) -> Result<Product, ApiError> {
        self.resource.update(product, &form).await
    }

    async fn delete_product(&self, product: ProductId) -> Result<(), ApiError> {
        self.resource.delete(product).await
    }
}
