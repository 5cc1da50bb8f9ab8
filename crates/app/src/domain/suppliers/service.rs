//! Suppliers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        suppliers::models::{Supplier, SupplierForm, SupplierId},
        rest::Resource,
    },
    gateway::{ApiClient, ApiError},
};

/// Backend calls for suppliers.
#[automock]
#[async_trait]
pub trait SuppliersService: Send + Sync {
    /// Retrieves all suppliers.
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError>;

    /// Retrieves one supplier.
    async fn get_supplier(&self, supplier: SupplierId) -> Result<Supplier, ApiError>;

    /// Creates a supplier and returns it as stored.
    async fn create_supplier(&self, form: SupplierForm) -> Result<Supplier, ApiError>;

    /// Updates a supplier and returns it as stored.
    async fn update_supplier(
        &self,
        supplier: SupplierId,
        form: SupplierForm,
    ) -> Result<Supplier, ApiError>;

    /// Deletes a supplier.
    async fn delete_supplier(&self, supplier: SupplierId) -> Result<(), ApiError>;
}

/// [`SuppliersService`] over the `proveedores` endpoints.
#[derive(Debug, Clone)]
pub struct HttpSuppliersService {
    resource: Resource,
}

impl HttpSuppliersService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, "proveedores", "proveedor_id"),
        }
    }
}

#[async_trait]
impl SuppliersService for HttpSuppliersService {
    async fn list_suppliers(&self) -> Result<Vec<Supplier>, ApiError> {
        self.resource.list(&[]).await
    }

    async fn get_supplier(&self, supplier: SupplierId) -> Result<Supplier, ApiError> {
        self.resource.get(supplier).await
    }

    async fn create_supplier(&self, form: SupplierForm) -> Result<Supplier, ApiError> {
        self.resource.create(&form).await
    }

    async fn update_supplier(
        &self,
        supplier: SupplierId,
        form: SupplierForm,
    ) -> Result<Supplier, ApiError> {
        self.resource.update(supplier, &form).await
    }

    async fn delete_supplier(&self, supplier: SupplierId) -> Result<(), ApiError> {
        self.resource.delete(supplier).await
    }
}
