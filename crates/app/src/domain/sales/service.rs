//! Sales service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        rest::Resource,
        sales::models::{NewSale, Sale, SaleFilters, SaleId, SaleReceipt},
    },
    gateway::{ApiClient, ApiError},
};

/// Backend calls for sales.
#[automock]
#[async_trait]
pub trait SalesService: Send + Sync {
    /// Retrieves sales matching `filters`, newest first.
    async fn list_sales(&self, filters: SaleFilters) -> Result<Vec<Sale>, ApiError>;

    /// A sale with its lines.
    async fn get_sale(&self, sale: SaleId) -> Result<Sale, ApiError>;

    /// Register a sale. The answer carries the id and receipt number only;
    /// load the full record with [`SalesService::get_sale`].
    async fn create_sale(&self, sale: NewSale) -> Result<SaleReceipt, ApiError>;
}

/// [`SalesService`] over the `ventas` endpoints.
#[derive(Debug, Clone)]
pub struct HttpSalesService {
    resource: Resource,
}

impl HttpSalesService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, "ventas", "venta_id"),
        }
    }
}

#[async_trait]
impl SalesService for HttpSalesService {
    async fn list_sales(&self, filters: SaleFilters) -> Result<Vec<Sale>, ApiError> {
        self.resource.list(&filters.to_query()).await
    }

    async fn get_sale(&self, sale: SaleId) -> Result<Sale, ApiError> {
        self.resource.get(sale).await
    }

    async fn create_sale(&self, sale: NewSale) -> Result<SaleReceipt, ApiError> {
        self.resource.post(&sale).await
    }
}
