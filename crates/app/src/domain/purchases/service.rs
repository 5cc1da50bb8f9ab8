//! Purchases service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::{
        purchases::models::{NewPurchase, Purchase, PurchaseFilters, PurchaseId},
        rest::Resource,
    },
    gateway::{ApiClient, ApiError},
};

/// Backend calls for supplier purchases.
#[automock]
#[async_trait]
pub trait PurchasesService: Send + Sync {
    /// Retrieves purchases matching `filters`, newest first.
    async fn list_purchases(&self, filters: PurchaseFilters) -> Result<Vec<Purchase>, ApiError>;

    /// A purchase with its lines.
    async fn get_purchase(&self, purchase: PurchaseId) -> Result<Purchase, ApiError>;

    /// Registers a purchase, which adds its units to stock, and returns it as stored.
    async fn create_purchase(&self, purchase: NewPurchase) -> Result<Purchase, ApiError>;
}

/// [`PurchasesService`] over the `compras` endpoints.
#[derive(Debug, Clone)]
pub struct HttpPurchasesService {
    resource: Resource,
}

impl HttpPurchasesService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self {
            resource: Resource::new(api, "compras", "compra_id"),
        }
    }
}

#[async_trait]
impl PurchasesService for HttpPurchasesService {
    async fn list_purchases(&self, filters: PurchaseFilters) -> Result<Vec<Purchase>, ApiError> {
        self.resource.list(&filters.to_query()).await
    }

    async fn get_purchase(&self, purchase: PurchaseId) -> Result<Purchase, ApiError> {
        self.resource.get(purchase).await
    }

    async fn create_purchase(&self, purchase: NewPurchase) -> Result<Purchase, ApiError> {
        self.resource.create(&purchase).await
    }
}
