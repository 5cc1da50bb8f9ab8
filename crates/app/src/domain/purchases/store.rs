//! Purchases store.

use std::{
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use rust_decimal::Decimal;
use validator::Validate;

use crate::{
    auth::UserId,
    domain::{
        purchases::{
            models::{NewPurchase, Purchase, PurchaseFilters, PurchaseId},
            service::PurchasesService,
        },
        result::ActionResult,
        store::{Fetched, Insertion, Store},
    },
};

/// Purchases, newest first.
pub struct PurchasesStore {
    service: Arc<dyn PurchasesService>,
    store: Store<Purchase>,
    filters: Mutex<PurchaseFilters>,
}

impl fmt::Debug for PurchasesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PurchasesStore")
            .field("store", &self.store)
            .field("filters", &self.filters())
            .finish_non_exhaustive()
    }
}

impl PurchasesStore {
    /// An empty store over `service`.
    pub fn new(service: Arc<dyn PurchasesService>) -> Self {
        Self {
            service,
            store: Store::new("purchases", Insertion::Prepend),
            filters: Mutex::new(PurchaseFilters::default()),
        }
    }

    /// Reload purchases matching `filters`, which become the current filters.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; cached purchases are kept.
    pub async fn fetch_all(&self, filters: PurchaseFilters) -> ActionResult<Fetched> {
        *self.filters.lock().unwrap_or_else(PoisonError::into_inner) = filters;

        self.store
            .fetch_all(self.service.list_purchases(filters))
            .await
    }

    /// Load a purchase with its lines as the current detail.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn fetch_one(&self, purchase: PurchaseId) -> ActionResult<Purchase> {
        self.store
            .fetch_one(self.service.get_purchase(purchase))
            .await
    }

    /// Register a purchase made by `user`. An invalid purchase is never sent.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn create(&self, user: UserId, mut purchase: NewPurchase) -> ActionResult<Purchase> {
        purchase.validate()?;
        purchase.user_id = Some(user);

        self.store
            .create(self.service.create_purchase(purchase))
            .await
    }

    /// The filters of the last fetch.
    pub fn filters(&self) -> PurchaseFilters {
        *self.filters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached purchases, newest first.
    pub fn purchases(&self) -> Vec<Purchase> {
        self.store.items()
    }

    /// The cached purchase with this id.
    pub fn find(&self, purchase: PurchaseId) -> Option<Purchase> {
        self.store.find(purchase)
    }

    /// Number of cached purchases.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Sum of the cached purchases' totals.
    pub fn total_amount(&self) -> Decimal {
        self.store
            .with_items(|purchases| purchases.iter().map(|purchase| purchase.total).sum())
    }

    /// The purchase loaded last by `fetch_one`.
    pub fn current(&self) -> Option<Purchase> {
        self.store.current()
    }

    /// Whether an action is in flight.
    pub fn is_loading(&self) -> bool {
        self.store.is_loading()
    }

    /// Message of the last failed action.
    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    /// Forget everything, e.g. on logout.
    pub fn reset(&self) {
        self.store.reset();
    }
}

#[cfg(test)]
mod tests {
    use revenge::products::ProductId;
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{
            purchases::{models::PurchaseItem, service::MockPurchasesService},
            suppliers::models::SupplierId,
        },
        test::helpers::purchase,
    };

    #[tokio::test]
    async fn create_stamps_user_and_prepends() -> TestResult {
        let mut service = MockPurchasesService::new();
        service
            .expect_list_purchases()
            .returning(|_| Ok(vec![purchase(1, "120.00")]));
        service
            .expect_create_purchase()
            .withf(|new| new.user_id == Some(UserId::new(3)))
            .returning(|_| Ok(purchase(2, "21.60")));

        let store = PurchasesStore::new(Arc::new(service));
        store.fetch_all(PurchaseFilters::default()).await?;
        store
            .create(
                UserId::new(3),
                NewPurchase {
                    supplier_id: SupplierId::new(1),
                    user_id: None,
                    invoice_number: None,
                    notes: None,
                    items: vec![PurchaseItem {
                        product_id: ProductId::new(1),
                        quantity: 12,
                        unit_price: Decimal::new(180, 2),
                    }],
                },
            )
            .await?;

        assert_eq!(store.purchases().first().map(|p| p.id.get()), Some(2));
        assert_eq!(store.total_amount(), Decimal::new(14160, 2));

        Ok(())
    }
}
