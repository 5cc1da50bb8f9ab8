//! Sales store.

use std::{
    collections::BTreeMap,
    fmt,
    sync::{Arc, Mutex, PoisonError},
};

use jiff::civil::Date;
use rust_decimal::Decimal;
use tracing::warn;

use revenge::checkout::CheckoutPayload;

use crate::{
    auth::UserId,
    domain::{
        dates::{now, today},
        result::ActionResult,
        sales::{
            models::{NewSale, Sale, SaleFilters, SaleId, SalesSummary},
            service::SalesService,
        },
        store::{Fetched, Insertion, Store},
    },
};

/// Sales, newest first.
pub struct SalesStore {
    service: Arc<dyn SalesService>,
    store: Store<Sale>,
    filters: Mutex<SaleFilters>,
}

impl fmt::Debug for SalesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SalesStore")
            .field("store", &self.store)
            .field("filters", &self.filters())
            .finish_non_exhaustive()
    }
}

impl SalesStore {
    /// An empty store over `service`.
    pub fn new(service: Arc<dyn SalesService>) -> Self {
        Self {
            service,
            store: Store::new("sales", Insertion::Prepend),
            filters: Mutex::new(SaleFilters::default()),
        }
    }

    /// Reload sales matching `filters`, which become the current filters.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; cached sales are kept.
    pub async fn fetch_all(&self, filters: SaleFilters) -> ActionResult<Fetched> {
        *self.filters.lock().unwrap_or_else(PoisonError::into_inner) = filters;

        self.store.fetch_all(self.service.list_sales(filters)).await
    }

    /// Reload with the current filters.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; cached sales are kept.
    pub async fn refresh(&self) -> ActionResult<Fetched> {
        self.fetch_all(self.filters()).await
    }

    /// Reload only today's sales.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; cached sales are kept.
    pub async fn fetch_today(&self) -> ActionResult<Fetched> {
        self.fetch_all(SaleFilters::on(today())).await
    }

    /// Load a sale with its lines as the current detail.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn fetch_one(&self, sale: SaleId) -> ActionResult<Sale> {
        self.store.fetch_one(self.service.get_sale(sale)).await
    }

    /// Register a sale for `cashier`; it goes to the front of the list.
    ///
    /// Once the server accepts the sale this succeeds: if the full record
    /// cannot be loaded, a stand-in built from the receipt is cached instead.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request, e.g. when stock ran out meanwhile.
    pub async fn create(&self, cashier: UserId, payload: CheckoutPayload) -> ActionResult<Sale> {
        let sale = NewSale {
            cashier_id: cashier,
            payload,
        };

        self.store
            .create(async {
                let receipt = self.service.create_sale(sale.clone()).await?;

                match self.service.get_sale(receipt.id).await {
                    Ok(created) => Ok(created),
                    Err(error) => {
                        warn!(sale = %receipt.id, %error, "sale registered but not reloaded");

                        Ok(receipt.into_sale(&sale, now().to_string()))
                    }
                }
            })
            .await
    }

    /// The filters of the last fetch.
    pub fn filters(&self) -> SaleFilters {
        *self.filters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached sales, newest first.
    pub fn sales(&self) -> Vec<Sale> {
        self.store.items()
    }

    /// The cached sale with this id.
    pub fn find(&self, sale: SaleId) -> Option<Sale> {
        self.store.find(sale)
    }

    /// The most recent sale.
    pub fn last(&self) -> Option<Sale> {
        self.store.with_items(|sales| sales.first().cloned())
    }

    /// The `count` most recent sales.
    pub fn latest(&self, count: usize) -> Vec<Sale> {
        self.store
            .with_items(|sales| sales.iter().take(count).cloned().collect())
    }

    /// Sales on `day` among the cached ones.
    pub fn summary_on(&self, day: Date) -> SalesSummary {
        self.store.with_items(|sales| {
            sales
                .iter()
                .filter(|sale| sale.is_on(day))
                .fold(SalesSummary::default(), |mut summary, sale| {
                    summary.add(sale);
                    summary
                })
        })
    }

    /// Today's sales among the cached ones.
    pub fn today_summary(&self) -> SalesSummary {
        self.summary_on(today())
    }

    /// Count and amount per payment method name.
    pub fn by_payment_method(&self) -> BTreeMap<String, SalesSummary> {
        self.store.with_items(|sales| {
            let mut groups: BTreeMap<String, SalesSummary> = BTreeMap::new();

            for sale in sales {
                groups.entry(sale.payment_label()).or_default().add(sale);
            }

            groups
        })
    }

    /// Number of cached sales.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Sum of the cached sales' totals.
    pub fn total_amount(&self) -> Decimal {
        self.store
            .with_items(|sales| sales.iter().map(|sale| sale.total).sum())
    }

    /// The sale loaded last by `fetch_one`.
    pub fn current(&self) -> Option<Sale> {
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
    use jiff::civil::date;
    use testresult::TestResult;

    use revenge::checkout::PaymentMethod;

    use super::*;
    use crate::{
        domain::sales::{models::UNSPECIFIED_PAYMENT, service::MockSalesService},
        gateway::{ApiError, TransportError},
        test::helpers::{receipt, sale},
    };

    #[tokio::test]
    async fn created_sale_goes_first_and_carries_cashier() -> TestResult {
        let mut service = MockSalesService::new();
        service
            .expect_list_sales()
            .returning(|_| Ok(vec![sale(1, "2025-01-13T09:00:00", "10.00", Some("Efectivo"))]));
        service
            .expect_create_sale()
            .withf(|new_sale| new_sale.cashier_id == UserId::new(2))
            .times(1)
            .returning(|_| Ok(receipt(2)));
        service
            .expect_get_sale()
            .withf(|id| *id == SaleId::new(2))
            .returning(|_| Ok(sale(2, "2025-01-14T10:00:00", "11.80", Some("Yape"))));

        let store = SalesStore::new(Arc::new(service));
        store.fetch_all(SaleFilters::default()).await?;
        store
            .create(
                UserId::new(2),
                CheckoutPayload {
                    items: Vec::new(),
                    payment_method: PaymentMethod::Yape,
                    notes: None,
                },
            )
            .await?;

        assert_eq!(store.last().map(|s| s.id.get()), Some(2));
        assert_eq!(store.count(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn accepted_sale_is_kept_when_reload_fails() -> TestResult {
        let mut service = MockSalesService::new();
        service
            .expect_create_sale()
            .times(1)
            .returning(|_| Ok(receipt(15)));
        service
            .expect_get_sale()
            .returning(|_| Err(ApiError::Transport(TransportError::Timeout)));

        let store = SalesStore::new(Arc::new(service));
        let created = store
            .create(
                UserId::new(2),
                CheckoutPayload {
                    items: Vec::new(),
                    payment_method: PaymentMethod::Yape,
                    notes: None,
                },
            )
            .await?;

        assert_eq!(created.id, SaleId::new(15));
        assert_eq!(created.receipt_number, "B001-000015");
        assert_eq!(created.payment_method(), Some(PaymentMethod::Yape));
        assert!(created.datetime().is_some());
        assert_eq!(store.last(), Some(created));

        Ok(())
    }

    #[tokio::test]
    async fn fetch_remembers_filters() -> TestResult {
        let mut service = MockSalesService::new();
        service
            .expect_list_sales()
            .withf(|filters| filters.payment_method == Some(PaymentMethod::Cash))
            .times(2)
            .returning(|_| Ok(Vec::new()));

        let store = SalesStore::new(Arc::new(service));
        store
            .fetch_all(SaleFilters {
                payment_method: Some(PaymentMethod::Cash),
                ..SaleFilters::default()
            })
            .await?;
        store.refresh().await?;

        assert_eq!(store.filters().payment_method, Some(PaymentMethod::Cash));

        Ok(())
    }

    #[tokio::test]
    async fn summaries_group_cached_sales() -> TestResult {
        let mut service = MockSalesService::new();
        service.expect_list_sales().returning(|_| {
            Ok(vec![
                sale(3, "2025-01-14T18:00:00", "5.00", Some("Yape")),
                sale(2, "2025-01-14T10:00:00", "11.80", None),
                sale(1, "2025-01-13T09:00:00", "10.00", Some("Yape")),
            ])
        });

        let store = SalesStore::new(Arc::new(service));
        store.fetch_all(SaleFilters::default()).await?;

        let day = store.summary_on(date(2025, 1, 14));
        assert_eq!(day.count, 2);
        assert_eq!(day.amount, Decimal::new(1680, 2));

        let groups = store.by_payment_method();
        assert_eq!(groups.get("Yape").map(|g| g.count), Some(2));
        assert_eq!(groups.get(UNSPECIFIED_PAYMENT).map(|g| g.count), Some(1));

        assert_eq!(store.total_amount(), Decimal::new(2680, 2));
        assert_eq!(store.latest(2).len(), 2);

        Ok(())
    }
}
