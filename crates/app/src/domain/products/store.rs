//! Products store.

use std::{fmt, sync::Arc};

use rust_decimal::Decimal;
use validator::Validate;

use revenge::products::ProductId;

use crate::domain::{
    categories::models::CategoryId,
    products::{
        models::{Product, ProductForm},
        service::ProductsService,
    },
    result::{ActionFailure, ActionResult},
    store::{Fetched, Insertion, Store},
};

/// Product catalog, in server order.
pub struct ProductsStore {
    service: Arc<dyn ProductsService>,
    store: Store<Product>,
}

impl fmt::Debug for ProductsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductsStore")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl ProductsStore {
    /// An empty store over `service`.
    pub fn new(service: Arc<dyn ProductsService>) -> Self {
        Self {
            service,
            store: Store::new("products", Insertion::Append),
        }
    }

    /// Reload the catalog.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; the cached catalog is kept.
    pub async fn fetch_all(&self) -> ActionResult<Fetched> {
        self.store.fetch_all(self.service.list_products()).await
    }

    /// Load one product as the current detail.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn fetch_one(&self, product: ProductId) -> ActionResult<Product> {
        self.store.fetch_one(self.service.get_product(product)).await
    }

    /// Find a product by barcode on the server. The cache is not touched.
    ///
    /// # Errors
    ///
    /// Returns a validation failure for a blank code, or the failure of the
    /// request, e.g. when no product has that barcode.
    pub async fn search_by_barcode(&self, barcode: &str) -> ActionResult<Product> {
        let barcode = barcode.trim();

        if barcode.is_empty() {
            return Err(ActionFailure::validation("ingrese un código de barras"));
        }

        self.service
            .search_by_barcode(barcode.to_string())
            .await
            .map_err(ActionFailure::from)
    }

    /// Ask the server for products low on stock. The cache is not touched.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn fetch_low_stock(&self) -> ActionResult<Vec<Product>> {
        self.service
            .list_low_stock()
            .await
            .map_err(ActionFailure::from)
    }

    /// Create a product. An invalid form is never sent.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request, e.g. a
    /// duplicate barcode.
    pub async fn create(&self, form: ProductForm) -> ActionResult<Product> {
        form.validate()?;

        self.store.create(self.service.create_product(form)).await
    }

    /// Update a product. An invalid form is never sent.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn update(&self, product: ProductId, form: ProductForm) -> ActionResult<Product> {
        form.validate()?;

        self.store
            .update(product, self.service.update_product(product, form))
            .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn delete(&self, product: ProductId) -> ActionResult<()> {
        self.store
            .delete(product, self.service.delete_product(product))
            .await
    }

    /// Cached products.
    pub fn products(&self) -> Vec<Product> {
        self.store.items()
    }

    /// The cached product with this id.
    pub fn find(&self, product: ProductId) -> Option<Product> {
        self.store.find(product)
    }

    /// A cached product with exactly this barcode.
    pub fn find_by_barcode(&self, barcode: &str) -> Option<Product> {
        self.store.with_items(|products| {
            products
                .iter()
                .find(|product| product.barcode == barcode)
                .cloned()
        })
    }

    /// Cached products of `category`.
    pub fn by_category(&self, category: CategoryId) -> Vec<Product> {
        self.store.filter(|product| product.category_id == category)
    }

    /// Active products.
    pub fn active(&self) -> Vec<Product> {
        self.store.filter(|product| product.status.is_active())
    }

    /// Cached products at or below their minimum stock.
    pub fn low_stock(&self) -> Vec<Product> {
        self.store.filter(Product::is_low_stock)
    }

    /// Cached products with no units left.
    pub fn out_of_stock(&self) -> Vec<Product> {
        self.store.filter(Product::is_out_of_stock)
    }

    /// Number of cached products.
    pub fn count(&self) -> usize {
        self.store.len()
    }

    /// Purchase value of everything in stock.
    pub fn inventory_value(&self) -> Decimal {
        self.store
            .with_items(|products| products.iter().map(Product::inventory_value).sum())
    }

    /// The product loaded last by `fetch_one`.
    pub fn current(&self) -> Option<Product> {
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
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{products::service::MockProductsService, result::FailureKind},
        gateway::{ApiError, TransportError},
        test::helpers::{product, product_form},
    };

    fn catalog() -> Vec<Product> {
        let mut empty = product(3, "7750000000031", 0);
        empty.category_id = CategoryId::new(2);

        vec![
            product(1, "7750000000017", 20),
            product(2, "7750000000024", 5),
            empty,
        ]
    }

    async fn loaded() -> Result<ProductsStore, ActionFailure> {
        let mut service = MockProductsService::new();
        service.expect_list_products().returning(|| Ok(catalog()));

        let store = ProductsStore::new(Arc::new(service));
        store.fetch_all().await?;

        Ok(store)
    }

    #[tokio::test]
    async fn derived_getters_follow_stock_levels() -> TestResult {
        let store = loaded().await?;

        let low: Vec<_> = store.low_stock().iter().map(|p| p.id.get()).collect();
        let out: Vec<_> = store.out_of_stock().iter().map(|p| p.id.get()).collect();

        assert_eq!(low, [2, 3]);
        assert_eq!(out, [3]);
        assert_eq!(store.by_category(CategoryId::new(2)).len(), 1);
        assert_eq!(store.count(), 3);

        // 25 units at 1.80
        assert_eq!(store.inventory_value(), Decimal::new(4500, 2));

        Ok(())
    }

    #[tokio::test]
    async fn transport_failure_keeps_loaded_catalog() -> TestResult {
        let mut service = MockProductsService::new();
        let mut calls = 0;
        service.expect_list_products().returning(move || {
            calls += 1;

            if calls == 1 {
                Ok(catalog())
            } else {
                Err(ApiError::Transport(TransportError::Timeout))
            }
        });

        let store = ProductsStore::new(Arc::new(service));
        store.fetch_all().await?;

        let result = store.fetch_all().await;

        assert!(matches!(result, Err(failure) if failure.kind == FailureKind::Transport));
        assert_eq!(store.products(), catalog());
        assert!(store.error().is_some());

        Ok(())
    }

    #[tokio::test]
    async fn created_product_is_appended() -> TestResult {
        let store = loaded().await?;
        let mut service = MockProductsService::new();
        service
            .expect_create_product()
            .times(1)
            .returning(|_| Ok(product(4, "7750000000048", 12)));

        let store = ProductsStore {
            service: Arc::new(service),
            store: store.store,
        };

        store.create(product_form("7750000000048")).await?;

        assert_eq!(store.products().last().map(|p| p.id.get()), Some(4));
        assert!(store.find_by_barcode("7750000000048").is_some());

        Ok(())
    }

    #[tokio::test]
    async fn blank_barcode_search_is_not_sent() {
        let mut service = MockProductsService::new();
        service.expect_search_by_barcode().never();

        let store = ProductsStore::new(Arc::new(service));

        assert!(store.search_by_barcode("  ").await.is_err());
    }
}
