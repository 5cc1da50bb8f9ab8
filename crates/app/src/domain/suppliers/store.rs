//! Suppliers store.

use std::{fmt, sync::Arc};

use validator::Validate;

use crate::domain::{
    suppliers::{
        models::{Supplier, SupplierForm, SupplierId},
        service::SuppliersService,
    },
    result::ActionResult,
    store::{Fetched, Insertion, Store},
};

/// Suppliers, in server order.
pub struct SuppliersStore {
    service: Arc<dyn SuppliersService>,
    store: Store<Supplier>,
}

impl fmt::Debug for SuppliersStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuppliersStore")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl SuppliersStore {
    /// An empty store over `service`.
    pub fn new(service: Arc<dyn SuppliersService>) -> Self {
        Self {
            service,
            store: Store::new("suppliers", Insertion::Append),
        }
    }

    /// Reload every supplier.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; cached suppliers are kept.
    pub async fn fetch_all(&self) -> ActionResult<Fetched> {
        self.store.fetch_all(self.service.list_suppliers()).await
    }

    /// Load one supplier as the current detail.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn fetch_one(&self, supplier: SupplierId) -> ActionResult<Supplier> {
        self.store
            .fetch_one(self.service.get_supplier(supplier))
            .await
    }

    /// Create a supplier. An invalid form is never sent.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn create(&self, form: SupplierForm) -> ActionResult<Supplier> {
        form.validate()?;

        self.store.create(self.service.create_supplier(form)).await
    }

    /// Update a supplier. An invalid form is never sent.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn update(&self, supplier: SupplierId, form: SupplierForm) -> ActionResult<Supplier> {
        form.validate()?;

        self.store
            .update(supplier, self.service.update_supplier(supplier, form))
            .await
    }

    /// Delete a supplier.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn delete(&self, supplier: SupplierId) -> ActionResult<()> {
        self.store
            .delete(supplier, self.service.delete_supplier(supplier))
            .await
    }

    /// Cached suppliers.
    pub fn suppliers(&self) -> Vec<Supplier> {
        self.store.items()
    }

    /// Active suppliers.
    pub fn active(&self) -> Vec<Supplier> {
        self.store.filter(|supplier| supplier.status.is_active())
    }

    /// The cached supplier with this id.
    pub fn find(&self, supplier: SupplierId) -> Option<Supplier> {
        self.store.find(supplier)
    }

    /// The cached supplier with tax id `ruc`.
    pub fn find_by_ruc(&self, ruc: &str) -> Option<Supplier> {
        self.store.with_items(|suppliers| {
            suppliers
                .iter()
                .find(|supplier| supplier.ruc.as_deref() == Some(ruc))
                .cloned()
        })
    }

    /// The supplier loaded last by `fetch_one`.
    pub fn current(&self) -> Option<Supplier> {
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
    use crate::{domain::suppliers::service::MockSuppliersService, test::helpers::supplier};

    #[tokio::test]
    async fn update_replaces_cached_supplier() -> TestResult {
        let mut service = MockSuppliersService::new();
        service
            .expect_list_suppliers()
            .returning(|| Ok(vec![supplier(1, "Distribuidora Norte")]));
        service
            .expect_update_supplier()
            .withf(|id, form| id.get() == 1 && form.name == "Distribuidora Sur")
            .returning(|_, _| Ok(supplier(1, "Distribuidora Sur")));

        let store = SuppliersStore::new(Arc::new(service));
        store.fetch_all().await?;
        store
            .update(
                SupplierId::new(1),
                SupplierForm {
                    name: "Distribuidora Sur".to_string(),
                    ..SupplierForm::default()
                },
            )
            .await?;

        assert_eq!(
            store.find(SupplierId::new(1)).map(|s| s.name),
            Some("Distribuidora Sur".to_string())
        );
        assert!(store.find_by_ruc("20601234567").is_some());

        Ok(())
    }
}
