//! Categories store.

use std::{fmt, sync::Arc};

use validator::Validate;

use crate::domain::{
    categories::{
        models::{Category, CategoryForm, CategoryId},
        service::CategoriesService,
    },
    result::ActionResult,
    store::{Fetched, Insertion, Store},
};

/// Categories, in server order.
pub struct CategoriesStore {
    service: Arc<dyn CategoriesService>,
    store: Store<Category>,
}

impl fmt::Debug for CategoriesStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CategoriesStore")
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

impl CategoriesStore {
    /// An empty store over `service`.
    pub fn new(service: Arc<dyn CategoriesService>) -> Self {
        Self {
            service,
            store: Store::new("categories", Insertion::Append),
        }
    }

    /// Reload every category.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request; cached categories are kept.
    pub async fn fetch_all(&self) -> ActionResult<Fetched> {
        self.store.fetch_all(self.service.list_categories()).await
    }

    /// Load one category as the current detail.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request.
    pub async fn fetch_one(&self, category: CategoryId) -> ActionResult<Category> {
        self.store
            .fetch_one(self.service.get_category(category))
            .await
    }

    /// Create a category. An invalid form is never sent.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn create(&self, form: CategoryForm) -> ActionResult<Category> {
        form.validate()?;

        self.store.create(self.service.create_category(form)).await
    }

    /// Update a category. An invalid form is never sent.
    ///
    /// # Errors
    ///
    /// Returns a validation failure or the failure of the request.
    pub async fn update(&self, category: CategoryId, form: CategoryForm) -> ActionResult<Category> {
        form.validate()?;

        self.store
            .update(category, self.service.update_category(category, form))
            .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns the failure of the request, e.g. when products still use it.
    pub async fn delete(&self, category: CategoryId) -> ActionResult<()> {
        self.store
            .delete(category, self.service.delete_category(category))
            .await
    }

    /// Cached categories.
    pub fn categories(&self) -> Vec<Category> {
        self.store.items()
    }

    /// Active categories.
    pub fn active(&self) -> Vec<Category> {
        self.store.filter(|category| category.status.is_active())
    }

    /// The cached category with this id.
    pub fn find(&self, category: CategoryId) -> Option<Category> {
        self.store.find(category)
    }

    /// The category loaded last by `fetch_one`.
    pub fn current(&self) -> Option<Category> {
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
        domain::{categories::service::MockCategoriesService, result::FailureKind, status::Status},
        gateway::ApiError,
        test::helpers::category,
    };

    #[tokio::test]
    async fn invalid_form_is_never_sent() {
        let mut service = MockCategoriesService::new();
        service.expect_create_category().never();

        let store = CategoriesStore::new(Arc::new(service));
        let result = store.create(CategoryForm::default()).await;

        assert!(matches!(result, Err(failure) if failure.kind == FailureKind::Validation));
    }

    #[tokio::test]
    async fn active_skips_inactive_categories() -> TestResult {
        let mut service = MockCategoriesService::new();
        service.expect_list_categories().returning(|| {
            let mut retired = category(2, "Retirados");
            retired.status = Status::Inactive;

            Ok(vec![category(1, "Bebidas"), retired])
        });

        let store = CategoriesStore::new(Arc::new(service));
        store.fetch_all().await?;

        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.active(), [category(1, "Bebidas")]);

        Ok(())
    }

    #[tokio::test]
    async fn rejected_delete_keeps_category_and_message() -> TestResult {
        let mut service = MockCategoriesService::new();
        service
            .expect_list_categories()
            .returning(|| Ok(vec![category(1, "Bebidas")]));
        service.expect_delete_category().returning(|_| {
            Err(ApiError::Rejected {
                status: 400,
                message: "No se puede eliminar: tiene productos asociados".to_string(),
            })
        });

        let store = CategoriesStore::new(Arc::new(service));
        store.fetch_all().await?;

        let result = store.delete(CategoryId::new(1)).await;

        assert_eq!(
            result.map_err(|failure| failure.message),
            Err("No se puede eliminar: tiene productos asociados".to_string())
        );
        assert!(store.find(CategoryId::new(1)).is_some());

        Ok(())
    }
}
