//! App Context

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{
    auth::{AuthService, FileSessionStorage, HttpAuthService, SessionManager},
    config::Settings,
    domain::{
        categories::{CategoriesStore, HttpCategoriesService},
        products::{HttpProductsService, ProductsStore},
        purchases::{HttpPurchasesService, PurchasesStore},
        reports::{HttpReportsService, ReportsStore},
        sales::{HttpSalesService, SalesStore},
        suppliers::{HttpSuppliersService, SuppliersStore},
        users::{HttpUsersService, UsersStore},
    },
    gateway::{ApiClient, HttpTransport, Transport, TransportError},
    views::{checkout::CheckoutSession, dashboard::DashboardView},
};

/// Failure to build the context.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Transport(#[source] TransportError),
}

/// Everything a command needs, built once at startup.
#[derive(Clone)]
pub struct AppContext {
    /// Validated configuration.
    pub settings: Settings,
    /// The one session every store and the gateway share.
    pub session: Arc<SessionManager>,
    /// Login and logout calls.
    pub auth: Arc<dyn AuthService>,
    /// Products cache.
    pub products: Arc<ProductsStore>,
    /// Categories cache.
    pub categories: Arc<CategoriesStore>,
    /// Suppliers cache.
    pub suppliers: Arc<SuppliersStore>,
    /// User accounts cache.
    pub users: Arc<UsersStore>,
    /// Sales cache, newest first.
    pub sales: Arc<SalesStore>,
    /// Purchases cache, newest first.
    pub purchases: Arc<PurchasesStore>,
    /// Last report of each kind.
    pub reports: Arc<ReportsStore>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build the context against the configured backend, restoring any
    /// persisted session.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_settings(settings: Settings) -> Result<Self, AppInitError> {
        let transport = HttpTransport::new(&settings.api).map_err(AppInitError::Transport)?;

        let session = SessionManager::new(Arc::new(FileSessionStorage::new(
            settings.session_file.clone(),
        )));
        session.rehydrate();

        Ok(Self::with_transport(
            settings,
            Arc::new(session),
            Arc::new(transport),
        ))
    }

    /// Wire every service and store over `transport`.
    pub fn with_transport(
        settings: Settings,
        session: Arc<SessionManager>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let api = ApiClient::new(transport, Arc::clone(&session));

        Self {
            auth: Arc::new(HttpAuthService::new(api.clone())),
            products: Arc::new(ProductsStore::new(Arc::new(HttpProductsService::new(
                api.clone(),
            )))),
            categories: Arc::new(CategoriesStore::new(Arc::new(
                HttpCategoriesService::new(api.clone()),
            ))),
            suppliers: Arc::new(SuppliersStore::new(Arc::new(HttpSuppliersService::new(
                api.clone(),
            )))),
            users: Arc::new(UsersStore::new(
                Arc::new(HttpUsersService::new(api.clone())),
                Arc::clone(&session),
            )),
            sales: Arc::new(SalesStore::new(Arc::new(HttpSalesService::new(api.clone())))),
            purchases: Arc::new(PurchasesStore::new(Arc::new(HttpPurchasesService::new(
                api.clone(),
            )))),
            reports: Arc::new(ReportsStore::new(Arc::new(HttpReportsService::new(api)))),
            session,
            settings,
        }
    }

    /// A fresh checkout with an empty cart.
    pub fn checkout(&self) -> CheckoutSession {
        CheckoutSession::new(
            self.settings.tax_rate,
            self.settings.currency,
            Arc::clone(&self.products),
            Arc::clone(&self.sales),
            Arc::clone(&self.session),
        )
    }

    /// A dashboard over the sales and products stores.
    pub fn dashboard(&self) -> DashboardView {
        DashboardView::new(Arc::clone(&self.sales), Arc::clone(&self.products))
    }

    /// End the session and drop every cached collection.
    pub fn logout(&self) {
        self.session.logout();
        self.reset_stores();
    }

    /// Drop every cached collection and report.
    pub fn reset_stores(&self) {
        self.products.reset();
        self.categories.reset();
        self.suppliers.reset();
        self.users.reset();
        self.sales.reset();
        self.purchases.reset();
        self.reports.reset();
    }
}
