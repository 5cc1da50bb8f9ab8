//! Reports store.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use jiff::Timestamp;
use tracing::info;

use crate::{
    domain::{
        reports::{
            errors::ReportError,
            models::{InventoryReport, PurchasesReport, ReportKind, ReportRange, SalesReport},
            service::ReportsService,
        },
        result::{ActionFailure, ActionResult},
    },
    gateway::ApiError,
};

#[derive(Debug, Default)]
struct State {
    sales: Option<SalesReport>,
    inventory: Option<InventoryReport>,
    purchases: Option<PurchasesReport>,
    loading: bool,
    error: Option<String>,
}

/// The last report of each kind.
pub struct ReportsStore {
    service: Arc<dyn ReportsService>,
    state: Mutex<State>,
}

impl fmt::Debug for ReportsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportsStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl ReportsStore {
    /// An empty store over `service`.
    pub fn new(service: Arc<dyn ReportsService>) -> Self {
        Self {
            service,
            state: Mutex::new(State::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn track<T>(
        &self,
        request: impl Future<Output = Result<T, ApiError>>,
        keep: impl FnOnce(&mut State, &T),
    ) -> ActionResult<T> {
        {
            let mut state = self.lock();
            state.loading = true;
            state.error = None;
        }

        let result = request.await.map_err(ActionFailure::from);

        let mut state = self.lock();
        state.loading = false;

        match &result {
            Ok(report) => keep(&mut state, report),
            Err(failure) => state.error = Some(failure.message.clone()),
        }

        result
    }

    /// # Errors
    ///
    /// Returns the failure of the request; the previous report is kept.
    pub async fn load_sales(&self, range: ReportRange) -> ActionResult<SalesReport> {
        self.track(self.service.sales_report(range), |state, report| {
            state.sales = Some(report.clone());
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the failure of the request; the previous report is kept.
    pub async fn load_inventory(&self) -> ActionResult<InventoryReport> {
        self.track(self.service.inventory_report(), |state, report| {
            state.inventory = Some(report.clone());
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the failure of the request; the previous report is kept.
    pub async fn load_purchases(&self, range: ReportRange) -> ActionResult<PurchasesReport> {
        self.track(self.service.purchases_report(range), |state, report| {
            state.purchases = Some(report.clone());
        })
        .await
    }

    /// Download the PDF of a report into `dir` and return the file written.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if the download fails, the server sends
    /// something other than a PDF, or the file cannot be written.
    pub async fn export_pdf(
        &self,
        kind: ReportKind,
        range: ReportRange,
        dir: &Path,
    ) -> Result<PathBuf, ReportError> {
        let bytes = self.track(self.service.download_pdf(kind, range), |_, _| {}).await?;

        save_pdf(dir, kind, &bytes).await
    }

    /// Last sales report.
    pub fn sales(&self) -> Option<SalesReport> {
        self.lock().sales.clone()
    }

    /// Last inventory report.
    pub fn inventory(&self) -> Option<InventoryReport> {
        self.lock().inventory.clone()
    }

    /// Last purchases report.
    pub fn purchases(&self) -> Option<PurchasesReport> {
        self.lock().purchases.clone()
    }

    /// Whether a report is loading.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Message of the last failed load.
    pub fn error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    /// Forget every report.
    pub fn reset(&self) {
        *self.lock() = State::default();
    }
}

/// Write `bytes` as `reporte_<kind>_<millis>.pdf` under `dir`.
///
/// # Errors
///
/// Returns [`ReportError::NotPdf`] for anything without the PDF signature and
/// [`ReportError::Write`] if the file cannot be written.
pub async fn save_pdf(dir: &Path, kind: ReportKind, bytes: &[u8]) -> Result<PathBuf, ReportError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(ReportError::NotPdf);
    }

    let path = dir.join(format!(
        "reporte_{kind}_{}.pdf",
        Timestamp::now().as_millisecond()
    ));

    let write = async {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, bytes).await
    };

    write.await.map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), size = bytes.len(), "report saved");

    Ok(path)
}
