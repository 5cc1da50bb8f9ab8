//! Dashboard
//!
//! Today's sales and the stock that needs attention, refreshed on a fixed
//! interval by a [`Poller`] for as long as the view lives.

use std::{fmt, io, sync::Arc, time::Duration};

use rusty_money::iso::Currency;
use tabled::builder::Builder;
use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    auth::SessionState,
    domain::{
        products::{ProductsStore, models::Product},
        result::{ActionFailure, ActionResult},
        sales::{
            SalesStore,
            models::{Sale, SalesSummary},
        },
    },
    views::{
        format::{datetime, money},
        tables::{detail, styled},
    },
};

/// How often `dashboard --watch` refreshes.
pub const DEFAULT_REFRESH: Duration = Duration::from_secs(30);

const LATEST_SALES: usize = 5;

/// What the dashboard shows at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSnapshot {
    /// Count and amount of today's sales
    pub sales_today: SalesSummary,
    /// Most recent sale
    pub last_sale: Option<Sale>,
    /// A few recent sales, newest first
    pub latest_sales: Vec<Sale>,
    /// Products in the catalog
    pub product_count: usize,
    /// Products at or below their minimum stock
    pub low_stock: Vec<Product>,
}

/// Dashboard over the sales and products caches.
pub struct DashboardView {
    sales: Arc<SalesStore>,
    products: Arc<ProductsStore>,
}

impl fmt::Debug for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardView").finish_non_exhaustive()
    }
}

impl DashboardView {
    /// A dashboard reading from the two stores.
    pub fn new(sales: Arc<SalesStore>, products: Arc<ProductsStore>) -> Self {
        Self { sales, products }
    }

    /// Reload today's sales and the catalog together.
    ///
    /// # Errors
    ///
    /// Returns the first failure; the other request still completes and its
    /// store is updated.
    pub async fn refresh(&self) -> ActionResult<DashboardSnapshot> {
        let (sales, products) = tokio::join!(self.sales.fetch_today(), self.products.fetch_all());

        sales?;
        products?;

        Ok(self.snapshot())
    }

    /// The dashboard as of the stores' current contents.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            sales_today: self.sales.today_summary(),
            last_sale: self.sales.last(),
            latest_sales: self.sales.latest(LATEST_SALES),
            product_count: self.products.count(),
            low_stock: self.products.low_stock(),
        }
    }
}

/// Background refresh of a [`DashboardView`].
///
/// Stops when the session ends and is aborted when dropped.
#[derive(Debug)]
pub struct Poller {
    handle: JoinHandle<()>,
}

impl Poller {
    /// Refresh now and then every `every`, handing each result to `on_refresh`.
    pub fn spawn<F>(
        view: Arc<DashboardView>,
        every: Duration,
        mut session: watch::Receiver<SessionState>,
        mut on_refresh: F,
    ) -> Self
    where
        F: FnMut(ActionResult<DashboardSnapshot>) + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let result = view.refresh().await;
                        let expired = result
                            .as_ref()
                            .err()
                            .is_some_and(ActionFailure::is_unauthorized);

                        on_refresh(result);

                        if expired {
                            break;
                        }
                    }
                    changed = session.changed() => {
                        let authenticated = changed.is_ok()
                            && matches!(*session.borrow_and_update(), SessionState::Authenticated(_));

                        if !authenticated {
                            break;
                        }
                    }
                }
            }

            info!("dashboard polling stopped");
        });

        debug!(every_secs = every.as_secs(), "dashboard polling started");

        Self { handle }
    }

    /// Whether the polling task has stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait until polling stops on its own.
    pub async fn finished(&mut self) {
        if let Err(error) = (&mut self.handle).await {
            if !error.is_cancelled() {
                warn!(%error, "dashboard poller failed");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_snapshot(
    out: &mut impl io::Write,
    snapshot: &DashboardSnapshot,
    currency: &'static Currency,
) -> io::Result<()> {
    writeln!(
        out,
        "\n{}",
        detail([
            ("Ventas de hoy", snapshot.sales_today.count.to_string()),
            ("Monto de hoy", money(snapshot.sales_today.amount, currency)),
            (
                "Última venta",
                snapshot.last_sale.as_ref().map_or_else(
                    || "-".to_string(),
                    |sale| format!("{} {}", sale.receipt_number, money(sale.total, currency)),
                ),
            ),
            ("Productos", snapshot.product_count.to_string()),
            ("Con stock bajo", snapshot.low_stock.len().to_string()),
        ])
    )?;

    if !snapshot.latest_sales.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Boleta", "Hora", "Pago", "Total"]);

        for sale in &snapshot.latest_sales {
            builder.push_record([
                sale.receipt_number.clone(),
                datetime(&sale.date),
                sale.payment_label(),
                money(sale.total, currency),
            ]);
        }

        writeln!(out, "\nÚltimas ventas\n{}", styled(builder, 3..4))?;
    }

    if !snapshot.low_stock.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Código", "Producto", "Stock", "Mínimo"]);

        for product in &snapshot.low_stock {
            builder.push_record([
                product.barcode.clone(),
                product.name.clone(),
                product.stock.to_string(),
                product.min_stock.to_string(),
            ]);
        }

        writeln!(out, "\nStock bajo\n{}", styled(builder, 2..4))?;
    }

    Ok(())
}
