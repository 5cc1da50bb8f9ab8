//! Reports service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::reports::models::{
        InventoryReport, PurchasesReport, ReportKind, ReportRange, SalesReport,
    },
    gateway::{ApiClient, ApiError},
};

/// Backend calls for reports.
#[automock]
#[async_trait]
pub trait ReportsService: Send + Sync {
    /// Sales totals over `range`.
    async fn sales_report(&self, range: ReportRange) -> Result<SalesReport, ApiError>;

    /// Stock valuation of the whole catalog.
    async fn inventory_report(&self) -> Result<InventoryReport, ApiError>;

    /// Purchase totals over `range`.
    async fn purchases_report(&self, range: ReportRange) -> Result<PurchasesReport, ApiError>;

    /// The PDF rendition of a report, as raw bytes.
    async fn download_pdf(&self, kind: ReportKind, range: ReportRange) -> Result<Vec<u8>, ApiError>;
}

/// [`ReportsService`] over the `reportes` endpoints.
#[derive(Debug, Clone)]
pub struct HttpReportsService {
    api: ApiClient,
}

impl HttpReportsService {
    /// A service over `api`.
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

fn query(kind: ReportKind, range: ReportRange) -> Vec<(&'static str, String)> {
    if kind.is_dated() {
        range.to_query()
    } else {
        Vec::new()
    }
}

#[async_trait]
impl ReportsService for HttpReportsService {
    async fn sales_report(&self, range: ReportRange) -> Result<SalesReport, ApiError> {
        self.api
            .get("reportes/ventas", &query(ReportKind::Sales, range))
            .await
    }

    async fn inventory_report(&self) -> Result<InventoryReport, ApiError> {
        self.api.get("reportes/inventario", &[]).await
    }

    async fn purchases_report(&self, range: ReportRange) -> Result<PurchasesReport, ApiError> {
        self.api
            .get("reportes/compras", &query(ReportKind::Purchases, range))
            .await
    }

    async fn download_pdf(&self, kind: ReportKind, range: ReportRange) -> Result<Vec<u8>, ApiError> {
        self.api
            .download(&format!("reportes/{kind}/pdf"), &query(kind, range))
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::civil::date;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::{
        gateway::transport::{ApiResponse, MockTransport},
        test::helpers::{authenticated_session, json_response},
    };

    #[tokio::test]
    async fn sales_report_sends_range() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .withf(|request| {
                request.path == "reportes/ventas"
                    && request.query
                        == [
                            ("fecha_desde".to_string(), "2025-01-01".to_string()),
                            ("fecha_hasta".to_string(), "2025-01-31".to_string()),
                        ]
            })
            .returning(|_| {
                Ok(json_response(
                    200,
                    &json!({"success": true, "data": {"resumen": {"total_ventas": 7}}}),
                ))
            });

        let service = HttpReportsService::new(ApiClient::new(
            Arc::new(transport),
            authenticated_session("tok"),
        ));

        let report = service
            .sales_report(ReportRange {
                from: Some(date(2025, 1, 1)),
                to: Some(date(2025, 1, 31)),
            })
            .await?;

        assert_eq!(report.summary.count, 7);

        Ok(())
    }

    #[tokio::test]
    async fn inventory_pdf_ignores_range() -> TestResult {
        let mut transport = MockTransport::new();

        transport
            .expect_send()
            .withf(|request| request.path == "reportes/inventario/pdf" && request.query.is_empty())
            .returning(|_| {
                Ok(ApiResponse {
                    status: 200,
                    body: b"%PDF-1.7".to_vec(),
                })
            });

        let service = HttpReportsService::new(ApiClient::new(
            Arc::new(transport),
            authenticated_session("tok"),
        ));

        let bytes = service
            .download_pdf(
                ReportKind::Inventory,
                ReportRange {
                    from: Some(date(2025, 1, 1)),
                    to: None,
                },
            )
            .await?;

        assert_eq!(bytes, b"%PDF-1.7");

        Ok(())
    }
}
