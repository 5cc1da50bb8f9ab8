//! Report models.

use std::fmt;

use jiff::civil::Date;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Which report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Sales over a date range
    Sales,
    /// Current stock valuation
    Inventory,
    /// Purchases over a date range
    Purchases,
}

impl ReportKind {
    /// Path segment and file name part used by the backend.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Sales => "ventas",
            Self::Inventory => "inventario",
            Self::Purchases => "compras",
        }
    }

    /// Whether the report takes a date range.
    pub fn is_dated(self) -> bool {
        self != Self::Inventory
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Date range of a report. Open ends use the server's default, the last seven days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportRange {
    /// First day, inclusive
    pub from: Option<Date>,
    /// Last day, inclusive
    pub to: Option<Date>,
}

impl ReportRange {
    /// Query parameters; open ends are left out.
    pub fn to_query(self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();

        if let Some(from) = self.from {
            query.push(("fecha_desde", from.to_string()));
        }

        if let Some(to) = self.to {
            query.push(("fecha_hasta", to.to_string()));
        }

        query
    }
}

/// Count and amount of one day.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DailyTotal {
    /// Day, as sent
    #[serde(rename = "fecha")]
    pub date: String,

    /// Number of records
    #[serde(rename = "cantidad")]
    pub count: u64,

    /// Amount
    pub total: Decimal,
}

/// A product ranked by sold or bought amount.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RankedProduct {
    /// Barcode
    #[serde(rename = "codigo", default)]
    pub barcode: String,

    /// Product name
    #[serde(rename = "producto")]
    pub name: String,

    /// Category name
    #[serde(rename = "categoria", default)]
    pub category: String,

    /// Units
    #[serde(rename = "cantidad")]
    pub quantity: u64,

    /// Unit price
    #[serde(rename = "precio_unitario", default)]
    pub unit_price: Decimal,

    /// Amount
    pub total: Decimal,

    /// Share of the period's total, 0 to 100.
    #[serde(rename = "porcentaje", default)]
    pub share: Decimal,
}

/// Count, amount and share of a group such as a payment method or supplier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupTotal {
    /// Group name
    #[serde(alias = "metodo", alias = "proveedor", alias = "cajero")]
    pub name: String,

    /// Number of records
    #[serde(rename = "cantidad")]
    pub count: u64,

    /// Amount
    pub total: Decimal,

    /// Average amount per record
    #[serde(rename = "ticket_promedio", default)]
    pub average_ticket: Option<Decimal>,

    /// Share of the period's total, 0 to 100
    #[serde(rename = "porcentaje", default)]
    pub share: Decimal,
}

/// Headline figures of a sales report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SalesSummary {
    /// Number of sales
    #[serde(rename = "total_ventas", default)]
    pub count: u64,

    /// Sum of their totals
    #[serde(rename = "monto_total", default)]
    pub amount: Decimal,

    /// Average sale
    #[serde(rename = "promedio_venta", default)]
    pub average: Decimal,

    /// Smallest sale
    #[serde(rename = "venta_minima", default)]
    pub minimum: Decimal,

    /// Largest sale
    #[serde(rename = "venta_maxima", default)]
    pub maximum: Decimal,
}

/// `GET reportes/ventas`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SalesReport {
    /// First day covered, as sent
    #[serde(rename = "fecha_inicio", default)]
    pub from: Option<String>,

    /// Last day covered, as sent
    #[serde(rename = "fecha_fin", default)]
    pub to: Option<String>,

    /// Headline figures
    #[serde(rename = "resumen", default)]
    pub summary: SalesSummary,

    /// Totals per day
    #[serde(rename = "ventas_por_dia", default)]
    pub by_day: Vec<DailyTotal>,

    /// Best sellers
    #[serde(rename = "productos_mas_vendidos", default)]
    pub top_products: Vec<RankedProduct>,

    /// Totals per payment method
    #[serde(rename = "ventas_por_metodo_pago", default)]
    pub by_payment_method: Vec<GroupTotal>,

    /// Totals per cashier
    #[serde(rename = "ventas_por_cajero", default)]
    pub by_cashier: Vec<GroupTotal>,
}

/// Headline figures of the inventory report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InventorySummary {
    /// Products in the catalog
    #[serde(rename = "total_productos", default)]
    pub products: u64,

    /// Purchase value of the stock.
    #[serde(rename = "valor_inventario", default)]
    pub value: Decimal,

    /// Sale value of the stock.
    #[serde(rename = "valor_venta_potencial", default)]
    pub potential_sales: Decimal,

    /// Products at or below their minimum
    #[serde(rename = "productos_stock_bajo", default)]
    pub low_stock: u64,

    /// Products with no units
    #[serde(rename = "productos_sin_stock", default)]
    pub out_of_stock: u64,
}

/// Stock held in one category.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryStock {
    /// Category name
    #[serde(rename = "categoria")]
    pub category: String,

    /// Products in it
    #[serde(rename = "cantidad")]
    pub products: u64,

    /// Units on hand
    #[serde(rename = "stock_total")]
    pub units: u64,

    /// Purchase value of those units
    #[serde(rename = "valor")]
    pub value: Decimal,
}

/// A product listed for restocking.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StockAlert {
    /// Product id
    #[serde(rename = "producto_id")]
    pub product_id: u64,

    /// Barcode
    #[serde(rename = "codigo_barras")]
    pub barcode: String,

    /// Product name
    #[serde(rename = "nombre")]
    pub name: String,

    /// Units on hand
    #[serde(rename = "stock_actual", alias = "stock", default)]
    pub stock: u64,

    /// Low-stock threshold
    #[serde(rename = "stock_minimo", default)]
    pub min_stock: u64,

    /// Category name
    #[serde(rename = "categoria", default)]
    pub category: String,
}

/// `GET reportes/inventario`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryReport {
    /// Headline figures
    #[serde(rename = "resumen", default)]
    pub summary: InventorySummary,

    /// Stock per category
    #[serde(rename = "productos_por_categoria", default)]
    pub by_category: Vec<CategoryStock>,

    /// Products to restock
    #[serde(rename = "productos_stock_bajo", default)]
    pub low_stock: Vec<StockAlert>,

    /// Products with no units
    #[serde(rename = "productos_sin_stock", default)]
    pub out_of_stock: Vec<StockAlert>,
}

/// Headline figures of a purchases report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PurchasesSummary {
    /// Number of purchases
    #[serde(rename = "total_compras", default)]
    pub count: u64,

    /// Sum of their totals
    #[serde(rename = "monto_total", default)]
    pub amount: Decimal,

    /// Average purchase
    #[serde(rename = "promedio_compra", default)]
    pub average: Decimal,
}

/// `GET reportes/compras`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PurchasesReport {
    /// First day covered, as sent
    #[serde(rename = "fecha_inicio", default)]
    pub from: Option<String>,

    /// Last day covered, as sent
    #[serde(rename = "fecha_fin", default)]
    pub to: Option<String>,

    /// Headline figures
    #[serde(rename = "resumen", default)]
    pub summary: PurchasesSummary,

    /// Totals per supplier
    #[serde(rename = "compras_por_proveedor", default)]
    pub by_supplier: Vec<GroupTotal>,

    /// Most bought products
    #[serde(rename = "productos_mas_comprados", default)]
    pub top_products: Vec<RankedProduct>,

    /// Totals per day
    #[serde(rename = "compras_por_dia", default)]
    pub by_day: Vec<DailyTotal>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn reads_sales_report() -> TestResult {
        let report: SalesReport = serde_json::from_value(json!({
            "fecha_inicio": "2025-01-08",
            "fecha_fin": "2025-01-14",
            "resumen": {
                "total_ventas": 2,
                "monto_total": 16.8,
                "promedio_venta": 8.4,
                "venta_minima": 5.0,
                "venta_maxima": 11.8
            },
            "ventas_por_dia": [{"fecha": "2025-01-14", "cantidad": 2, "total": 16.8}],
            "productos_mas_vendidos": [{
                "codigo": "7751271001234",
                "producto": "Inca Kola 500ml",
                "categoria": "Bebidas",
                "cantidad": 4,
                "precio_unitario": 2.5,
                "total": 10.0,
                "porcentaje": 59.52
            }],
            "ventas_por_metodo_pago": [{"metodo": "Yape", "cantidad": 1, "total": 5.0, "porcentaje": 29.76}],
            "ventas_por_cajero": [{
                "cajero": "Caja Uno",
                "cantidad": 2,
                "total": 16.8,
                "ticket_promedio": 8.4,
                "porcentaje": 100.0
            }]
        }))?;

        assert_eq!(report.summary.count, 2);
        assert_eq!(report.summary.amount, Decimal::new(168, 1));
        assert_eq!(report.by_payment_method.first().map(|g| g.name.as_str()), Some("Yape"));
        assert_eq!(
            report.by_cashier.first().and_then(|g| g.average_ticket),
            Some(Decimal::new(84, 1))
        );

        Ok(())
    }

    #[test]
    fn inventory_report_tolerates_missing_sections() -> TestResult {
        let report: InventoryReport = serde_json::from_value(json!({
            "resumen": {"total_productos": 3, "valor_inventario": 45.0}
        }))?;

        assert_eq!(report.summary.products, 3);
        assert!(report.low_stock.is_empty());

        Ok(())
    }

    #[test]
    fn range_leaves_open_ends_to_server() {
        let range = ReportRange {
            from: Some(jiff::civil::date(2025, 1, 1)),
            to: None,
        };

        assert_eq!(range.to_query(), [("fecha_desde", "2025-01-01".to_string())]);
    }
}
