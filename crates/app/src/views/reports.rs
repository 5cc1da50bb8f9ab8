//! Report screens.

use std::io;

use rusty_money::iso::Currency;
use tabled::builder::Builder;

use crate::{
    domain::reports::models::{
        DailyTotal, GroupTotal, InventoryReport, PurchasesReport, RankedProduct, SalesReport,
    },
    views::{
        format::{date, money, or_dash, percent},
        tables::{detail, styled},
    },
};

fn period(from: Option<&str>, to: Option<&str>) -> String {
    format!(
        "{} - {}",
        from.map_or_else(|| "-".to_string(), date),
        to.map_or_else(|| "-".to_string(), date)
    )
}

fn write_days(
    out: &mut impl io::Write,
    days: &[DailyTotal],
    currency: &'static Currency,
) -> io::Result<()> {
    if days.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["Fecha", "Cantidad", "Total"]);

    for day in days {
        builder.push_record([
            date(&day.date),
            day.count.to_string(),
            money(day.total, currency),
        ]);
    }

    writeln!(out, "\nPor día\n{}", styled(builder, 1..3))
}

fn write_ranking(
    out: &mut impl io::Write,
    title: &str,
    products: &[RankedProduct],
    currency: &'static Currency,
) -> io::Result<()> {
    if products.is_empty() {
        return Ok(());
    }

    let mut builder = Builder::default();
    builder.push_record(["#", "Código", "Producto", "Categoría", "Cant.", "Precio", "Total", "%"]);

    for (rank, product) in products.iter().enumerate() {
        builder.push_record([
            (rank + 1).to_string(),
            or_dash(Some(product.barcode.as_str())).to_string(),
            product.name.clone(),
            or_dash(Some(product.category.as_str())).to_string(),
            product.quantity.to_string(),
            money(product.unit_price, currency),
            money(product.total, currency),
            percent(product.share),
        ]);
    }

    writeln!(out, "\n{title}\n{}", styled(builder, 4..8))
}

fn write_groups(
    out: &mut impl io::Write,
    title: &str,
    groups: &[GroupTotal],
    currency: &'static Currency,
) -> io::Result<()> {
    if groups.is_empty() {
        return Ok(());
    }

    let with_ticket = groups.iter().any(|group| group.average_ticket.is_some());

    let mut builder = Builder::default();
    let mut header = vec!["Nombre", "Cantidad", "Total"];
    if with_ticket {
        header.push("Ticket prom.");
    }
    header.push("%");
    builder.push_record(header);

    for group in groups {
        let mut record = vec![
            group.name.clone(),
            group.count.to_string(),
            money(group.total, currency),
        ];

        if with_ticket {
            record.push(
                group
                    .average_ticket
                    .map_or_else(|| "-".to_string(), |ticket| money(ticket, currency)),
            );
        }

        record.push(percent(group.share));
        builder.push_record(record);
    }

    let numeric = if with_ticket { 1..5 } else { 1..4 };

    writeln!(out, "\n{title}\n{}", styled(builder, numeric))
}

/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_sales(
    out: &mut impl io::Write,
    report: &SalesReport,
    currency: &'static Currency,
) -> io::Result<()> {
    let summary = &report.summary;

    writeln!(
        out,
        "\nReporte de ventas\n{}",
        detail([
            ("Periodo", period(report.from.as_deref(), report.to.as_deref())),
            ("Ventas", summary.count.to_string()),
            ("Monto total", money(summary.amount, currency)),
            ("Venta promedio", money(summary.average, currency)),
            ("Venta mínima", money(summary.minimum, currency)),
            ("Venta máxima", money(summary.maximum, currency)),
        ])
    )?;

    write_days(out, &report.by_day, currency)?;
    write_ranking(out, "Productos más vendidos", &report.top_products, currency)?;
    write_groups(out, "Por método de pago", &report.by_payment_method, currency)?;
    write_groups(out, "Por cajero", &report.by_cashier, currency)
}

/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_inventory(
    out: &mut impl io::Write,
    report: &InventoryReport,
    currency: &'static Currency,
) -> io::Result<()> {
    let summary = &report.summary;

    writeln!(
        out,
        "\nReporte de inventario\n{}",
        detail([
            ("Productos", summary.products.to_string()),
            ("Valor de inventario", money(summary.value, currency)),
            ("Valor de venta potencial", money(summary.potential_sales, currency)),
            ("Con stock bajo", summary.low_stock.to_string()),
            ("Sin stock", summary.out_of_stock.to_string()),
        ])
    )?;

    if !report.by_category.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["Categoría", "Productos", "Unidades", "Valor"]);

        for category in &report.by_category {
            builder.push_record([
                category.category.clone(),
                category.products.to_string(),
                category.units.to_string(),
                money(category.value, currency),
            ]);
        }

        writeln!(out, "\nPor categoría\n{}", styled(builder, 1..4))?;
    }

    for (title, alerts) in [("Stock bajo", &report.low_stock), ("Sin stock", &report.out_of_stock)] {
        if alerts.is_empty() {
            continue;
        }

        let mut builder = Builder::default();
        builder.push_record(["Código", "Producto", "Categoría", "Stock", "Mínimo"]);

        for alert in alerts {
            builder.push_record([
                alert.barcode.clone(),
                alert.name.clone(),
                or_dash(Some(alert.category.as_str())).to_string(),
                alert.stock.to_string(),
                alert.min_stock.to_string(),
            ]);
        }

        writeln!(out, "\n{title}\n{}", styled(builder, 3..5))?;
    }

    Ok(())
}

/// # Errors
///
/// Returns any error from writing to `out`.
pub fn write_purchases(
    out: &mut impl io::Write,
    report: &PurchasesReport,
    currency: &'static Currency,
) -> io::Result<()> {
    let summary = &report.summary;

    writeln!(
        out,
        "\nReporte de compras\n{}",
        detail([
            ("Periodo", period(report.from.as_deref(), report.to.as_deref())),
            ("Compras", summary.count.to_string()),
            ("Monto total", money(summary.amount, currency)),
            ("Compra promedio", money(summary.average, currency)),
        ])
    )?;

    write_groups(out, "Por proveedor", &report.by_supplier, currency)?;
    write_ranking(out, "Productos más comprados", &report.top_products, currency)?;
    write_days(out, &report.by_day, currency)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn sales_report_lists_sections_present() -> TestResult {
        let report: SalesReport = serde_json::from_value(json!({
            "fecha_inicio": "2025-01-08",
            "fecha_fin": "2025-01-14",
            "resumen": {"total_ventas": 1, "monto_total": 11.8},
            "ventas_por_metodo_pago": [{"metodo": "Yape", "cantidad": 1, "total": 11.8, "porcentaje": 100}]
        }))?;

        let mut out = Vec::new();
        write_sales(&mut out, &report, iso::PEN)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("08/01/2025 - 14/01/2025"), "{text}");
        assert!(text.contains("Por método de pago"), "{text}");
        assert!(!text.contains("Por cajero"), "{text}");
        assert!(!text.contains("Ticket prom."), "{text}");

        Ok(())
    }

    #[test]
    fn inventory_report_lists_alerts() -> TestResult {
        let report: InventoryReport = serde_json::from_value(json!({
            "resumen": {"total_productos": 2, "productos_sin_stock": 1},
            "productos_sin_stock": [{
                "producto_id": 3,
                "codigo_barras": "7750000000031",
                "nombre": "Chicha Morada",
                "categoria": "Bebidas"
            }]
        }))?;

        let mut out = Vec::new();
        write_inventory(&mut out, &report, iso::PEN)?;
        let text = String::from_utf8(out)?;

        assert!(text.contains("Chicha Morada"), "{text}");
        assert!(!text.contains("Stock bajo\n"), "{text}");

        Ok(())
    }
}
