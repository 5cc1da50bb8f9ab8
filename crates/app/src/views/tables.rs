//! Tables for list and detail screens.

use std::ops::Range;

use rusty_money::iso::Currency;
use tabled::{
    Table,
    builder::Builder,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};

use crate::{
    domain::{
        categories::models::Category, products::models::Product, purchases::models::Purchase,
        sales::models::Sale, suppliers::models::Supplier, users::models::UserAccount,
    },
    views::format::{datetime, money, or_dash},
};

/// Header in bold, numeric `columns` right-aligned.
pub(crate) fn styled(builder: Builder, numeric: Range<usize>) -> Table {
    let mut table = builder.build();

    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Rows::first(), Color::BOLD);

    if !numeric.is_empty() {
        table.modify(Columns::new(numeric), Alignment::right());
    }

    table
}

/// Two-column label/value table for a detail view.
pub(crate) fn detail(rows: impl IntoIterator<Item = (&'static str, String)>) -> Table {
    let mut builder = Builder::default();

    for (label, value) in rows {
        builder.push_record([label.to_string(), value]);
    }

    let mut table = builder.build();
    table.with(Theme::from(Style::modern_rounded()));
    table.modify(Columns::first(), Color::BOLD);

    table
}

/// Product list.
pub fn products(products: &[Product], currency: &'static Currency) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Código", "Nombre", "Categoría", "Precio", "Stock", "Estado"]);

    for product in products {
        let stock = if product.is_out_of_stock() {
            format!("{} (agotado)", product.stock)
        } else if product.is_low_stock() {
            format!("{} (bajo)", product.stock)
        } else {
            product.stock.to_string()
        };

        builder.push_record([
            product.id.to_string(),
            product.barcode.clone(),
            product.name.clone(),
            or_dash(product.category_name.as_deref()).to_string(),
            money(product.sale_price, currency),
            stock,
            product.status.to_string(),
        ]);
    }

    styled(builder, 4..6)
}

/// Product detail.
pub fn product(product: &Product, currency: &'static Currency) -> Table {
    detail([
        ("ID", product.id.to_string()),
        ("Código", product.barcode.clone()),
        ("Nombre", product.name.clone()),
        ("Descripción", or_dash(product.description.as_deref()).to_string()),
        (
            "Categoría",
            format!(
                "{} ({})",
                or_dash(product.category_name.as_deref()),
                product.category_id
            ),
        ),
        ("Precio compra", money(product.purchase_price, currency)),
        ("Precio venta", money(product.sale_price, currency)),
        ("Stock", product.stock.to_string()),
        ("Stock mínimo", product.min_stock.to_string()),
        ("Valor inventario", money(product.inventory_value(), currency)),
        ("Estado", product.status.to_string()),
    ])
}

/// Category list.
pub fn categories(categories: &[Category]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Nombre", "Descripción", "Estado"]);

    for category in categories {
        builder.push_record([
            category.id.to_string(),
            category.name.clone(),
            or_dash(category.description.as_deref()).to_string(),
            category.status.to_string(),
        ]);
    }

    styled(builder, 0..0)
}

/// Category detail.
pub fn category(category: &Category) -> Table {
    detail([
        ("ID", category.id.to_string()),
        ("Nombre", category.name.clone()),
        ("Descripción", or_dash(category.description.as_deref()).to_string()),
        ("Estado", category.status.to_string()),
    ])
}

/// Supplier list.
pub fn suppliers(suppliers: &[Supplier]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Nombre", "RUC", "Teléfono", "Email", "Estado"]);

    for supplier in suppliers {
        builder.push_record([
            supplier.id.to_string(),
            supplier.name.clone(),
            or_dash(supplier.ruc.as_deref()).to_string(),
            or_dash(supplier.phone.as_deref()).to_string(),
            or_dash(supplier.email.as_deref()).to_string(),
            supplier.status.to_string(),
        ]);
    }

    styled(builder, 0..0)
}

/// Supplier detail.
pub fn supplier(supplier: &Supplier) -> Table {
    detail([
        ("ID", supplier.id.to_string()),
        ("Nombre", supplier.name.clone()),
        ("RUC", or_dash(supplier.ruc.as_deref()).to_string()),
        ("Teléfono", or_dash(supplier.phone.as_deref()).to_string()),
        ("Dirección", or_dash(supplier.address.as_deref()).to_string()),
        ("Email", or_dash(supplier.email.as_deref()).to_string()),
        ("Contacto", or_dash(supplier.contact.as_deref()).to_string()),
        ("Estado", supplier.status.to_string()),
    ])
}

/// User accounts, without passwords.
pub fn users(users: &[UserAccount]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Nombre", "Email", "Rol", "Estado"]);

    for user in users {
        builder.push_record([
            user.id.to_string(),
            user.name.clone(),
            user.email.clone(),
            role_name(user),
            user.status.to_string(),
        ]);
    }

    styled(builder, 0..0)
}

/// User account detail.
pub fn user(user: &UserAccount) -> Table {
    detail([
        ("ID", user.id.to_string()),
        ("Nombre", user.name.clone()),
        ("Email", user.email.clone()),
        ("Rol", role_name(user)),
        ("Estado", user.status.to_string()),
    ])
}

fn role_name(user: &UserAccount) -> String {
    if user.role_name.is_empty() {
        user.role.to_string()
    } else {
        user.role_name.clone()
    }
}

/// Sales list, one row per sale.
pub fn sales(sales: &[Sale], currency: &'static Currency) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Boleta", "Fecha", "Cajero", "Pago", "Total"]);

    for sale in sales {
        builder.push_record([
            sale.id.to_string(),
            sale.receipt_number.clone(),
            datetime(&sale.date),
            or_dash(sale.cashier_name.as_deref()).to_string(),
            sale.payment_label(),
            money(sale.total, currency),
        ]);
    }

    styled(builder, 5..6)
}

/// Sale header followed by its lines.
pub fn sale(sale: &Sale, currency: &'static Currency) -> String {
    let header = detail([
        ("Boleta", sale.receipt_number.clone()),
        ("Fecha", datetime(&sale.date)),
        ("Cajero", or_dash(sale.cashier_name.as_deref()).to_string()),
        ("Pago", sale.payment_label()),
        ("Observaciones", or_dash(sale.notes.as_deref()).to_string()),
        ("Subtotal", money(sale.subtotal, currency)),
        ("Descuento", money(sale.discount, currency)),
        ("IGV", money(sale.tax, currency)),
        ("Total", money(sale.total, currency)),
    ]);

    let mut lines = Builder::default();
    lines.push_record(["Código", "Producto", "Cant.", "Precio", "Subtotal"]);

    for line in &sale.lines {
        lines.push_record([
            or_dash(line.barcode.as_deref()).to_string(),
            line.product_name
                .clone()
                .unwrap_or_else(|| line.product_id.to_string()),
            line.quantity.to_string(),
            money(line.unit_price, currency),
            money(line.subtotal, currency),
        ]);
    }

    format!("{header}\n{}", styled(lines, 2..5))
}

/// Purchases list, one row per purchase.
pub fn purchases(purchases: &[Purchase], currency: &'static Currency) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Factura", "Fecha", "Proveedor", "Registró", "Total"]);

    for purchase in purchases {
        builder.push_record([
            purchase.id.to_string(),
            or_dash(purchase.invoice_number.as_deref()).to_string(),
            datetime(&purchase.date),
            purchase
                .supplier_name
                .clone()
                .unwrap_or_else(|| purchase.supplier_id.to_string()),
            or_dash(purchase.user_name.as_deref()).to_string(),
            money(purchase.total, currency),
        ]);
    }

    styled(builder, 5..6)
}

/// Purchase header followed by its lines.
pub fn purchase(purchase: &Purchase, currency: &'static Currency) -> String {
    let header = detail([
        ("Factura", or_dash(purchase.invoice_number.as_deref()).to_string()),
        ("Fecha", datetime(&purchase.date)),
        (
            "Proveedor",
            purchase
                .supplier_name
                .clone()
                .unwrap_or_else(|| purchase.supplier_id.to_string()),
        ),
        ("Registró", or_dash(purchase.user_name.as_deref()).to_string()),
        ("Observaciones", or_dash(purchase.notes.as_deref()).to_string()),
        ("Subtotal", money(purchase.subtotal, currency)),
        ("IGV", money(purchase.tax, currency)),
        ("Total", money(purchase.total, currency)),
    ]);

    let mut lines = Builder::default();
    lines.push_record(["Producto", "Cant.", "Costo", "Subtotal"]);

    for line in &purchase.lines {
        lines.push_record([
            line.product_name
                .clone()
                .unwrap_or_else(|| line.product_id.to_string()),
            line.quantity.to_string(),
            money(line.unit_price, currency),
            money(line.subtotal, currency),
        ]);
    }

    format!("{header}\n{}", styled(lines, 1..4))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;

    use super::*;
    use crate::test::helpers::{product as sample_product, sale as sample_sale};

    #[test]
    fn product_list_marks_stock_levels() {
        let rendered = products(
            &[
                sample_product(1, "7750000000017", 20),
                sample_product(2, "7750000000024", 3),
                sample_product(3, "7750000000031", 0),
            ],
            iso::PEN,
        )
        .to_string();

        assert!(rendered.contains("3 (bajo)"), "{rendered}");
        assert!(rendered.contains("0 (agotado)"), "{rendered}");
        assert!(rendered.contains("2.50"), "{rendered}");
    }

    #[test]
    fn sale_list_shows_formatted_date_and_fallback_payment() {
        let rendered = sales(
            &[sample_sale(7, "Tue, 14 Jan 2025 10:30:00 GMT", "11.80", None)],
            iso::PEN,
        )
        .to_string();

        assert!(rendered.contains("14/01/2025 10:30"), "{rendered}");
        assert!(rendered.contains("Sin especificar"), "{rendered}");
    }
}
