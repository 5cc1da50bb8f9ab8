//! Test Helpers

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::Value;

use revenge::products::ProductId;

use crate::{
    auth::{MemorySessionStorage, Role, Session, SessionManager, SessionStorage, User, UserId},
    domain::{
        categories::models::{Category, CategoryId},
        products::models::{Product, ProductForm},
        purchases::models::{Purchase, PurchaseId},
        sales::models::{Sale, SaleId, SaleReceipt},
        status::Status,
        suppliers::models::{Supplier, SupplierId},
        users::models::UserAccount,
    },
    gateway::transport::ApiResponse,
};

pub(crate) fn admin_session(token: &str) -> Session {
    Session {
        user: User {
            id: UserId::new(1),
            name: "Admin".to_string(),
            email: "admin@revenge.pe".to_string(),
            role: Role::Administrator,
            role_name: "Administrador".to_string(),
        },
        token: token.to_string(),
    }
}

pub(crate) fn cashier_session(token: &str) -> Session {
    Session {
        user: User {
            id: UserId::new(2),
            name: "Caja Uno".to_string(),
            email: "caja1@revenge.pe".to_string(),
            role: Role::Cashier,
            role_name: "Cajero".to_string(),
        },
        token: token.to_string(),
    }
}

/// A session manager already logged in as the administrator.
pub(crate) fn authenticated_session(token: &str) -> Arc<SessionManager> {
    let storage = MemorySessionStorage::default();
    let _saved = storage.save(&admin_session(token));

    let session = SessionManager::new(Arc::new(storage));
    session.rehydrate();

    Arc::new(session)
}

pub(crate) fn json_response(status: u16, body: &Value) -> ApiResponse {
    ApiResponse {
        status,
        body: body.to_string().into_bytes(),
    }
}

pub(crate) fn admin_account() -> UserAccount {
    let user = admin_session("").user;

    UserAccount {
        id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
        role_name: user.role_name,
        status: Status::Active,
    }
}

pub(crate) fn category(id: u64, name: &str) -> Category {
    Category {
        id: CategoryId::new(id),
        name: name.to_string(),
        description: None,
        status: Status::Active,
    }
}

pub(crate) fn supplier(id: u64, name: &str) -> Supplier {
    Supplier {
        id: SupplierId::new(id),
        name: name.to_string(),
        ruc: Some("20601234567".to_string()),
        phone: None,
        address: None,
        email: None,
        contact: None,
        status: Status::Active,
    }
}

/// A drink in category 1 bought at 1.80 and sold at 2.50, restocked at 5 units.
pub(crate) fn product(id: u64, barcode: &str, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        barcode: barcode.to_string(),
        name: format!("Producto {id}"),
        description: None,
        category_id: CategoryId::new(1),
        category_name: Some("Bebidas".to_string()),
        purchase_price: Decimal::new(180, 2),
        sale_price: Decimal::new(250, 2),
        stock,
        min_stock: 5,
        status: Status::Active,
    }
}

pub(crate) fn product_form(barcode: &str) -> ProductForm {
    ProductForm::from(&product(0, barcode, 12))
}

pub(crate) fn sale(id: u64, date: &str, total: &str, payment: Option<&str>) -> Sale {
    Sale {
        id: SaleId::new(id),
        receipt_number: format!("B001-{id:06}"),
        cashier_id: Some(UserId::new(2)),
        cashier_name: Some("Caja Uno".to_string()),
        date: date.to_string(),
        subtotal: Decimal::ZERO,
        discount: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: total.parse().unwrap_or_default(),
        payment_method_id: None,
        payment_method_name: payment.map(ToString::to_string),
        notes: None,
        lines: Vec::new(),
    }
}

/// What the server answers when sale `id` is registered.
pub(crate) fn receipt(id: u64) -> SaleReceipt {
    SaleReceipt {
        id: SaleId::new(id),
        receipt_number: format!("B001-{id:06}"),
        total: Decimal::new(1180, 2),
    }
}

pub(crate) fn purchase(id: u64, total: &str) -> Purchase {
    Purchase {
        id: PurchaseId::new(id),
        invoice_number: Some(format!("F001-{id:04}")),
        supplier_id: SupplierId::new(1),
        supplier_name: Some("Distribuidora Norte".to_string()),
        user_id: Some(UserId::new(1)),
        user_name: Some("Admin".to_string()),
        date: "2025-01-14T08:00:00".to_string(),
        subtotal: Decimal::ZERO,
        tax: Decimal::ZERO,
        total: total.parse().unwrap_or_default(),
        notes: None,
        lines: Vec::new(),
    }
}
