//! Roles and screen access.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Backend role, serialized as its numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum Role {
    /// Full access.
    Administrator,

    /// Sells at the checkout.
    Cashier,

    /// Manages products and purchases.
    InventoryClerk,

    /// A role this client does not know about. Gets no screens at all.
    Other(u8),
}

impl Role {
    /// Whether this is the administrator role.
    pub fn is_admin(self) -> bool {
        self == Self::Administrator
    }

    /// Whether the role may run checkout.
    pub fn can_sell(self) -> bool {
        matches!(self, Self::Administrator | Self::Cashier)
    }

    /// Whether the role may edit products and register purchases.
    pub fn can_manage_inventory(self) -> bool {
        matches!(self, Self::Administrator | Self::InventoryClerk)
    }
}

impl From<u8> for Role {
    fn from(id: u8) -> Self {
        match id {
            1 => Self::Administrator,
            2 => Self::Cashier,
            3 => Self::InventoryClerk,
            other => Self::Other(other),
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        match role {
            Role::Administrator => 1,
            Role::Cashier => 2,
            Role::InventoryClerk => 3,
            Role::Other(id) => id,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Administrator => f.write_str("Administrador"),
            Self::Cashier => f.write_str("Cajero"),
            Self::InventoryClerk => f.write_str("Almacenista"),
            Self::Other(id) => write!(f, "rol {id}"),
        }
    }
}

/// A screen of the client, each open to a fixed set of roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Summary of the day and low stock.
    Dashboard,
    /// Point of sale.
    Checkout,
    /// Product catalog.
    Products,
    /// Product categories.
    Categories,
    /// Sales history.
    Sales,
    /// Supplier purchases.
    Purchases,
    /// Supplier directory.
    Suppliers,
    /// User accounts.
    Users,
    /// Reports and PDF exports.
    Reports,
}

impl Screen {
    /// Roles allowed on the screen.
    pub fn allowed_roles(self) -> &'static [Role] {
        use Role::{Administrator, Cashier, InventoryClerk};

        match self {
            Self::Dashboard => &[Administrator, Cashier, InventoryClerk],
            Self::Checkout | Self::Sales => &[Administrator, Cashier],
            Self::Products | Self::Purchases => &[Administrator, InventoryClerk],
            Self::Categories | Self::Suppliers | Self::Users | Self::Reports => &[Administrator],
        }
    }

    /// Whether `role` may open the screen.
    pub fn allows(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dashboard => "dashboard",
            Self::Checkout => "punto de venta",
            Self::Products => "productos",
            Self::Categories => "categorías",
            Self::Sales => "ventas",
            Self::Purchases => "compras",
            Self::Suppliers => "proveedores",
            Self::Users => "usuarios",
            Self::Reports => "reportes",
        };

        f.write_str(name)
    }
}
