//! Categories and suppliers: plain CRUD over their stores.

use clap::{Args, Subcommand};
use revenge_app::{
    auth::Screen,
    context::AppContext,
    domain::{categories::models::CategoryForm, suppliers::models::SupplierForm},
    views::tables,
};

use super::{
    args::{StatusArg, set, set_text},
    output::{authorize, emit, failed},
};

#[derive(Debug, Subcommand)]
pub(crate) enum CategoriesCommand {
    /// List categories
    List {
        /// Hide inactive categories
        #[arg(long)]
        active: bool,
    },

    /// Show one category
    Show { id: u64 },

    /// Create a category
    Create(CategoryArgs),

    /// Update a category; omitted fields keep their value
    Update {
        id: u64,

        #[command(flatten)]
        fields: CategoryArgs,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Delete a category
    Delete { id: u64 },
}

#[derive(Debug, Args)]
pub(crate) struct CategoryArgs {
    #[arg(long)]
    name: Option<String>,

    /// An empty value clears the description
    #[arg(long)]
    description: Option<String>,
}

pub(crate) async fn run_categories(
    context: &AppContext,
    command: CategoriesCommand,
) -> Result<(), String> {
    authorize(context, Screen::Categories)?;

    let store = &context.categories;

    match command {
        CategoriesCommand::List { active } => {
            store
                .fetch_all()
                .await
                .map_err(failed("failed to load categories"))?;

            let categories = if active { store.active() } else { store.categories() };

            emit(tables::categories(&categories))
        }
        CategoriesCommand::Show { id } => {
            let category = store
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load category"))?;

            emit(tables::category(&category))
        }
        CategoriesCommand::Create(fields) => {
            let mut form = CategoryForm::default();
            set(&mut form.name, fields.name);
            set_text(&mut form.description, fields.description);

            let category = store
                .create(form)
                .await
                .map_err(failed("failed to create category"))?;

            emit(tables::category(&category))
        }
        CategoriesCommand::Update { id, fields, status } => {
            let current = store
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load category"))?;

            let mut form = CategoryForm::from(&current);
            set(&mut form.name, fields.name);
            set_text(&mut form.description, fields.description);
            set(&mut form.status, status.map(|status| Some(status.into())));

            let category = store
                .update(id.into(), form)
                .await
                .map_err(failed("failed to update category"))?;

            emit(tables::category(&category))
        }
        CategoriesCommand::Delete { id } => {
            store
                .delete(id.into())
                .await
                .map_err(failed("failed to delete category"))?;

            emit(format!("Categoría {id} eliminada"))
        }
    }
}

#[derive(Debug, Subcommand)]
pub(crate) enum SuppliersCommand {
    /// List suppliers
    List {
        /// Hide inactive suppliers
        #[arg(long)]
        active: bool,
    },

    /// Show one supplier
    Show { id: u64 },

    /// Create a supplier
    Create {
        #[arg(long)]
        name: String,

        #[command(flatten)]
        fields: SupplierArgs,
    },

    /// Update a supplier; omitted fields keep their value
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[command(flatten)]
        fields: SupplierArgs,
    },

    /// Delete a supplier
    Delete { id: u64 },
}

/// Optional supplier fields. An empty value clears the field.
#[derive(Debug, Args)]
pub(crate) struct SupplierArgs {
    /// Eleven-digit RUC
    #[arg(long)]
    ruc: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    email: Option<String>,

    /// Contact person
    #[arg(long)]
    contact: Option<String>,
}

impl SupplierArgs {
    fn apply(self, form: &mut SupplierForm) {
        set_text(&mut form.ruc, self.ruc);
        set_text(&mut form.phone, self.phone);
        set_text(&mut form.address, self.address);
        set_text(&mut form.email, self.email);
        set_text(&mut form.contact, self.contact);
    }
}

pub(crate) async fn run_suppliers(
    context: &AppContext,
    command: SuppliersCommand,
) -> Result<(), String> {
    authorize(context, Screen::Suppliers)?;

    let store = &context.suppliers;

    match command {
        SuppliersCommand::List { active } => {
            store
                .fetch_all()
                .await
                .map_err(failed("failed to load suppliers"))?;

            let suppliers = if active { store.active() } else { store.suppliers() };

            emit(tables::suppliers(&suppliers))
        }
        SuppliersCommand::Show { id } => {
            let supplier = store
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load supplier"))?;

            emit(tables::supplier(&supplier))
        }
        SuppliersCommand::Create { name, fields } => {
            let mut form = SupplierForm {
                name,
                ..SupplierForm::default()
            };
            fields.apply(&mut form);

            let supplier = store
                .create(form)
                .await
                .map_err(failed("failed to create supplier"))?;

            emit(tables::supplier(&supplier))
        }
        SuppliersCommand::Update { id, name, fields } => {
            let current = store
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load supplier"))?;

            let mut form = SupplierForm::from(&current);
            set(&mut form.name, name);
            fields.apply(&mut form);

            let supplier = store
                .update(id.into(), form)
                .await
                .map_err(failed("failed to update supplier"))?;

            emit(tables::supplier(&supplier))
        }
        SuppliersCommand::Delete { id } => {
            store
                .delete(id.into())
                .await
                .map_err(failed("failed to delete supplier"))?;

            emit(format!("Proveedor {id} eliminado"))
        }
    }
}
