use clap::Subcommand;
use revenge_app::{auth::Screen, context::AppContext, views::tables};

use super::output::{authorize, emit, failed};

mod form;
mod list;

#[derive(Debug, Subcommand)]
pub(crate) enum ProductsCommand {
    /// List products with filters and paging
    List(list::ListArgs),

    /// Show one product
    Show {
        id: u64,
    },

    /// Look a product up by barcode
    Search {
        barcode: String,
    },

    /// Products at or below their minimum stock
    LowStock,

    /// Create a product
    Create(form::CreateArgs),

    /// Update a product; omitted fields keep their value
    Update(form::UpdateArgs),

    /// Delete a product
    Delete {
        id: u64,
    },
}

pub(crate) async fn run(context: &AppContext, command: ProductsCommand) -> Result<(), String> {
    authorize(context, Screen::Products)?;

    let currency = context.settings.currency;

    match command {
        ProductsCommand::List(args) => list::run(context, args).await,
        ProductsCommand::Show { id } => {
            let product = context
                .products
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load product"))?;

            emit(tables::product(&product, currency))
        }
        ProductsCommand::Search { barcode } => {
            let product = context
                .products
                .search_by_barcode(&barcode)
                .await
                .map_err(failed("failed to find product"))?;

            emit(tables::product(&product, currency))
        }
        ProductsCommand::LowStock => {
            let products = context
                .products
                .fetch_low_stock()
                .await
                .map_err(failed("failed to load low-stock products"))?;

            if products.is_empty() {
                return emit("Sin productos con stock bajo");
            }

            emit(tables::products(&products, currency))
        }
        ProductsCommand::Create(args) => form::create(context, args).await,
        ProductsCommand::Update(args) => form::update(context, args).await,
        ProductsCommand::Delete { id } => {
            context
                .products
                .delete(id.into())
                .await
                .map_err(failed("failed to delete product"))?;

            emit(format!("Producto {id} eliminado"))
        }
    }
}
