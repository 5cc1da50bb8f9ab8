use clap::{Args, Subcommand};
use jiff::civil::Date;
use rust_decimal::Decimal;
use revenge_app::{
    auth::Screen,
    context::AppContext,
    domain::purchases::models::{NewPurchase, PurchaseFilters, PurchaseItem},
    views::tables,
};

use super::output::{authorize, emit, failed};

#[derive(Debug, Subcommand)]
pub(crate) enum PurchasesCommand {
    /// List purchases, newest first
    List {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        from: Option<Date>,

        /// Last day, YYYY-MM-DD
        #[arg(long)]
        to: Option<Date>,

        /// Supplier id
        #[arg(long)]
        supplier: Option<u64>,
    },

    /// Show one purchase with its lines
    Show { id: u64 },

    /// Register a purchase; stock is added by the backend
    Create(CreateArgs),
}

#[derive(Debug, Args)]
pub(crate) struct CreateArgs {
    /// Supplier id
    #[arg(long)]
    supplier: u64,

    /// Supplier invoice number
    #[arg(long)]
    invoice: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// One line as `product_id:quantity:unit_cost`; repeat for more lines
    #[arg(long = "item", value_parser = parse_item)]
    items: Vec<PurchaseItem>,
}

fn parse_item(raw: &str) -> Result<PurchaseItem, String> {
    let mut parts = raw.split(':');

    let (Some(product), Some(quantity), Some(cost), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("expected product_id:quantity:unit_cost, got `{raw}`"));
    };

    Ok(PurchaseItem {
        product_id: product
            .parse::<u64>()
            .map_err(|error| format!("invalid product id `{product}`: {error}"))?
            .into(),
        quantity: quantity
            .parse()
            .map_err(|error| format!("invalid quantity `{quantity}`: {error}"))?,
        unit_price: cost
            .parse::<Decimal>()
            .map_err(|error| format!("invalid unit cost `{cost}`: {error}"))?,
    })
}

pub(crate) async fn run(context: &AppContext, command: PurchasesCommand) -> Result<(), String> {
    let user = authorize(context, Screen::Purchases)?;

    let store = &context.purchases;
    let currency = context.settings.currency;

    match command {
        PurchasesCommand::List { from, to, supplier } => {
            store
                .fetch_all(PurchaseFilters {
                    from,
                    to,
                    supplier: supplier.map(Into::into),
                })
                .await
                .map_err(failed("failed to load purchases"))?;

            emit(tables::purchases(&store.purchases(), currency))
        }
        PurchasesCommand::Show { id } => {
            let purchase = store
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load purchase"))?;

            emit(tables::purchase(&purchase, currency))
        }
        PurchasesCommand::Create(args) => {
            let purchase = store
                .create(
                    user.id,
                    NewPurchase {
                        supplier_id: args.supplier.into(),
                        user_id: None,
                        invoice_number: args.invoice,
                        notes: args.notes,
                        items: args.items,
                    },
                )
                .await
                .map_err(failed("failed to register purchase"))?;

            emit(tables::purchase(&purchase, currency))
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn item_reads_id_quantity_and_cost() -> TestResult {
        let item = parse_item("12:6:1.80")?;

        assert_eq!(item.product_id.get(), 12);
        assert_eq!(item.quantity, 6);
        assert_eq!(item.unit_price, Decimal::new(180, 2));

        Ok(())
    }

    #[test]
    fn item_rejects_missing_or_extra_parts() {
        assert!(parse_item("12:6").is_err());
        assert!(parse_item("12:6:1.80:9").is_err());
        assert!(parse_item("x:6:1.80").is_err());
    }
}
