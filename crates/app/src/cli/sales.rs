use clap::{Args, Subcommand};
use jiff::civil::Date;
use revenge::checkout::PaymentMethod;
use revenge_app::{
    auth::Screen,
    context::AppContext,
    domain::sales::models::SaleFilters,
    views::{checkout::parse_payment_method, format::money, pagination::DEFAULT_PAGE_SIZE, tables},
};

use super::output::{authorize, emit, emit_page, failed};

#[derive(Debug, Subcommand)]
pub(crate) enum SalesCommand {
    /// List sales, newest first
    List(ListArgs),

    /// Show one sale with its lines
    Show { id: u64 },

    /// Today's sales and their total
    Today,
}

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    from: Option<Date>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    to: Option<Date>,

    /// Payment method id or name
    #[arg(long, value_parser = payment_method)]
    payment: Option<PaymentMethod>,

    /// Cashier user id
    #[arg(long)]
    cashier: Option<u64>,

    #[arg(long, default_value_t = 1)]
    page: usize,

    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

fn payment_method(raw: &str) -> Result<PaymentMethod, String> {
    parse_payment_method(raw).ok_or_else(|| format!("unknown payment method `{raw}`"))
}

pub(crate) async fn run(context: &AppContext, command: SalesCommand) -> Result<(), String> {
    authorize(context, Screen::Sales)?;

    let store = &context.sales;
    let currency = context.settings.currency;

    match command {
        SalesCommand::List(args) => {
            store
                .fetch_all(SaleFilters {
                    from: args.from,
                    to: args.to,
                    payment_method: args.payment,
                    cashier: args.cashier.map(Into::into),
                })
                .await
                .map_err(failed("failed to load sales"))?;

            emit_page(&store.sales(), args.page, args.page_size, |page| {
                tables::sales(page, currency)
            })
        }
        SalesCommand::Show { id } => {
            let sale = store
                .fetch_one(id.into())
                .await
                .map_err(failed("failed to load sale"))?;

            emit(tables::sale(&sale, currency))
        }
        SalesCommand::Today => {
            store
                .fetch_today()
                .await
                .map_err(failed("failed to load today's sales"))?;

            let summary = store.today_summary();

            emit(format!(
                "{}\nVentas: {}  Total: {}",
                tables::sales(&store.sales(), currency),
                summary.count,
                money(summary.amount, currency)
            ))
        }
    }
}
