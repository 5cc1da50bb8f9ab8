use clap::{Args, ValueEnum};
use revenge_app::{
    context::AppContext,
    views::{
        filters::{ProductFilter, ProductSort, StockLevel},
        pagination::DEFAULT_PAGE_SIZE,
        tables,
    },
};

use crate::cli::output::{emit_page, failed};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StockArg {
    Low,
    Healthy,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum SortArg {
    #[default]
    Name,
    Barcode,
    Price,
    Stock,
}

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Text matched against name and barcode
    #[arg(long, default_value = "")]
    search: String,

    /// Only products of this category id
    #[arg(long)]
    category: Option<u64>,

    /// Hide inactive products
    #[arg(long)]
    active: bool,

    #[arg(long, value_enum)]
    stock: Option<StockArg>,

    #[arg(long, value_enum, default_value_t)]
    sort: SortArg,

    /// Sort descending
    #[arg(long)]
    desc: bool,

    #[arg(long, default_value_t = 1)]
    page: usize,

    /// One of 10, 25, 50 or 100
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

impl ListArgs {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            search: self.search.clone(),
            category: self.category.map(Into::into),
            active_only: self.active,
            stock: self.stock.map(|stock| match stock {
                StockArg::Low => StockLevel::Low,
                StockArg::Healthy => StockLevel::Healthy,
            }),
            sort: match self.sort {
                SortArg::Name => ProductSort::Name,
                SortArg::Barcode => ProductSort::Barcode,
                SortArg::Price => ProductSort::Price,
                SortArg::Stock => ProductSort::Stock,
            },
            descending: self.desc,
        }
    }
}

pub(crate) async fn run(context: &AppContext, args: ListArgs) -> Result<(), String> {
    context
        .products
        .fetch_all()
        .await
        .map_err(failed("failed to load products"))?;

    let products = args.filter().apply(&context.products.products());
    let currency = context.settings.currency;

    emit_page(&products, args.page, args.page_size, |page| {
        tables::products(page, currency)
    })
}
