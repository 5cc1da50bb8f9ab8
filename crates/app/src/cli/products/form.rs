use clap::Args;
use rust_decimal::Decimal;
use revenge_app::{
    context::AppContext,
    domain::products::models::ProductForm,
    views::tables,
};

use crate::cli::{
    args::{StatusArg, set, set_text},
    output::{emit, failed},
};

#[derive(Debug, Args)]
pub(crate) struct CreateArgs {
    #[arg(long)]
    barcode: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    description: Option<String>,

    /// Category id
    #[arg(long)]
    category: u64,

    #[arg(long)]
    purchase_price: Decimal,

    #[arg(long)]
    sale_price: Decimal,

    #[arg(long, default_value_t = 0)]
    stock: u32,

    #[arg(long, default_value_t = 0)]
    min_stock: u32,
}

#[derive(Debug, Args)]
pub(crate) struct UpdateArgs {
    id: u64,

    #[arg(long)]
    barcode: Option<String>,

    #[arg(long)]
    name: Option<String>,

    /// An empty value clears the description
    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    category: Option<u64>,

    #[arg(long)]
    purchase_price: Option<Decimal>,

    #[arg(long)]
    sale_price: Option<Decimal>,

    #[arg(long)]
    stock: Option<u32>,

    #[arg(long)]
    min_stock: Option<u32>,

    #[arg(long, value_enum)]
    status: Option<StatusArg>,
}

pub(crate) async fn create(context: &AppContext, args: CreateArgs) -> Result<(), String> {
    let form = ProductForm {
        barcode: args.barcode,
        name: args.name,
        description: args.description,
        category_id: args.category.into(),
        purchase_price: args.purchase_price,
        sale_price: args.sale_price,
        stock: args.stock,
        min_stock: args.min_stock,
        status: None,
    };

    let product = context
        .products
        .create(form)
        .await
        .map_err(failed("failed to create product"))?;

    emit(tables::product(&product, context.settings.currency))
}

pub(crate) async fn update(context: &AppContext, args: UpdateArgs) -> Result<(), String> {
    let id = args.id.into();

    let current = context
        .products
        .fetch_one(id)
        .await
        .map_err(failed("failed to load product"))?;

    let mut form = ProductForm::from(&current);

    set(&mut form.barcode, args.barcode);
    set(&mut form.name, args.name);
    set_text(&mut form.description, args.description);
    set(&mut form.category_id, args.category.map(Into::into));
    set(&mut form.purchase_price, args.purchase_price);
    set(&mut form.sale_price, args.sale_price);
    set(&mut form.stock, args.stock);
    set(&mut form.min_stock, args.min_stock);
    set(&mut form.status, args.status.map(|status| Some(status.into())));

    let product = context
        .products
        .update(id, form)
        .await
        .map_err(failed("failed to update product"))?;

    emit(tables::product(&product, context.settings.currency))
}
