use std::path::PathBuf;

use clap::{Args, Subcommand};
use jiff::civil::Date;
use revenge_app::{
    auth::Screen,
    context::AppContext,
    domain::reports::models::{ReportKind, ReportRange},
    views::reports::{write_inventory, write_purchases, write_sales},
};

use super::output::{authorize, emit, emit_with, failed};

#[derive(Debug, Subcommand)]
pub(crate) enum ReportsCommand {
    /// Sales by day, product, payment method and cashier
    Sales(RangeArgs),

    /// Stock value by category and stock alerts
    Inventory {
        #[command(flatten)]
        export: ExportArgs,
    },

    /// Purchases by supplier, product and day
    Purchases(RangeArgs),
}

#[derive(Debug, Args)]
pub(crate) struct RangeArgs {
    /// First day, YYYY-MM-DD
    #[arg(long)]
    from: Option<Date>,

    /// Last day, YYYY-MM-DD
    #[arg(long)]
    to: Option<Date>,

    #[command(flatten)]
    export: ExportArgs,
}

impl RangeArgs {
    fn range(&self) -> ReportRange {
        ReportRange {
            from: self.from,
            to: self.to,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct ExportArgs {
    /// Download the server's PDF into this directory instead of printing
    #[arg(long, value_name = "DIR")]
    pdf: Option<PathBuf>,
}

async fn export(
    context: &AppContext,
    kind: ReportKind,
    range: ReportRange,
    dir: PathBuf,
) -> Result<(), String> {
    let path = context
        .reports
        .export_pdf(kind, range, &dir)
        .await
        .map_err(|error| format!("failed to export {kind} report: {error}"))?;

    emit(format!("Reporte guardado en {}", path.display()))
}

pub(crate) async fn run(context: &AppContext, command: ReportsCommand) -> Result<(), String> {
    authorize(context, Screen::Reports)?;

    let currency = context.settings.currency;
    let reports = &context.reports;

    match command {
        ReportsCommand::Sales(args) => {
            if let Some(dir) = args.export.pdf.clone() {
                return export(context, ReportKind::Sales, args.range(), dir).await;
            }

            let report = reports
                .load_sales(args.range())
                .await
                .map_err(failed("failed to load sales report"))?;

            emit_with(|out| write_sales(out, &report, currency))
        }
        ReportsCommand::Inventory { export: args } => {
            if let Some(dir) = args.pdf {
                return export(context, ReportKind::Inventory, ReportRange::default(), dir).await;
            }

            let report = reports
                .load_inventory()
                .await
                .map_err(failed("failed to load inventory report"))?;

            emit_with(|out| write_inventory(out, &report, currency))
        }
        ReportsCommand::Purchases(args) => {
            if let Some(dir) = args.export.pdf.clone() {
                return export(context, ReportKind::Purchases, args.range(), dir).await;
            }

            let report = reports
                .load_purchases(args.range())
                .await
                .map_err(failed("failed to load purchases report"))?;

            emit_with(|out| write_purchases(out, &report, currency))
        }
    }
}
