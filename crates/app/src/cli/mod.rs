use clap::{Parser, Subcommand};
use revenge_app::{config::ClientConfig, context::AppContext};

mod args;
mod catalog;
mod checkout;
mod dashboard;
mod output;
mod products;
mod purchases;
mod reports;
mod sales;
mod session;
mod users;

#[derive(Debug, Parser)]
#[command(name = "revenge-app", about = "Revenge point-of-sale admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: ClientConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Log in and keep the session for later commands
    Login(session::LoginArgs),

    /// End the current session
    Logout,

    /// Show who is logged in
    Whoami,

    /// Product catalog
    #[command(subcommand)]
    Products(products::ProductsCommand),

    /// Product categories
    #[command(subcommand)]
    Categories(catalog::CategoriesCommand),

    /// Suppliers
    #[command(subcommand)]
    Suppliers(catalog::SuppliersCommand),

    /// User accounts
    #[command(subcommand)]
    Users(users::UsersCommand),

    /// Registered sales
    #[command(subcommand)]
    Sales(sales::SalesCommand),

    /// Stock purchases
    #[command(subcommand)]
    Purchases(purchases::PurchasesCommand),

    /// Interactive checkout
    Checkout,

    /// Sales, inventory and purchases reports
    #[command(subcommand)]
    Reports(reports::ReportsCommand),

    /// Live dashboard, refreshed until Ctrl+C
    Dashboard(dashboard::DashboardArgs),
}

impl Cli {
    pub(crate) async fn run(self, context: &AppContext) -> Result<(), String> {
        match self.command {
            Commands::Login(args) => session::login(context, args).await,
            Commands::Logout => session::logout(context),
            Commands::Whoami => session::whoami(context),
            Commands::Products(command) => products::run(context, command).await,
            Commands::Categories(command) => catalog::run_categories(context, command).await,
            Commands::Suppliers(command) => catalog::run_suppliers(context, command).await,
            Commands::Users(command) => users::run(context, command).await,
            Commands::Sales(command) => sales::run(context, command).await,
            Commands::Purchases(command) => purchases::run(context, command).await,
            Commands::Checkout => checkout::run(context).await,
            Commands::Reports(command) => reports::run(context, command).await,
            Commands::Dashboard(args) => dashboard::run(context, args).await,
        }
    }
}
