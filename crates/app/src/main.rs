//! Revenge point-of-sale admin CLI

use std::process::ExitCode;

use clap::Parser;
use revenge_app::{context::AppContext, observability};

mod cli;

use cli::Cli;

#[tokio::main]
pub async fn main() -> ExitCode {
    let _env = dotenvy::dotenv();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            report(&error);

            ExitCode::FAILURE
        }
    }
}

#[expect(clippy::print_stderr, reason = "the final error goes to stderr")]
fn report(error: &str) {
    eprintln!("{error}");
}

async fn run(cli: Cli) -> Result<(), String> {
    let settings = cli
        .config
        .validate()
        .map_err(|error| format!("invalid configuration: {error}"))?;

    observability::init(&cli.config.logging)
        .map_err(|error| format!("failed to initialise logging: {error}"))?;

    let context = AppContext::from_settings(settings)
        .map_err(|error| format!("failed to start: {error}"))?;

    cli.run(&context).await
}
