use std::io::{self, Write};

use revenge::receipt::write_cart;
use revenge_app::{
    auth::Screen,
    context::AppContext,
    shutdown::wait_for_signal,
    views::{
        checkout::{CheckoutCommand, HELP, Step},
        tables,
    },
};
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tracing::info;

use super::output::{authorize, emit, emit_with};

fn prompt() -> Result<(), String> {
    let mut out = io::stdout().lock();

    write!(out, "> ")
        .and_then(|()| out.flush())
        .map_err(|error| format!("failed to write prompt: {error}"))
}

/// Read checkout commands from stdin until `quit`, end of input or a signal.
pub(crate) async fn run(context: &AppContext) -> Result<(), String> {
    let user = authorize(context, Screen::Checkout)?;
    let currency = context.settings.currency;

    let mut checkout = context.checkout();
    let mut lines = BufReader::new(stdin()).lines();

    info!(cashier = %user.email, "checkout opened");
    emit(format!("Caja de {}. Escriba `help` para ver los comandos.", user.name))?;

    loop {
        prompt()?;

        let line = tokio::select! {
            line = lines.next_line() => {
                line.map_err(|error| format!("failed to read input: {error}"))?
            }
            result = wait_for_signal() => {
                let interrupt = result.map_err(|error| error.to_string())?;
                emit(format!("\nInterrumpido ({interrupt})"))?;
                None
            }
        };

        let Some(line) = line else {
            break;
        };

        if line.trim().is_empty() {
            continue;
        }

        let step = match line.parse::<CheckoutCommand>() {
            Ok(command) => checkout.execute(command).await,
            Err(message) => {
                emit(message)?;
                continue;
            }
        };

        for notification in checkout.notifications().drain() {
            emit(notification)?;
        }

        match step {
            Step::Continue => {}
            Step::ShowCart => emit_with(|out| {
                write_cart(out, checkout.cart(), currency).map_err(io::Error::other)
            })?,
            Step::ShowHelp => emit(HELP)?,
            Step::Submitted(sale) => emit(tables::sale(&sale, currency))?,
            Step::Quit => break,
        }

        if !context.session.is_authenticated() {
            return Err("session expired; log in again".to_string());
        }
    }

    if !checkout.cart().is_empty() {
        emit("Venta sin registrar descartada")?;
    }

    info!(cashier = %user.email, "checkout closed");

    Ok(())
}
