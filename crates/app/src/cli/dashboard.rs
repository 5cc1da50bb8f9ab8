use std::{io::Write, sync::Arc, time::Duration};

use clap::Args;
use revenge_app::{
    auth::Screen,
    context::AppContext,
    shutdown::wait_for_signal,
    views::dashboard::{DEFAULT_REFRESH, Poller, write_snapshot},
};
use tracing::warn;

use super::output::{authorize, emit, emit_with, failed};

#[derive(Debug, Args)]
pub(crate) struct DashboardArgs {
    /// Seconds between refreshes
    #[arg(long, default_value_t = DEFAULT_REFRESH.as_secs())]
    every: u64,

    /// Refresh once and exit
    #[arg(long)]
    once: bool,
}

pub(crate) async fn run(context: &AppContext, args: DashboardArgs) -> Result<(), String> {
    authorize(context, Screen::Dashboard)?;

    let currency = context.settings.currency;
    let view = Arc::new(context.dashboard());

    if args.once {
        let snapshot = view
            .refresh()
            .await
            .map_err(failed("failed to load dashboard"))?;

        return emit_with(|out| write_snapshot(out, &snapshot, currency));
    }

    let mut poller = Poller::spawn(
        view,
        Duration::from_secs(args.every.max(1)),
        context.session.subscribe(),
        move |result| {
            let written = emit_with(|out| match &result {
                Ok(snapshot) => write_snapshot(out, snapshot, currency),
                Err(failure) => writeln!(out, "[error] {failure}"),
            });

            if let Err(error) = written {
                warn!(%error, "dashboard refresh not shown");
            }
        },
    );

    tokio::select! {
        result = wait_for_signal() => {
            let interrupt = result.map_err(|error| error.to_string())?;
            emit(format!("Dashboard detenido ({interrupt})"))
        }
        () = poller.finished() => Err("session ended; dashboard stopped".to_string()),
    }
}
