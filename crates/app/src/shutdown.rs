//! Interrupt handling for the long-running commands.

use std::{fmt, io};

use thiserror::Error;
use tokio::signal;
use tracing::info;

/// Failure to install a signal handler.
#[derive(Debug, Error)]
pub enum ShutdownSignalError {
    /// The Ctrl+C handler could not be installed.
    #[error("failed to listen for Ctrl+C: {0}")]
    CtrlC(#[source] io::Error),

    /// The SIGTERM handler could not be installed.
    #[cfg(unix)]
    #[error("failed to listen for SIGTERM: {0}")]
    SigTerm(#[source] io::Error),
}

/// The signal that ended a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Ctrl+C
    CtrlC,
    /// SIGTERM
    Terminate,
}

impl fmt::Display for Interrupt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CtrlC => "Ctrl+C",
            Self::Terminate => "SIGTERM",
        })
    }
}

#[cfg(unix)]
async fn terminate() -> Result<(), ShutdownSignalError> {
    signal::unix::signal(signal::unix::SignalKind::terminate())
        .map_err(ShutdownSignalError::SigTerm)?
        .recv()
        .await;

    Ok(())
}

#[cfg(not(unix))]
async fn terminate() -> Result<(), ShutdownSignalError> {
    std::future::pending().await
}

/// Resolve with the first of Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if a signal handler cannot be installed.
pub async fn wait_for_signal() -> Result<Interrupt, ShutdownSignalError> {
    let interrupt = tokio::select! {
        result = signal::ctrl_c() => {
            result.map_err(ShutdownSignalError::CtrlC)?;
            Interrupt::CtrlC
        }
        result = terminate() => {
            result?;
            Interrupt::Terminate
        }
    };

    info!(%interrupt, "interrupted");

    Ok(interrupt)
}
