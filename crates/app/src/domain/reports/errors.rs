//! Report errors.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::domain::result::ActionFailure;

/// Failure to export a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The server did not produce the document.
    #[error(transparent)]
    Action(#[from] ActionFailure),

    /// The server answered with something other than a PDF.
    #[error("the server did not return a PDF document")]
    NotPdf,

    /// The document could not be written.
    #[error("could not write {path}: {source}")]
    Write {
        /// File that was being written
        path: PathBuf,

        /// Underlying error

        #[source]
        source: io::Error,
    },
}
