//! Auth errors.

use std::io;

use thiserror::Error;

use crate::{auth::roles::Screen, gateway::ApiError};

/// Failure to log in.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server refused the credentials; its message is kept verbatim.
    #[error("{0}")]
    Rejected(String),

    /// Login could not be attempted or completed.
    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for AuthError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Unauthorized { message } | ApiError::Rejected { message, .. } => {
                Self::Rejected(message)
            }
            other => Self::Api(other),
        }
    }
}

/// Failure to read or write the persisted session.
#[derive(Debug, Error)]
pub enum SessionStorageError {
    /// The file could not be read or written.
    #[error("session file I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The file is not a saved session.
    #[error("session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Why a screen cannot be opened.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessDenied {
    /// Nobody is logged in.
    #[error("log in first")]
    LoginRequired,

    /// The user's role may not open the screen.
    #[error("your role cannot open {0}")]
    Forbidden(Screen),
}
