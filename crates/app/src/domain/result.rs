//! Action results.

use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    auth::AccessDenied,
    gateway::{ApiError, TransportError},
};

/// Outcome of a store action: the data, or a message for the user.
pub type ActionResult<T> = Result<T, ActionFailure>;

/// Which kind of failure the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The form was invalid; nothing was sent.
    Validation,

    /// The server could not be reached. Retrying may help.
    Transport,

    /// The session ended; the user must log in again.
    Unauthorized,

    /// The server refused for a business reason.
    Rejected,

    /// The server answered with something unreadable.
    Unexpected,

    /// The server accepted the action but its answer was unreadable. Do not retry.
    Unconfirmed,
}

/// A failed store action, ready to show.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionFailure {
    /// What went wrong, for choosing how to show it
    pub kind: FailureKind,
    /// User-facing text
    pub message: String,
}

impl ActionFailure {
    /// A local validation failure; nothing was sent.
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Validation,
            message: message.into(),
        }
    }

    /// Whether the failure ended the session.
    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }
}

impl From<ApiError> for ActionFailure {
    fn from(error: ApiError) -> Self {
        let kind = match &error {
            ApiError::Validation(_) => FailureKind::Validation,
            ApiError::Transport(_) => FailureKind::Transport,
            ApiError::Unauthorized { .. } => FailureKind::Unauthorized,
            ApiError::Rejected { .. } => FailureKind::Rejected,
            ApiError::Encode(_) | ApiError::Decode(_) => FailureKind::Unexpected,
            ApiError::Unconfirmed(_) => FailureKind::Unconfirmed,
        };

        Self {
            kind,
            message: error.to_string(),
        }
    }
}

impl From<TransportError> for ActionFailure {
    fn from(error: TransportError) -> Self {
        ApiError::from(error).into()
    }
}

impl From<AccessDenied> for ActionFailure {
    fn from(denied: AccessDenied) -> Self {
        let kind = match denied {
            AccessDenied::LoginRequired => FailureKind::Unauthorized,
            AccessDenied::Forbidden(_) => FailureKind::Rejected,
        };

        Self {
            kind,
            message: denied.to_string(),
        }
    }
}

impl From<ValidationErrors> for ActionFailure {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::from(errors).into()
    }
}
