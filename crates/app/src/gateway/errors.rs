//! Gateway errors.

use thiserror::Error;
use validator::ValidationErrors;

/// Failure to get any response from the server.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request outlived the client timeout.
    #[error("the server took too long to respond")]
    Timeout,

    /// No connection could be made.
    #[error("could not connect to the server")]
    Connect(#[source] reqwest::Error),

    /// Any other failure while sending or reading.
    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error)
        } else {
            Self::Request(error.to_string())
        }
    }
}

/// Outcome of an API call that did not succeed.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input was rejected locally; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The server could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server rejected the session token.
    #[error("{message}")]
    Unauthorized {
        /// Server message
        message: String,
    },

    /// The server refused the request for a business reason.
    #[error("{message}")]
    Rejected {
        /// HTTP status
        status: u16,

        /// Server message, verbatim
        message: String,
    },

    /// The request body could not be encoded.
    #[error("could not encode request: {0}")]
    Encode(String),

    /// The response did not match the expected shape.
    #[error("unexpected response from the server: {0}")]
    Decode(String),

    /// The server accepted a write but its answer could not be read. The
    /// write happened; repeating it would apply it twice.
    #[error("the server accepted the request but its answer could not be read: {0}")]
    Unconfirmed(String),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let messages: Vec<String> = fields
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| {
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| format!("{field} is invalid"), ToString::to_string)
                })
            })
            .collect();

        if messages.is_empty() {
            return Self::Validation(errors.to_string());
        }

        Self::Validation(messages.join("; "))
    }
}
