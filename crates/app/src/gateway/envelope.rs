//! Response envelope.
//!
//! The backend wraps payloads as `{success, data, message}` but some
//! endpoints answer with the bare payload. Both shapes are resolved here and
//! nowhere else.

use serde_json::{Map, Value};

use crate::gateway::errors::ApiError;

#[derive(Debug, Default)]
pub(crate) struct Envelope {
    success: Option<bool>,
    message: Option<String>,
    data: Option<Value>,
    bare: Option<Value>,
}

impl Envelope {
    pub(crate) fn parse(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        let value: Value =
            serde_json::from_slice(body).map_err(|error| ApiError::Decode(error.to_string()))?;

        Ok(match value {
            Value::Object(mut map) if is_envelope(&map) => Self {
                success: map.get("success").and_then(Value::as_bool),
                message: message_of(&map),
                data: map.remove("data"),
                bare: None,
            },
            Value::Object(map) => Self {
                message: message_of(&map),
                bare: Some(Value::Object(map)),
                ..Self::default()
            },
            other => Self {
                bare: Some(other),
                ..Self::default()
            },
        })
    }

    /// Server message, if any.
    pub(crate) fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// The payload of a 2xx response.
    pub(crate) fn into_data(self, status: u16) -> Result<Value, ApiError> {
        if self.success == Some(false) {
            return Err(ApiError::Rejected {
                status,
                message: self
                    .message
                    .unwrap_or_else(|| failure_message(status).to_string()),
            });
        }

        Ok(self.data.or(self.bare).unwrap_or(Value::Null))
    }
}

fn is_envelope(map: &Map<String, Value>) -> bool {
    map.contains_key("success") || map.contains_key("error")
}

fn message_of(map: &Map<String, Value>) -> Option<String> {
    map.get("message")
        .and_then(Value::as_str)
        .map(ToString::to_string)
}

/// Fallback shown when the server gives no message.
pub(crate) fn failure_message(status: u16) -> &'static str {
    match status {
        400 => "the request was rejected",
        401 => "your session has expired, log in again",
        403 => "you are not allowed to do that",
        404 => "not found",
        409 => "it already exists",
        500..=599 => "the server failed to process the request",
        _ => "the request failed",
    }
}
