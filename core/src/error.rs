//! Error types for the inventory client.
//!
//! # Design
//! Every remote failure collapses into one kind, `RemoteError`, carrying the
//! text the user will see. The server's own wording wins when present
//! (`message`, then `detail`); otherwise each operation has a fixed fallback.
//! Local form checks use `ValidationError` and never reach the network.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::types::Operation;

/// A failed remote operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RemoteError {
    /// HTTP status, absent when the request never got a response.
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteError {
    /// Build from a non-success (or undecodable) response body.
    pub fn from_response(operation: Operation, status: u16, body: &str) -> Self {
        let message = extract_message(body).unwrap_or_else(|| operation.fallback_message().to_string());
        Self {
            status: Some(status),
            message,
        }
    }

    /// The request could not be delivered or its response could not be read.
    pub fn unreachable(operation: Operation) -> Self {
        Self {
            status: None,
            message: operation.fallback_message().to_string(),
        }
    }
}

/// Local form check failures. Shown to the user the same way as remote
/// errors, but no request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Price cannot be negative.")]
    NegativePrice,

    #[error("Price must be a number.")]
    NotANumber,
}

/// Text for a blocking user notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice(String);

impl Notice {
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&RemoteError> for Notice {
    fn from(err: &RemoteError) -> Self {
        Notice(format!("Error: {}", err.message))
    }
}

impl From<RemoteError> for Notice {
    fn from(err: RemoteError) -> Self {
        Notice::from(&err)
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Notice(err.to_string())
    }
}

/// Pull a user-facing message out of a JSON error body: `message` first,
/// then `detail`. Empty strings and nulls count as absent.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    object
        .get("message")
        .and_then(describe)
        .or_else(|| object.get("detail").and_then(describe))
}

fn describe(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        // FastAPI validation errors: [{"loc": [...], "msg": "...", "type": "..."}]
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::Object(entry) => entry.get("msg").and_then(describe),
                    other => describe(other),
                })
                .collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => None,
    }
}
