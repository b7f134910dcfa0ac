//! Error bodies returned by the backend.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error body returned by the backend for non-2xx responses.
///
/// The backend reports failures as `{"detail": ...}` where `detail` is either
/// a human-readable string or, for request validation failures, a list of
/// entries each carrying a `msg` field.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ErrorDetail {
    /// Raw `detail` payload, absent when the body carried none.
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorDetail {
    /// Creates an error body with a plain string detail.
    #[must_use]
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(Value::String(detail.into())),
        }
    }

    /// Parses an error body, returning `None` when it is not JSON.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Extracts a human-readable message from the detail payload.
    ///
    /// # Returns
    /// The detail string itself, the joined `msg` entries of a validation
    /// list, or `None` when neither shape yields any text.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
            Value::Array(entries) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|entry| entry.get("msg").and_then(Value::as_str))
                    .collect();
                if messages.is_empty() {
                    None
                } else {
                    Some(messages.join("; "))
                }
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ErrorDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.message() {
            Some(message) => write!(f, "{message}"),
            None => write!(f, "no detail"),
        }
    }
}
