//! Payload kinds delivered through an event sink.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an error carried as a diagnostic payload.
///
/// The error object itself travels to listeners rather than a rendering of
/// it, so a listener can downcast or compare identity end to end.
pub type TrackedError = Arc<dyn StdError + Send + Sync>;

/// What a single sink write delivers to listeners.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Free-form text.
    Text(String),
    /// A structured value.
    Json(serde_json::Value),
    /// A shared error object.
    Error(TrackedError),
}

impl Payload {
    /// Wrap a concrete error into a shared error payload.
    pub fn error(error: impl StdError + Send + Sync + 'static) -> Self {
        Payload::Error(Arc::new(error))
    }
}

impl PartialEq for Payload {
    /// Error payloads compare by object identity, not by message text.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Payload::Text(a), Payload::Text(b)) => a == b,
            (Payload::Json(a), Payload::Json(b)) => a == b,
            (Payload::Error(a), Payload::Error(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Text(text) => f.write_str(text),
            Payload::Json(value) => write!(f, "{value}"),
            Payload::Error(error) => write!(f, "{error}"),
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        Payload::Json(value)
    }
}

impl From<TrackedError> for Payload {
    fn from(error: TrackedError) -> Self {
        Payload::Error(error)
    }
}
