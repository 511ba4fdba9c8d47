//! Error type returned by request handlers.

use std::error::Error;
use std::fmt;

/// Domain failure raised by a handler.
///
/// The bus never inspects the variant; it wraps whatever the handler
/// returns in `BusError::Dispatch`.
#[derive(Debug)]
pub enum HandlerError {
    /// Business logic rejected the request (validation, invariant violation).
    Rejected(String),
    /// Aggregate or resource not found.
    NotFound(String),
    /// The handler was registered for a different request type.
    UnexpectedRequest {
        expected: &'static str,
        actual: &'static str,
    },
    /// Payload encode/decode failed.
    DecodeFailed(String),
    /// Other error.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Rejected(msg) => write!(f, "rejected: {}", msg),
            HandlerError::NotFound(id) => write!(f, "not found: {}", id),
            HandlerError::UnexpectedRequest { expected, actual } => write!(
                f,
                "unexpected request: handler expects '{}', got '{}'",
                expected, actual
            ),
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::Other(e) => write!(f, "handler error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}
