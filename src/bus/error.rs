//! Error types for bus dispatch.

use std::error::Error;
use std::fmt;

use crate::handler::HandlerError;

/// Error returned by `Dispatch::dispatch`.
#[derive(Debug)]
pub enum BusError {
    /// No handler registered for this request type.
    HandlerNotFound(String),
    /// The request guard refused the request before routing.
    Rejected { request_type: String, reason: String },
    /// The handler failed. Carries the handler's own error as the source.
    Dispatch {
        request_type: String,
        source: HandlerError,
    },
    /// The result store failed. The store's error is kept as-is.
    Store(Box<dyn Error + Send + Sync>),
    /// A follow-up would have been dispatched deeper than the configured limit.
    CascadeLimitExceeded { request_type: String, limit: usize },
}

impl BusError {
    /// The request type the error is about, when there is one.
    pub fn request_type(&self) -> Option<&str> {
        match self {
            BusError::HandlerNotFound(request_type)
            | BusError::Rejected { request_type, .. }
            | BusError::Dispatch { request_type, .. }
            | BusError::CascadeLimitExceeded { request_type, .. } => Some(request_type.as_str()),
            BusError::Store(_) => None,
        }
    }

    /// Borrow the handler error behind a `Dispatch` failure.
    pub fn handler_error(&self) -> Option<&HandlerError> {
        match self {
            BusError::Dispatch { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Recover the concrete store error behind a `Store` failure.
    pub fn downcast_store_error<E: Error + 'static>(&self) -> Option<&E> {
        match self {
            BusError::Store(e) => e.downcast_ref::<E>(),
            _ => None,
        }
    }
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::HandlerNotFound(request_type) => {
                write!(f, "Cannot find handler for command: '{}'.", request_type)
            }
            BusError::Rejected {
                request_type,
                reason,
            } => write!(f, "Command '{}' was rejected: {}", request_type, reason),
            BusError::Dispatch { request_type, .. } => {
                write!(f, "Command '{}' cannot be handled.", request_type)
            }
            BusError::Store(e) => fmt::Display::fmt(e, f),
            BusError::CascadeLimitExceeded {
                request_type,
                limit,
            } => write!(
                f,
                "Command '{}' exceeds the maximum cascade depth of {}.",
                request_type, limit
            ),
        }
    }
}

impl Error for BusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BusError::Dispatch { source, .. } => Some(source),
            BusError::Store(e) => e.source(),
            _ => None,
        }
    }
}
