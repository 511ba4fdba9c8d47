//! Failure observers: notified when a handler fails.

use tracing::warn;

use crate::handler::{Handler, HandlerError};

/// Observes handler failures before the bus wraps them in
/// `BusError::Dispatch`.
///
/// Called exactly once per failed invocation. Infallible: compensation or
/// logging done here cannot change the error the caller receives.
pub trait FailureObserver {
    fn on_handler_failure(&mut self, handler: &dyn Handler, request_type: &str, error: &HandlerError);
}

/// Logs failures as `tracing` warnings. The default observer.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFailures;

impl FailureObserver for LogFailures {
    fn on_handler_failure(&mut self, handler: &dyn Handler, request_type: &str, error: &HandlerError) {
        warn!(
            handler = handler.name(),
            request_type,
            error = %error,
            "handler failed"
        );
    }
}

/// Ignores failures.
#[derive(Debug, Default, Clone, Copy)]
pub struct IgnoreFailures;

impl FailureObserver for IgnoreFailures {
    fn on_handler_failure(&mut self, _handler: &dyn Handler, _request_type: &str, _error: &HandlerError) {}
}

impl<O: FailureObserver + ?Sized> FailureObserver for Box<O> {
    fn on_handler_failure(&mut self, handler: &dyn Handler, request_type: &str, error: &HandlerError) {
        (**self).on_handler_failure(handler, request_type, error)
    }
}
