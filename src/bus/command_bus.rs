use serde_json::Value;
use tracing::{debug, warn};

use super::config::BusConfig;
use super::error::BusError;
use super::observer::{FailureObserver, LogFailures};
use super::store::ResultStore;
use super::Dispatch;
use crate::handler::Handler;
use crate::registry::HandlerRegistry;
use crate::request::{CommandList, Request, RequestKind, RequestType};

type Guard = Box<dyn Fn(&dyn Request) -> Result<(), String>>;

/// Synchronous CQRS bus.
///
/// Generic over the result store `S` and the failure observer `O`.
/// Handlers are registered once during wiring and reused for every
/// dispatch.
pub struct CommandBus<S, O = LogFailures> {
    registry: HandlerRegistry,
    store: S,
    observer: O,
    guard: Option<Guard>,
    config: BusConfig,
}

impl<S: ResultStore> CommandBus<S> {
    /// Create a bus that persists command results into `store` and logs
    /// handler failures.
    pub fn new(store: S) -> Self {
        Self {
            registry: HandlerRegistry::new(),
            store,
            observer: LogFailures,
            guard: None,
            config: BusConfig::default(),
        }
    }
}

impl<S: ResultStore, O: FailureObserver> CommandBus<S, O> {
    /// Replace the failure observer.
    pub fn with_observer<P: FailureObserver>(self, observer: P) -> CommandBus<S, P> {
        CommandBus {
            registry: self.registry,
            store: self.store,
            observer,
            guard: self.guard,
            config: self.config,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: BusConfig) -> Self {
        self.config = config;
        self
    }

    /// Install a check run on every request, follow-ups included, before
    /// routing. Returning `Err(reason)` fails the dispatch with
    /// `BusError::Rejected`.
    pub fn with_guard<G>(mut self, guard: G) -> Self
    where
        G: Fn(&dyn Request) -> Result<(), String> + 'static,
    {
        self.guard = Some(Box::new(guard));
        self
    }

    /// Register a handler. Builder form of [`CommandBus::register`].
    pub fn handler<H>(mut self, request_type: &str, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.register(request_type, handler);
        self
    }

    /// Register a handler under `T`'s type identifier. Builder form of
    /// [`CommandBus::register_for`].
    pub fn handler_for<T, H>(mut self, handler: H) -> Self
    where
        T: RequestType,
        H: Handler + 'static,
    {
        self.register_for::<T, H>(handler);
        self
    }

    /// Register `handler` for `request_type`, replacing any existing entry.
    pub fn register<H>(&mut self, request_type: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.registry.register(request_type, handler);
    }

    /// Register `handler` under `T`'s type identifier.
    pub fn register_for<T, H>(&mut self, handler: H)
    where
        T: RequestType,
        H: Handler + 'static,
    {
        self.registry.register_for::<T, H>(handler);
    }

    /// Registered request type identifiers, sorted.
    pub fn request_types(&self) -> Vec<&str> {
        self.registry.request_types()
    }

    /// Get a reference to the handler registry.
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Get a mutable reference to the handler registry.
    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    /// Get a reference to the result store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get a mutable reference to the result store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Get a reference to the failure observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Get the active configuration.
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Depth check and guard, run for every request before routing.
    fn admit(&self, request: &dyn Request, depth: usize) -> Result<RequestKind, BusError> {
        let request_type = request.request_type();
        let kind = request.kind();

        if depth > self.config.max_cascade_depth {
            warn!(
                request_type,
                depth,
                limit = self.config.max_cascade_depth,
                "cascade depth exceeded"
            );
            return Err(BusError::CascadeLimitExceeded {
                request_type: request_type.to_string(),
                limit: self.config.max_cascade_depth,
            });
        }

        if let Some(guard) = &self.guard {
            guard(request).map_err(|reason| BusError::Rejected {
                request_type: request_type.to_string(),
                reason,
            })?;
        }

        debug!(request_type, kind = %kind, depth, "dispatching request");
        Ok(kind)
    }

    fn dispatch_query(&mut self, query: &dyn Request) -> Result<Value, BusError> {
        let (value, next) = self.invoke(query)?;
        if next.is_not_empty() {
            debug!(
                request_type = query.request_type(),
                discarded = next.len(),
                "query handler enqueued follow-ups; queries do not cascade"
            );
        }
        Ok(value)
    }

    /// Run the command and save its result, returning the follow-ups.
    fn dispatch_command(&mut self, command: &dyn Request) -> Result<CommandList, BusError> {
        let (value, next) = self.invoke(command)?;

        self.store
            .save_result(value)
            .map_err(|e| BusError::Store(Box::new(e)))?;

        if next.is_not_empty() {
            debug!(
                request_type = command.request_type(),
                follow_ups = next.len(),
                "cascading follow-ups"
            );
        }
        Ok(next)
    }

    /// Dispatch follow-ups depth-first, left to right, from an explicit
    /// work stack so cascade depth never grows the call stack.
    fn cascade(&mut self, next: CommandList) -> Result<(), BusError> {
        let mut pending: Vec<(Box<dyn Request>, usize)> = Vec::new();
        push_follow_ups(&mut pending, next, 1);

        while let Some((request, depth)) = pending.pop() {
            match self.admit(&*request, depth)? {
                RequestKind::Query => {
                    self.dispatch_query(&*request)?;
                }
                RequestKind::Command => {
                    let next = self.dispatch_command(&*request)?;
                    push_follow_ups(&mut pending, next, depth + 1);
                }
            }
        }
        Ok(())
    }

    /// Look up and run the handler. Its follow-up list is emptied before the
    /// call and drained after it, whatever the outcome.
    fn invoke(&mut self, request: &dyn Request) -> Result<(Value, CommandList), BusError> {
        let request_type = request.request_type();
        let handler = self.registry.lookup(request_type)?;

        let stale = handler.next_commands().take();
        if stale.is_not_empty() {
            debug!(
                request_type,
                discarded = stale.len(),
                "dropping follow-ups enqueued outside handle"
            );
        }

        let outcome = handler.handle(request);
        let next = handler.next_commands().take();

        match outcome {
            Ok(value) => Ok((value, next)),
            Err(error) => {
                if next.is_not_empty() {
                    debug!(
                        request_type,
                        discarded = next.len(),
                        "dropping follow-ups of failed handler"
                    );
                }
                self.observer
                    .on_handler_failure(&*handler, request_type, &error);
                Err(BusError::Dispatch {
                    request_type: request_type.to_string(),
                    source: error,
                })
            }
        }
    }
}

impl<S: ResultStore, O: FailureObserver> Dispatch for CommandBus<S, O> {
    fn dispatch(&mut self, request: &dyn Request) -> Result<Option<Value>, BusError> {
        match self.admit(request, 0)? {
            RequestKind::Query => self.dispatch_query(request).map(Some),
            RequestKind::Command => {
                let next = self.dispatch_command(request)?;
                self.cascade(next)?;
                Ok(None)
            }
        }
    }
}

/// Push in reverse so the first follow-up is popped first.
fn push_follow_ups(pending: &mut Vec<(Box<dyn Request>, usize)>, next: CommandList, depth: usize) {
    pending.extend(next.into_iter().rev().map(|request| (request, depth)));
}
