//! Handler registry: request type identifier to handler.
//!
//! Populated during wiring, before any dispatch traffic. One handler per
//! request type; registering the same type again replaces the previous
//! handler.

use std::collections::HashMap;

use tracing::debug;

use crate::bus::BusError;
use crate::handler::Handler;
use crate::request::RequestType;

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Box<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `request_type`, replacing any existing entry.
    pub fn register<H>(&mut self, request_type: impl Into<String>, handler: H)
    where
        H: Handler + 'static,
    {
        let request_type = request_type.into();
        debug!(request_type = %request_type, handler = handler.name(), "registering handler");
        if let Some(previous) = self.handlers.insert(request_type.clone(), Box::new(handler)) {
            debug!(
                request_type = %request_type,
                replaced = previous.name(),
                "handler replaced"
            );
        }
    }

    /// Register `handler` under `T`'s own type identifier.
    pub fn register_for<T, H>(&mut self, handler: H)
    where
        T: RequestType,
        H: Handler + 'static,
    {
        self.register(T::TYPE_NAME, handler);
    }

    /// Find the handler for an exact request type identifier.
    pub fn lookup(&mut self, request_type: &str) -> Result<&mut dyn Handler, BusError> {
        match self.handlers.get_mut(request_type) {
            Some(handler) => Ok(&mut **handler),
            None => Err(BusError::HandlerNotFound(request_type.to_string())),
        }
    }

    /// Unregister and return the handler for `request_type`.
    pub fn remove(&mut self, request_type: &str) -> Option<Box<dyn Handler>> {
        self.handlers.remove(request_type)
    }

    pub fn contains(&self, request_type: &str) -> bool {
        self.handlers.contains_key(request_type)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered request type identifiers, sorted.
    pub fn request_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.handlers.keys().map(|s| s.as_str()).collect();
        types.sort_unstable();
        types
    }
}
