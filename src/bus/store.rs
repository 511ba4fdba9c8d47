//! Result stores: where the bus persists command results.

use std::convert::Infallible;
use std::error::Error;

use serde_json::Value;

/// Persistence collaborator for command results.
///
/// Called once per successfully handled command, before any follow-ups are
/// dispatched. Query results never reach the store. A failure is returned
/// to the caller untouched inside `BusError::Store`.
pub trait ResultStore {
    type Error: Error + Send + Sync + 'static;

    fn save_result(&mut self, result: Value) -> Result<(), Self::Error>;
}

impl<S: ResultStore + ?Sized> ResultStore for Box<S> {
    type Error = S::Error;

    fn save_result(&mut self, result: Value) -> Result<(), Self::Error> {
        (**self).save_result(result)
    }
}

/// Discards every result.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStore;

impl ResultStore for NoopStore {
    type Error = Infallible;

    fn save_result(&mut self, _result: Value) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Keeps results in memory, in save order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    results: Vec<Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[Value] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Drain the saved results.
    pub fn take(&mut self) -> Vec<Value> {
        std::mem::take(&mut self.results)
    }
}

impl ResultStore for InMemoryStore {
    type Error = Infallible;

    fn save_result(&mut self, result: Value) -> Result<(), Self::Error> {
        self.results.push(result);
        Ok(())
    }
}
