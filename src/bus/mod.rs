//! Command bus: routes requests to handlers and cascades follow-ups.
//!
//! ## Flow
//!
//! ```text
//! dispatch(request)
//!   ├─ depth check ──────────────▶ CascadeLimitExceeded
//!   ├─ guard (optional) ─────────▶ Rejected
//!   ├─ registry lookup ──────────▶ HandlerNotFound
//!   ├─ handler.handle()
//!   │     └─ Err ─▶ observer ────▶ Dispatch { source }
//!   ├─ Query:   return Some(value)
//!   └─ Command: store.save_result(value) ─▶ Store
//!               then dispatch each follow-up, depth-first, in order
//!               return None
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use cqrs_bus::{CommandBus, Dispatch, FnHandler, InMemoryStore};
//!
//! let mut bus = CommandBus::new(InMemoryStore::new())
//!     .handler_for::<Deposit, _>(FnHandler::new(|deposit: &Deposit, next| {
//!         next.push(Notify { account: deposit.account.clone() });
//!         Ok(json!({ "deposited": deposit.amount }))
//!     }))
//!     .handler_for::<Notify, _>(FnHandler::new(|_: &Notify, _| Ok(Value::Null)));
//!
//! bus.dispatch(&Deposit { account: "a1".into(), amount: 10 })?;
//! assert_eq!(bus.store().len(), 2);
//! ```

mod command_bus;
mod config;
mod error;
mod observer;
mod store;

use serde_json::Value;

use crate::request::Request;

pub use command_bus::CommandBus;
pub use config::{BusConfig, DEFAULT_MAX_CASCADE_DEPTH};
pub use error::BusError;
pub use observer::{FailureObserver, IgnoreFailures, LogFailures};
pub use store::{InMemoryStore, NoopStore, ResultStore};

/// The dispatch entry point. Implemented by [`CommandBus`]; depend on this
/// trait where a test double should stand in for the bus.
pub trait Dispatch {
    /// Route `request` to its handler.
    ///
    /// Queries yield `Some(value)`. Commands yield `None` once the command
    /// and its whole cascade have succeeded.
    fn dispatch(&mut self, request: &dyn Request) -> Result<Option<Value>, BusError>;

    /// Dispatch and return the value, `Value::Null` for commands.
    fn query(&mut self, request: &dyn Request) -> Result<Value, BusError> {
        Ok(self.dispatch(request)?.unwrap_or(Value::Null))
    }

    /// Dispatch and discard any value.
    fn execute(&mut self, request: &dyn Request) -> Result<(), BusError> {
        self.dispatch(request).map(|_| ())
    }
}
