//! cqrs_bus: a synchronous, in-process CQRS dispatch bus.
//!
//! Requests are routed by type to exactly one handler. Queries return the
//! handler's value; commands persist it through a [`ResultStore`] and then
//! cascade any follow-up commands the handler enqueued, depth-first.
//!
//! ```ignore
//! use cqrs_bus::{Command, CommandBus, Dispatch, FnHandler, InMemoryStore, Query};
//! use serde_json::{json, Value};
//!
//! #[derive(Command)]
//! struct Deposit { account: String, amount: u64 }
//!
//! #[derive(Command)]
//! struct Notify { account: String }
//!
//! #[derive(Query)]
//! struct Balance { account: String }
//!
//! let mut bus = CommandBus::new(InMemoryStore::new())
//!     .handler_for::<Deposit, _>(FnHandler::new(|d: &Deposit, next| {
//!         next.push(Notify { account: d.account.clone() });
//!         Ok(json!({ "account": d.account, "amount": d.amount }))
//!     }))
//!     .handler_for::<Notify, _>(FnHandler::new(|_: &Notify, _| Ok(Value::Null)))
//!     .handler_for::<Balance, _>(FnHandler::new(|_: &Balance, _| Ok(json!(10))));
//!
//! assert_eq!(bus.dispatch(&Deposit { account: "a1".into(), amount: 10 })?, None);
//! assert_eq!(bus.store().len(), 2);
//! assert_eq!(bus.query(&Balance { account: "a1".into() })?, json!(10));
//! ```

// Lets the derive macros' `::cqrs_bus::` paths resolve inside this crate.
extern crate self as cqrs_bus;

pub mod bus;
pub mod handler;
mod registry;
pub mod request;

pub use bus::{
    BusConfig, BusError, CommandBus, Dispatch, FailureObserver, IgnoreFailures, InMemoryStore,
    LogFailures, NoopStore, ResultStore, DEFAULT_MAX_CASCADE_DEPTH,
};
pub use handler::{expect_request, FnHandler, Handler, HandlerError};
pub use registry::HandlerRegistry;
pub use request::{CommandList, Request, RequestKind, RequestType};

#[cfg(feature = "macros")]
pub use cqrs_bus_macros::{Command, Query};

/// Register handler modules with a bus using the handler file convention.
///
/// Each handler module must export:
/// - `REQUEST_TYPE: &str`: the request type identifier it handles
/// - `handler() -> impl Handler`: a fresh handler instance
///
/// # Example
/// ```ignore
/// let bus = cqrs_bus::register_handlers!(
///     CommandBus::new(InMemoryStore::new()),
///     handlers::deposit,
///     handlers::notify,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($bus:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $bus
        $(
            .handler(
                $($seg)::+::REQUEST_TYPE,
                $($seg)::+::handler(),
            )
        )+
    };
}
