//! Handlers: the logic behind one request type.
//!
//! A handler returns a JSON value and may enqueue follow-up commands into
//! the list it owns. After every invocation the bus drains that list, so a
//! handler registered once and reused across dispatches never replays
//! follow-ups from an earlier call.
//!
//! ## Implementing `Handler` directly
//!
//! ```ignore
//! struct DepositHandler {
//!     next: CommandList,
//! }
//!
//! impl Handler for DepositHandler {
//!     fn handle(&mut self, request: &dyn Request) -> Result<Value, HandlerError> {
//!         let deposit = expect_request::<Deposit>(request)?;
//!         self.add_next_command(Box::new(Notify { account: deposit.account.clone() }));
//!         Ok(json!({ "account": deposit.account, "amount": deposit.amount }))
//!     }
//!
//!     fn next_commands(&mut self) -> &mut CommandList {
//!         &mut self.next
//!     }
//! }
//! ```
//!
//! ## Closures
//!
//! See [`FnHandler`].

mod error;
mod fn_handler;

use serde_json::Value;

use crate::request::{CommandList, Request, RequestType};

pub use error::HandlerError;
pub use fn_handler::FnHandler;

/// Logic for one request type.
pub trait Handler {
    /// Process `request`, returning its result.
    ///
    /// Follow-ups go through [`Handler::add_next_command`].
    fn handle(&mut self, request: &dyn Request) -> Result<Value, HandlerError>;

    /// The follow-ups accumulated by the current invocation, in insertion
    /// order. The bus clears the list before `handle` and takes it right
    /// after `handle` returns.
    fn next_commands(&mut self) -> &mut CommandList;

    /// Append a follow-up to the end of the list. Intended for the handler's
    /// own logic inside `handle`: the bus empties the list right before each
    /// `handle` call, so entries added from outside are dropped, not
    /// cascaded.
    fn add_next_command(&mut self, command: Box<dyn Request>) {
        self.next_commands().push_boxed(command);
    }

    /// Name used in logs and failure reports.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn handle(&mut self, request: &dyn Request) -> Result<Value, HandlerError> {
        (**self).handle(request)
    }

    fn next_commands(&mut self) -> &mut CommandList {
        (**self).next_commands()
    }

    fn add_next_command(&mut self, command: Box<dyn Request>) {
        (**self).add_next_command(command)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Downcast `request` to `T`, or fail with `UnexpectedRequest`.
pub fn expect_request<T: RequestType>(request: &dyn Request) -> Result<&T, HandlerError> {
    request
        .downcast_ref::<T>()
        .ok_or(HandlerError::UnexpectedRequest {
            expected: T::TYPE_NAME,
            actual: request.request_type(),
        })
}
