use std::marker::PhantomData;

use serde_json::Value;

use super::{expect_request, Handler, HandlerError};
use crate::request::{CommandList, Request, RequestType};

/// Adapts a closure into a [`Handler`] bound to one request type.
///
/// The closure receives the downcast request and the handler's follow-up
/// list. A request of any other type fails with
/// `HandlerError::UnexpectedRequest`.
///
/// ```ignore
/// let handler = FnHandler::new(|deposit: &Deposit, next| {
///     next.push(Notify { account: deposit.account.clone() });
///     Ok(json!({ "deposited": deposit.amount }))
/// });
/// ```
pub struct FnHandler<T, F> {
    handle: F,
    next: CommandList,
    name: String,
    _request: PhantomData<fn(&T)>,
}

impl<T, F> FnHandler<T, F>
where
    T: RequestType,
    F: FnMut(&T, &mut CommandList) -> Result<Value, HandlerError>,
{
    pub fn new(handle: F) -> Self {
        Self {
            handle,
            next: CommandList::new(),
            name: format!("fn({})", T::TYPE_NAME),
            _request: PhantomData,
        }
    }

    /// Override the name reported in logs and failure hooks.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl<T, F> Handler for FnHandler<T, F>
where
    T: RequestType,
    F: FnMut(&T, &mut CommandList) -> Result<Value, HandlerError>,
{
    fn handle(&mut self, request: &dyn Request) -> Result<Value, HandlerError> {
        let request = expect_request::<T>(request)?;
        (self.handle)(request, &mut self.next)
    }

    fn next_commands(&mut self) -> &mut CommandList {
        &mut self.next
    }

    fn name(&self) -> &str {
        &self.name
    }
}
