//! Requests: the objects callers hand to the bus.
//!
//! Every request is either a command (may mutate state, returns nothing to
//! the caller, may cascade follow-ups) or a query (read-only, returns a
//! value). The bus routes on the stable identifier each request type
//! declares for itself via [`Request::request_type`].
//!
//! Most types get both traits from the derive macros:
//!
//! ```ignore
//! use cqrs_bus::{Command, Query};
//!
//! #[derive(Command)]
//! pub struct Deposit { pub account: String, pub amount: u64 }
//!
//! #[derive(Query)]
//! #[request(name = "account.balance")]
//! pub struct Balance { pub account: String }
//! ```

mod command_list;

use std::any::Any;
use std::fmt;

pub use command_list::CommandList;

/// Whether a request mutates state or only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Command,
    Query,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Command => "command",
            RequestKind::Query => "query",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request the bus can route.
///
/// `request_type` must be the same for every value of a given Rust type and
/// unique across the types registered on one bus.
pub trait Request: Any {
    /// Stable routing identifier.
    fn request_type(&self) -> &'static str;

    fn kind(&self) -> RequestKind;

    /// Upcast used by handlers to recover the concrete request.
    fn as_any(&self) -> &dyn Any;
}

impl<'a> dyn Request + 'a {
    pub fn is_query(&self) -> bool {
        self.kind() == RequestKind::Query
    }

    pub fn is_command(&self) -> bool {
        self.kind() == RequestKind::Command
    }

    /// Downcast to the concrete request type, if it matches.
    pub fn downcast_ref<T: Request>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl<'a> fmt::Debug for dyn Request + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("type", &self.request_type())
            .field("kind", &self.kind())
            .finish()
    }
}

/// Static counterpart of [`Request`], for registering by type rather than
/// by identifier string.
pub trait RequestType: Request {
    const TYPE_NAME: &'static str;
    const KIND: RequestKind;
}
