mod request;

use proc_macro::TokenStream;

use request::Kind;

/// Derive macro that marks a type as a command routed by `cqrs_bus`.
///
/// # Usage
///
/// ```ignore
/// use cqrs_bus::Command;
///
/// #[derive(Command)]
/// pub struct Deposit {
///     pub account: String,
///     pub amount: u64,
/// }
///
/// #[derive(Command)]
/// #[request(name = "account.close")]
/// pub struct CloseAccount {
///     pub account: String,
/// }
/// ```
///
/// - The routing identifier defaults to the type's name (`"Deposit"`).
/// - `#[request(name = "...")]` overrides it.
///
/// The type must be `'static`, since requests are downcast through `Any`.
#[proc_macro_derive(Command, attributes(request))]
pub fn derive_command(input: TokenStream) -> TokenStream {
    request::derive_request(input, Kind::Command)
}

/// Derive macro that marks a type as a query routed by `cqrs_bus`.
///
/// Accepts the same `#[request(name = "...")]` attribute as `Command`.
/// Queries return their handler's value to the caller and never cascade.
#[proc_macro_derive(Query, attributes(request))]
pub fn derive_query(input: TokenStream) -> TokenStream {
    request::derive_request(input, Kind::Query)
}
