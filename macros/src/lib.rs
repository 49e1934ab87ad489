//! Procedural macros for tola-dispatch handler sets
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[derive(Handler)]` | struct | Implement `Handler` over a label field |
//! | `handler_set!{}` | - | Build a closed handler set enum |
//!
//! ## Example
//!
//! ```ignore
//! #[derive(Handler)]
//! struct D1 {
//!     #[label]
//!     msg: Label,
//! }
//!
//! #[derive(Handler)]
//! struct D2(Label);
//!
//! handler_set! {
//!     pub enum AnyHandler { D1, D2 }
//! }
//!
//! let mut holder = Holder::<AnyHandler>::new();
//! holder.bind(D1 { msg: "D1::impl()".into() });
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations
// =============================================================================

mod common;
mod user;

/// Derive macro implementing `tola_dispatch::Handler`.
///
/// The label field is the one marked `#[label]`, else the field named
/// `label`, else the only field of a single-field struct.
///
/// # Example
/// ```ignore
/// #[derive(Handler)]
/// struct Provider {
///     #[label]
///     msg: Label,
///     calls: u32,
/// }
/// ```
#[proc_macro_derive(Handler, attributes(label))]
pub fn derive_handler(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);
    user::expand_derive_handler(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Build a closed handler set.
///
/// Generates an enum generic over `tola_dispatch::Ownership` (defaulting to
/// `Local`) with one alternative per handler type, plus `Clone`, `Debug`,
/// `HandlerSet` and one `Member` impl per handler type.
///
/// # Usage
/// ```ignore
/// handler_set! {
///     pub enum AnyHandler {
///         D1,
///         Remote(remote::D2),
///     }
/// }
/// ```
///
/// Duplicate alternative names or handler types are compile errors.
#[proc_macro]
pub fn handler_set(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as user::HandlerSetInput);
    user::expand_handler_set(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
