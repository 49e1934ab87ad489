#![cfg_attr(not(feature = "std"), no_std)]

// Feature flags handled:
// - std: default, enables `Shared` ownership and `SyncHolder`
// Without `std` the crate runs on core + alloc.

//! # tola-dispatch
//!
//! Static-dispatch handler interfaces with a runtime-selected variant holder.
//!
//! ## Architecture
//!
//! A *capability* is split between an interface trait and the concrete
//! implementation it resolves to at compile time (the CRTP shape, without
//! the base class):
//!
//! ```text
//! Named::name()  --(blanket impl, inlined)-->  Handler::impl_name()
//! Traced::debug::<Provider>()  -->  TraceImpl::impl_debug::<Provider>()
//! ```
//!
//! A closed set of handler types is turned into an enum by `handler_set!`.
//! A [`Holder`] stores one alternative of that enum behind shared ownership
//! and dispatches to whichever variant is bound.
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Values                                                  |
//! |  - Label, Error                                                   |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Capability Interface                                    |
//! |  - Handler / Named, Source tags, TraceImpl / Traced               |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: Ownership                                               |
//! |  - Local (Rc<RefCell>), Shared (Arc<Mutex>), weak handles         |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 3: Variant Holder                                          |
//! |  - HandlerSet / Member, Holder, SyncHolder                        |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 4: User API                                                |
//! |  - handler!, #[derive(Handler)], handler_set!                     |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use std::rc::Rc;
//! use tola_dispatch::prelude::*;
//!
//! handler! {
//!     pub struct A = "A-impl";
//!     pub struct B = "B-impl";
//! }
//!
//! handler_set! {
//!     pub enum AnyHandler { A, B }
//! }
//!
//! let mut holder = Holder::<AnyHandler>::new();
//! assert_eq!(holder.get_name(), Err(Error::Unbound));
//!
//! let a = Local::wrap(A::default());
//! holder.set_handler::<A>(Rc::clone(&a));
//! assert_eq!(holder.get_name().unwrap(), "A-impl");
//!
//! holder.bind(B::default());
//! assert_eq!(holder.get_name().unwrap(), "B-impl");
//! ```
//!
//! Only members of the set can be bound:
//!
//! ```compile_fail
//! use tola_dispatch::prelude::*;
//!
//! handler! {
//!     pub struct A = "A-impl";
//!     pub struct Outsider = "nope";
//! }
//!
//! handler_set! {
//!     pub enum AnyHandler { A }
//! }
//!
//! let mut holder = Holder::<AnyHandler>::new();
//! holder.bind(Outsider::default());
//! ```

// Allow `::tola_dispatch` to work inside the crate itself
extern crate self as tola_dispatch;

extern crate alloc;

// Re-export paste for define_sources!
pub use paste;

// =============================================================================
// Layer 0: Values
// =============================================================================
pub mod error;
pub mod label;

// =============================================================================
// Layer 1: Capability Interface
// =============================================================================
pub mod capability;
pub mod source;

// =============================================================================
// Layer 2: Ownership
// =============================================================================
pub mod ownership;

// =============================================================================
// Layer 3: Variant Holder
// =============================================================================
pub mod holder;
pub mod set;
#[cfg(feature = "std")]
pub mod sync;

// Syntax macros (handler!)
pub mod syntax_macros;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use capability::{Handler, Named, name_of};
pub use error::{Error, Result};
pub use holder::{Holder, State};
pub use label::Label;
pub use ownership::{Local, Ownership};
#[cfg(feature = "std")]
pub use ownership::Shared;
pub use set::{HandleOf, HandlerSet, Member, WeakOf};
pub use source::{Calculator, Provider, Source, SourceType, SourceVisitor, Trace, TraceImpl, Traced};
#[cfg(feature = "std")]
pub use sync::SyncHolder;

// Re-export proc-macros
pub use macros::{Handler, handler_set};

/// Common items for defining and holding handlers.
pub mod prelude {
    pub use crate::capability::{Handler, Named};
    pub use crate::error::Error;
    pub use crate::holder::{Holder, State};
    pub use crate::label::Label;
    pub use crate::ownership::{Local, Ownership};
    #[cfg(feature = "std")]
    pub use crate::ownership::Shared;
    pub use crate::set::{HandlerSet, Member};
    pub use crate::source::{Calculator, Provider, Source, SourceType, TraceImpl, Traced};
    #[cfg(feature = "std")]
    pub use crate::sync::SyncHolder;
    pub use macros::{Handler, handler_set};
    pub use crate::handler;
}
