//! # Capability Interface
//!
//! The interface is split in two traits, the same way a CRTP base and its
//! derived class split the work:
//!
//! ```text
//! Named::name(&mut self)          (interface, blanket impl)
//!        |
//!        |  monomorphised, inlined
//!        v
//! Handler::impl_name(&mut self)   (concrete variant)
//! ```
//!
//! `Named` is implemented for every `H: Handler` and for nothing else, so a
//! call to `name()` always lands in the concrete implementation. There is no
//! base implementation to fall back to and no vtable on the path.
//!
//! Calling the interface on a type that does not implement the concrete side
//! is rejected at compile time:
//!
//! ```compile_fail
//! use tola_dispatch::Named;
//!
//! struct NotAHandler;
//!
//! let mut value = NotAHandler;
//! value.name();
//! ```
//!
//! Generic code gets no fallback either. A type parameter has to carry the
//! bound that provides the concrete side:
//!
//! ```compile_fail
//! use tola_dispatch::{Label, Named};
//!
//! fn label_of<T>(value: &mut T) -> &mut Label {
//!     value.name()
//! }
//! ```
//!
//! ```
//! use tola_dispatch::{Handler, Label, Named};
//!
//! fn label_of<T: Handler>(value: &mut T) -> &mut Label {
//!     value.name()
//! }
//! ```

use crate::label::Label;

/// Concrete side of the capability.
///
/// Implement this (directly or with `#[derive(Handler)]`) for every variant.
/// Callers should go through [`Named`] instead of calling these methods.
pub trait Handler: 'static {
    /// Mutable access to the variant's own label.
    fn impl_name(&mut self) -> &mut Label;

    /// Shared access to the variant's own label.
    fn impl_label(&self) -> &Label;
}

/// Interface side of the capability.
pub trait Named {
    fn name(&mut self) -> &mut Label;

    fn label(&self) -> &Label;
}

impl<H: Handler> Named for H {
    #[inline(always)]
    fn name(&mut self) -> &mut Label {
        self.impl_name()
    }

    #[inline(always)]
    fn label(&self) -> &Label {
        self.impl_label()
    }
}

/// Resolve the capability of any variant passed by reference.
///
/// The variant type is a generic parameter, so each call site is compiled
/// against exactly one implementation.
#[inline]
pub fn name_of<N: Named + ?Sized>(handler: &mut N) -> &mut Label {
    log::trace!("name_of::<{}>", core::any::type_name::<N>());
    handler.name()
}
