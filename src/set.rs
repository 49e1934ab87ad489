//! Closed handler sets.
//!
//! A handler set is a sum type with exactly one alternative per variant type,
//! each alternative carrying a strong handle to that variant:
//!
//! ```ignore
//! handler_set! {
//!     pub enum AnyHandler { D1, D2 }
//! }
//!
//! // expands to (roughly)
//! pub enum AnyHandler<O: Ownership = Local> {
//!     D1(O::Handle<D1>),
//!     D2(O::Handle<D2>),
//! }
//! impl<O: Ownership> HandlerSet for AnyHandler<O> { ... }
//! impl<O: Ownership> Member<AnyHandler<O>> for D1 { ... }
//! impl<O: Ownership> Member<AnyHandler<O>> for D2 { ... }
//! ```
//!
//! Being an enum, a set value can only ever hold one variant; the "at most one
//! populated" rule needs no runtime check.

use crate::capability::Handler;
use crate::error::Result;
use crate::label::Label;
use crate::ownership::Ownership;

/// Shorthand for the handle type a set `S` uses for variant `T`.
pub type HandleOf<S, T> = <<S as HandlerSet>::Ownership as Ownership>::Handle<T>;

/// Shorthand for the weak handle type a set `S` uses for variant `T`.
pub type WeakOf<S, T> = <<S as HandlerSet>::Ownership as Ownership>::Weak<T>;

/// A closed set of handler variants, one of which is held at a time.
///
/// Implemented by `handler_set!`.
pub trait HandlerSet: Sized + 'static {
    type Ownership: Ownership;

    /// Alternative names, in declaration order.
    const VARIANTS: &'static [&'static str];

    /// Name of the alternative currently held.
    fn variant(&self) -> &'static str;

    /// Run `f` with mutable access to the held variant's label.
    fn with_label<R>(&self, f: impl FnOnce(&mut Label) -> R) -> Result<R>;

    /// Whether `self` and `other` hold the very same variant instance.
    fn same_handler(&self, other: &Self) -> bool;

    /// Build the alternative matching the static type of `handle`.
    #[inline]
    fn from_handle<T: Member<Self>>(handle: HandleOf<Self, T>) -> Self {
        T::into_set(handle)
    }
}

/// Membership of a variant type in the closed set `S`.
///
/// This is what lets a holder pick the storage slot from the static type of
/// the handle it is given.
pub trait Member<S: HandlerSet>: Handler + Sized {
    /// Wrap a handle into the matching alternative of `S`.
    fn into_set(handle: HandleOf<S, Self>) -> S;

    /// The handle held by `set`, if `set` holds this variant type.
    fn from_set(set: &S) -> Option<&HandleOf<S, Self>>;
}
