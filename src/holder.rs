//! # Variant Holder
//!
//! Runtime container bound to one variant of a closed [`HandlerSet`].
//!
//! ```text
//!              set_handler / bind / set
//!   +-------+ -----------------------> +-------+
//!   | Empty |                          | Bound | --+
//!   +-------+                          +-------+   | set_handler (rebind)
//!                                          ^-------+
//! ```
//!
//! There is no transition back to `Empty`. Capability access on an empty
//! holder fails with [`Error::Unbound`].

use core::fmt;

use crate::error::{Error, Result};
use crate::label::Label;
use crate::ownership::Ownership;
use crate::set::{HandleOf, HandlerSet, Member};

/// Binding state of a [`Holder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Empty,
    Bound,
}

/// Holds at most one variant of the closed set `S`.
pub struct Holder<S: HandlerSet> {
    active: Option<S>,
}

impl<S: HandlerSet> Holder<S> {
    pub const fn new() -> Self {
        Holder { active: None }
    }

    /// Bind `handle` as the active variant.
    ///
    /// The alternative is chosen by the static type `T`. Whatever was bound
    /// before is released; it is only destroyed if nobody else owns it.
    pub fn set_handler<T: Member<S>>(&mut self, handle: HandleOf<S, T>) {
        self.set(T::into_set(handle));
    }

    /// Wrap `value` with the set's ownership strategy and bind it.
    ///
    /// Returns a strong handle to the freshly bound variant.
    pub fn bind<T: Member<S>>(&mut self, value: T) -> HandleOf<S, T> {
        let handle = <S::Ownership as Ownership>::wrap(value);
        self.set_handler::<T>(handle.clone());
        handle
    }

    /// Bind an already-built set value.
    pub fn set(&mut self, next: S) {
        let variant = next.variant();
        match self.active.replace(next) {
            Some(prev) => log::debug!("rebind holder: {} -> {variant}", prev.variant()),
            None => log::debug!("bind holder: {variant}"),
        }
    }

    /// Owned copy of the active variant's label.
    pub fn get_name(&self) -> Result<Label> {
        self.with_name(|label| label.clone())
    }

    /// Run `f` with mutable access to the active variant's label.
    ///
    /// Writes are visible to every other owner of the variant. Reaching the
    /// same variant again from inside `f` fails with [`Error::Busy`].
    pub fn with_name<R>(&self, f: impl FnOnce(&mut Label) -> R) -> Result<R> {
        let active = self.active.as_ref().ok_or(Error::Unbound)?;
        log::trace!("get_name via {}", active.variant());
        active.with_label(f)
    }

    #[inline]
    pub fn state(&self) -> State {
        if self.active.is_some() { State::Bound } else { State::Empty }
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.active.is_some()
    }

    #[inline]
    pub fn active(&self) -> Option<&S> {
        self.active.as_ref()
    }

    /// Name of the active alternative.
    pub fn variant(&self) -> Option<&'static str> {
        self.active.as_ref().map(HandlerSet::variant)
    }

    /// A strong handle to the active variant, if it is a `T`.
    pub fn handler<T: Member<S>>(&self) -> Option<HandleOf<S, T>> {
        self.active.as_ref().and_then(T::from_set).cloned()
    }

    /// Whether the active variant is the very instance behind `handle`.
    pub fn holds<T: Member<S>>(&self, handle: &HandleOf<S, T>) -> bool {
        self.active
            .as_ref()
            .and_then(T::from_set)
            .is_some_and(|held| <S::Ownership as Ownership>::same::<T>(held, handle))
    }
}

impl<S: HandlerSet> Default for Holder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: HandlerSet + Clone> Clone for Holder<S> {
    fn clone(&self) -> Self {
        Holder { active: self.active.clone() }
    }
}

impl<S: HandlerSet> fmt::Debug for Holder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Holder")
            .field("state", &self.state())
            .field("variant", &self.variant())
            .finish()
    }
}

impl<S: HandlerSet> From<S> for Holder<S> {
    fn from(active: S) -> Self {
        Holder { active: Some(active) }
    }
}
