//! Thread-safe variant holder.
//!
//! [`SyncHolder`] wraps a [`Holder`] in a mutex. Every operation, label access
//! included, runs inside one critical section, so a reader never sees a
//! selection that is halfway replaced.
//!
//! Calling back into the same holder from inside one of its critical sections
//! (`get_name` from a `with_name` callback, say) fails with [`Error::Busy`].
//! Other threads block until the lock is free.

use core::any::type_name;
use core::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};

use crate::error::{Error, Result};
use crate::holder::{Holder, State};
use crate::label::Label;
use crate::ownership::{Reentry, Shared};
use crate::set::{HandleOf, HandlerSet, Member};

/// A [`Holder`] shareable across threads.
///
/// Only sets using [`Shared`] ownership qualify; their handles are
/// `Arc<Mutex<_>>`.
pub struct SyncHolder<S: HandlerSet<Ownership = Shared>> {
    inner: Mutex<Holder<S>>,
}

impl<S: HandlerSet<Ownership = Shared>> SyncHolder<S> {
    pub const fn new() -> Self {
        SyncHolder { inner: Mutex::new(Holder::new()) }
    }

    fn lock(&self) -> Result<Locked<'_, S>> {
        let entry = Reentry::enter(&self.inner as *const Mutex<Holder<S>> as usize)
            .ok_or(Error::Busy { variant: type_name::<S>() })?;
        let holder = self.inner.lock().map_err(|_| Error::Poisoned { variant: type_name::<S>() })?;
        Ok(Locked { holder, _entry: entry })
    }

    /// See [`Holder::set_handler`].
    pub fn set_handler<T: Member<S>>(&self, handle: HandleOf<S, T>) -> Result<()> {
        self.lock()?.set_handler::<T>(handle);
        Ok(())
    }

    /// See [`Holder::bind`].
    pub fn bind<T: Member<S>>(&self, value: T) -> Result<HandleOf<S, T>> {
        Ok(self.lock()?.bind(value))
    }

    /// See [`Holder::set`].
    pub fn set(&self, next: S) -> Result<()> {
        self.lock()?.set(next);
        Ok(())
    }

    /// See [`Holder::get_name`].
    pub fn get_name(&self) -> Result<Label> {
        self.lock()?.get_name()
    }

    /// See [`Holder::with_name`].
    pub fn with_name<R>(&self, f: impl FnOnce(&mut Label) -> R) -> Result<R> {
        self.lock()?.with_name(f)
    }

    pub fn state(&self) -> Result<State> {
        Ok(self.lock()?.state())
    }

    pub fn variant(&self) -> Result<Option<&'static str>> {
        Ok(self.lock()?.variant())
    }

    /// See [`Holder::handler`].
    pub fn handler<T: Member<S>>(&self) -> Result<Option<HandleOf<S, T>>> {
        Ok(self.lock()?.handler::<T>())
    }

    /// Consume the wrapper and return the plain holder.
    pub fn into_inner(self) -> Result<Holder<S>> {
        self.inner
            .into_inner()
            .map_err(|_| Error::Poisoned { variant: type_name::<S>() })
    }
}

struct Locked<'a, S: HandlerSet> {
    holder: MutexGuard<'a, Holder<S>>,
    _entry: Reentry,
}

impl<S: HandlerSet> Deref for Locked<'_, S> {
    type Target = Holder<S>;

    fn deref(&self) -> &Holder<S> {
        &self.holder
    }
}

impl<S: HandlerSet> DerefMut for Locked<'_, S> {
    fn deref_mut(&mut self) -> &mut Holder<S> {
        &mut self.holder
    }
}

impl<S: HandlerSet<Ownership = Shared>> Default for SyncHolder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: HandlerSet<Ownership = Shared>> From<Holder<S>> for SyncHolder<S> {
    fn from(holder: Holder<S>) -> Self {
        SyncHolder { inner: Mutex::new(holder) }
    }
}
