//! Shared-ownership strategies for handler handles.
//!
//! A handler set stores its variants behind an [`Ownership`] strategy, chosen
//! once as a type parameter of the set:
//!
//! | Strategy | Handle | Weak | Guard | Threading |
//! |----------|--------|------|-------|-----------|
//! | [`Local`] | `Rc<RefCell<T>>` | `rc::Weak<RefCell<T>>` | `RefMut<T>` | single thread |
//! | [`Shared`] | `Arc<Mutex<T>>` | `sync::Weak<Mutex<T>>` | `SharedGuard<T>` | `std` only |
//!
//! The last strong handle to go away destroys the variant. Back references
//! from a variant to whatever holds it should use [`Ownership::Weak`].

use alloc::rc::{self, Rc};
use core::any::type_name;
use core::cell::{RefCell, RefMut};
use core::ops::DerefMut;

use crate::capability::Handler;
use crate::error::{Error, Result};
use crate::label::Label;

/// Ownership strategy for handler handles.
pub trait Ownership: 'static {
    /// Strong, reference-counted handle.
    type Handle<T: 'static>: Clone;

    /// Non-owning counterpart of [`Ownership::Handle`].
    type Weak<T: 'static>: Clone;

    /// Exclusive access guard produced by [`Ownership::access`].
    type Guard<'a, T: 'static>: DerefMut<Target = T>;

    const NAME: &'static str;

    fn wrap<T: 'static>(value: T) -> Self::Handle<T>;

    /// Exclusive access to the value behind `handle`.
    fn access<T: 'static>(handle: &Self::Handle<T>) -> Result<Self::Guard<'_, T>>;

    fn downgrade<T: 'static>(handle: &Self::Handle<T>) -> Self::Weak<T>;

    fn upgrade<T: 'static>(weak: &Self::Weak<T>) -> Option<Self::Handle<T>>;

    /// Whether both handles point at the same allocation.
    fn same<T: 'static>(a: &Self::Handle<T>, b: &Self::Handle<T>) -> bool;

    /// Number of strong handles currently alive.
    fn owners<T: 'static>(handle: &Self::Handle<T>) -> usize;

    /// Run `f` with mutable access to the label of the handler behind `handle`.
    fn with_name<T: Handler, R>(
        handle: &Self::Handle<T>,
        f: impl FnOnce(&mut Label) -> R,
    ) -> Result<R> {
        let mut guard = Self::access(handle)?;
        Ok(f(guard.impl_name()))
    }

    /// Owned copy of the label of the handler behind `handle`.
    fn read_name<T: Handler>(handle: &Self::Handle<T>) -> Result<Label> {
        Self::with_name(handle, |label| label.clone())
    }
}

// =============================================================================
// Local
// =============================================================================

/// Single-threaded ownership: `Rc<RefCell<T>>`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Local;

impl Ownership for Local {
    type Handle<T: 'static> = Rc<RefCell<T>>;
    type Weak<T: 'static> = rc::Weak<RefCell<T>>;
    type Guard<'a, T: 'static> = RefMut<'a, T>;

    const NAME: &'static str = "local";

    #[inline]
    fn wrap<T: 'static>(value: T) -> Rc<RefCell<T>> {
        Rc::new(RefCell::new(value))
    }

    fn access<T: 'static>(handle: &Rc<RefCell<T>>) -> Result<RefMut<'_, T>> {
        handle.try_borrow_mut().map_err(|_| Error::Busy { variant: type_name::<T>() })
    }

    #[inline]
    fn downgrade<T: 'static>(handle: &Rc<RefCell<T>>) -> rc::Weak<RefCell<T>> {
        Rc::downgrade(handle)
    }

    #[inline]
    fn upgrade<T: 'static>(weak: &rc::Weak<RefCell<T>>) -> Option<Rc<RefCell<T>>> {
        weak.upgrade()
    }

    #[inline]
    fn same<T: 'static>(a: &Rc<RefCell<T>>, b: &Rc<RefCell<T>>) -> bool {
        Rc::ptr_eq(a, b)
    }

    #[inline]
    fn owners<T: 'static>(handle: &Rc<RefCell<T>>) -> usize {
        Rc::strong_count(handle)
    }
}

// =============================================================================
// Shared
// =============================================================================

#[cfg(feature = "std")]
pub use self::shared::{Shared, SharedGuard};

#[cfg(feature = "std")]
pub(crate) use self::shared::Reentry;

#[cfg(feature = "std")]
mod shared {
    use super::*;
    use alloc::vec::Vec;
    use core::ops::Deref;
    use std::sync::{self, Arc, Mutex, MutexGuard};

    std::thread_local! {
        /// Addresses of the locks held by the current thread.
        static HELD: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
    }

    /// Marks the lock at `addr` as held by the current thread until dropped.
    ///
    /// `std::sync::Mutex` deadlocks when the owning thread locks it again, so
    /// every lock is entered through this first.
    pub(crate) struct Reentry(usize);

    impl Reentry {
        /// `None` if the current thread already holds the lock at `addr`.
        pub(crate) fn enter(addr: usize) -> Option<Reentry> {
            HELD.with_borrow_mut(|held| {
                if held.contains(&addr) {
                    None
                } else {
                    held.push(addr);
                    Some(Reentry(addr))
                }
            })
        }
    }

    impl Drop for Reentry {
        fn drop(&mut self) {
            let addr = self.0;
            let _ = HELD.try_with(|held| {
                let mut held = held.borrow_mut();
                if let Some(i) = held.iter().rposition(|&a| a == addr) {
                    held.swap_remove(i);
                }
            });
        }
    }

    /// Thread-safe ownership: `Arc<Mutex<T>>`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct Shared;

    /// Lock guard for a [`Shared`] handle.
    pub struct SharedGuard<'a, T> {
        guard: MutexGuard<'a, T>,
        _entry: Reentry,
    }

    impl<T> Deref for SharedGuard<'_, T> {
        type Target = T;

        #[inline]
        fn deref(&self) -> &T {
            &self.guard
        }
    }

    impl<T> DerefMut for SharedGuard<'_, T> {
        #[inline]
        fn deref_mut(&mut self) -> &mut T {
            &mut self.guard
        }
    }

    impl Ownership for Shared {
        type Handle<T: 'static> = Arc<Mutex<T>>;
        type Weak<T: 'static> = sync::Weak<Mutex<T>>;
        type Guard<'a, T: 'static> = SharedGuard<'a, T>;

        const NAME: &'static str = "shared";

        #[inline]
        fn wrap<T: 'static>(value: T) -> Arc<Mutex<T>> {
            Arc::new(Mutex::new(value))
        }

        /// Blocks while another thread holds the lock. Fails with
        /// [`Error::Busy`] if the current thread already holds it.
        fn access<T: 'static>(handle: &Arc<Mutex<T>>) -> Result<SharedGuard<'_, T>> {
            let entry = Reentry::enter(Arc::as_ptr(handle) as usize)
                .ok_or(Error::Busy { variant: type_name::<T>() })?;
            let guard = handle.lock().map_err(|_| Error::Poisoned { variant: type_name::<T>() })?;
            Ok(SharedGuard { guard, _entry: entry })
        }

        #[inline]
        fn downgrade<T: 'static>(handle: &Arc<Mutex<T>>) -> sync::Weak<Mutex<T>> {
            Arc::downgrade(handle)
        }

        #[inline]
        fn upgrade<T: 'static>(weak: &sync::Weak<Mutex<T>>) -> Option<Arc<Mutex<T>>> {
            weak.upgrade()
        }

        #[inline]
        fn same<T: 'static>(a: &Arc<Mutex<T>>, b: &Arc<Mutex<T>>) -> bool {
            Arc::ptr_eq(a, b)
        }

        #[inline]
        fn owners<T: 'static>(handle: &Arc<Mutex<T>>) -> usize {
            Arc::strong_count(handle)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe(Label);

    impl Handler for Probe {
        fn impl_name(&mut self) -> &mut Label {
            &mut self.0
        }

        fn impl_label(&self) -> &Label {
            &self.0
        }
    }

    #[test]
    fn test_local_read_and_write_name() {
        let handle = Local::wrap(Probe(Label::from("probe")));
        assert_eq!(Local::read_name(&handle).unwrap(), "probe");

        Local::with_name(&handle, |label| label.push_str("-2")).unwrap();
        assert_eq!(handle.borrow().0, "probe-2");
    }

    #[test]
    fn test_local_reentrant_access_is_busy() {
        let handle = Local::wrap(Probe(Label::from("probe")));
        let _guard = Local::access(&handle).unwrap();
        let err = Local::read_name(&handle).unwrap_err();
        assert!(matches!(err, Error::Busy { .. }));
    }

    #[test]
    fn test_local_weak_does_not_own() {
        let handle = Local::wrap(Probe(Label::from("probe")));
        let weak = Local::downgrade(&handle);
        assert_eq!(Local::owners(&handle), 1);
        assert!(Local::upgrade(&weak).is_some());

        drop(handle);
        assert!(Local::upgrade(&weak).is_none());
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_shared_poisoned_lock() {
        let handle = Shared::wrap(Probe(Label::from("probe")));
        let clone = handle.clone();
        let _ = std::thread::spawn(move || {
            let _guard = clone.lock().unwrap();
            panic!("poison");
        })
        .join();

        let err = Shared::read_name(&handle).unwrap_err();
        assert!(matches!(err, Error::Poisoned { .. }));
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_shared_reentrant_access_is_busy() {
        let handle = Shared::wrap(Probe(Label::from("probe")));
        let guard = Shared::access(&handle).unwrap();
        let err = Shared::read_name(&handle).unwrap_err();
        assert!(matches!(err, Error::Busy { .. }));

        drop(guard);
        assert_eq!(Shared::read_name(&handle).unwrap(), "probe");
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_shared_other_thread_waits_instead_of_busy() {
        let handle = Shared::wrap(Probe(Label::from("probe")));
        let guard = Shared::access(&handle).unwrap();

        let clone = handle.clone();
        let reader = std::thread::spawn(move || Shared::read_name(&clone));
        std::thread::sleep(std::time::Duration::from_millis(20));
        drop(guard);

        assert_eq!(reader.join().unwrap().unwrap(), "probe");
    }
}
