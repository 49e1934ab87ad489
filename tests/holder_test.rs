//! Tests for `handler_set!` and `Holder`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tola_dispatch::prelude::*;
use tola_dispatch::{handler, HandleOf};

handler! {
    pub struct A = "A-impl";
    pub struct B = "B-impl";
}

handler_set! {
    /// Handlers used across these tests.
    pub enum AnyHandler { A, B }
}

// =============================================================================
// Binding
// =============================================================================

#[test]
fn test_bind_then_rebind() {
    let mut holder = Holder::<AnyHandler>::new();

    holder.set_handler::<A>(Local::wrap(A::default()));
    assert_eq!(holder.get_name().unwrap(), "A-impl");

    holder.set_handler::<B>(Local::wrap(B::default()));
    assert_eq!(holder.get_name().unwrap(), "B-impl");
}

#[test]
fn test_replacement_is_total() {
    let a = Local::wrap(A::default());
    let b = Local::wrap(B::default());

    let mut holder = Holder::<AnyHandler>::new();
    holder.set_handler::<A>(Rc::clone(&a));
    holder.set_handler::<B>(Rc::clone(&b));

    assert_eq!(holder.variant(), Some("B"));
    assert!(holder.handler::<A>().is_none());
    assert!(holder.handler::<B>().is_some());
    // The holder no longer owns `a`.
    assert_eq!(Rc::strong_count(&a), 1);
    assert_ne!(holder.get_name().unwrap(), "A-impl");
}

#[test]
fn test_unbound_holder_fails() {
    let holder = Holder::<AnyHandler>::new();
    assert_eq!(holder.state(), State::Empty);
    assert!(!holder.is_bound());
    assert_eq!(holder.get_name(), Err(Error::Unbound));
    assert_eq!(holder.with_name(|l| l.len()), Err(Error::Unbound));
    assert_eq!(holder.variant(), None);
}

#[test]
fn test_state_after_binding() {
    let mut holder = Holder::<AnyHandler>::default();
    holder.bind(A::default());
    assert_eq!(holder.state(), State::Bound);
    holder.bind(B::default());
    assert_eq!(holder.state(), State::Bound);
}

#[test]
fn test_rebinding_same_handle_is_idempotent() {
    let a = Local::wrap(A::default());

    let mut once = Holder::<AnyHandler>::new();
    once.set_handler::<A>(Rc::clone(&a));

    let mut twice = Holder::<AnyHandler>::new();
    twice.set_handler::<A>(Rc::clone(&a));
    twice.set_handler::<A>(Rc::clone(&a));

    assert_eq!(once.get_name(), twice.get_name());
    assert!(twice.holds::<A>(&a));
    assert_eq!(Rc::strong_count(&a), 3);
}

// =============================================================================
// Shared Ownership
// =============================================================================

#[test]
fn test_holder_keeps_variant_alive() {
    let mut holder = Holder::<AnyHandler>::new();
    let weak = {
        let a = Local::wrap(A::new("original"));
        holder.set_handler::<A>(Rc::clone(&a));
        Rc::downgrade(&a)
        // `a` dropped here
    };

    assert!(weak.upgrade().is_some());
    assert_eq!(holder.get_name().unwrap(), "original");
}

#[test]
fn test_rebind_releases_but_does_not_destroy_shared_variant() {
    let a = Local::wrap(A::default());
    let mut holder = Holder::<AnyHandler>::new();
    holder.set_handler::<A>(Rc::clone(&a));
    holder.bind(B::default());

    // Still alive through the external owner.
    assert_eq!(a.borrow().label(), "A-impl");
}

#[test]
fn test_rebind_destroys_unshared_variant() {
    let mut holder = Holder::<AnyHandler>::new();
    let a = holder.bind(A::default());
    let weak = Rc::downgrade(&a);
    drop(a);

    holder.bind(B::default());
    assert!(weak.upgrade().is_none());
}

#[test]
fn test_mutation_visible_to_co_owners() {
    let a = Local::wrap(A::default());
    let mut holder = Holder::<AnyHandler>::new();
    holder.set_handler::<A>(Rc::clone(&a));

    holder.with_name(|label| label.push_str("+edit")).unwrap();
    assert_eq!(a.borrow().label, "A-impl+edit");

    a.borrow_mut().label.replace("external");
    assert_eq!(holder.get_name().unwrap(), "external");
}

#[test]
fn test_reentrant_access_is_busy() {
    let mut holder = Holder::<AnyHandler>::new();
    let a = holder.bind(A::default());

    let _guard = a.borrow_mut();
    let err = holder.get_name().unwrap_err();
    assert!(matches!(err, Error::Busy { .. }), "unexpected error: {err}");
}

// =============================================================================
// Set Introspection
// =============================================================================

#[test]
fn test_variants_listed_in_order() {
    assert_eq!(<AnyHandler as HandlerSet>::VARIANTS, &["A", "B"]);
}

#[test]
fn test_same_handler() {
    let a = Local::wrap(A::default());
    let first = <AnyHandler>::from_handle::<A>(Rc::clone(&a));
    let second = first.clone();
    let other = <AnyHandler>::from_handle::<A>(Local::wrap(A::default()));
    let b = <AnyHandler>::from_handle::<B>(Local::wrap(B::default()));

    assert!(first.same_handler(&second));
    assert!(!first.same_handler(&other));
    assert!(!first.same_handler(&b));
}

#[test]
fn test_holder_from_set_value() {
    let set = <AnyHandler>::from_handle::<B>(Local::wrap(B::default()));
    let holder = Holder::from(set);
    assert_eq!(holder.get_name().unwrap(), "B-impl");
    assert_eq!(format!("{holder:?}"), "Holder { state: Bound, variant: Some(\"B\") }");
}

#[test]
fn test_typed_handler_lookup() {
    let mut holder = Holder::<AnyHandler>::new();
    let b: HandleOf<AnyHandler, B> = holder.bind(B::default());
    let found = holder.handler::<B>().unwrap();
    assert!(Rc::ptr_eq(&b, &found));
}

// =============================================================================
// Renamed Alternatives
// =============================================================================

mod remote {
    tola_dispatch::handler! {
        pub struct Endpoint = "remote";
    }
}

handler_set! {
    enum Routed {
        Here(A),
        Remote(remote::Endpoint),
    }
}

#[test]
fn test_renamed_alternatives() {
    let mut holder = Holder::<Routed>::new();
    holder.bind(remote::Endpoint::default());
    assert_eq!(holder.variant(), Some("Remote"));
    assert_eq!(holder.get_name().unwrap(), "remote");

    holder.bind(A::default());
    assert_eq!(holder.variant(), Some("Here"));
}

// =============================================================================
// Weak Back References
// =============================================================================

#[derive(Handler)]
struct Child {
    #[label]
    name: Label,
    parent: Weak<RefCell<Holder<Family>>>,
}

handler_set! {
    enum Family { Child }
}

#[test]
fn test_back_reference_does_not_keep_holder_alive() {
    let holder = Rc::new(RefCell::new(Holder::<Family>::new()));
    let child = Local::wrap(Child { name: Label::from("child"), parent: Rc::downgrade(&holder) });
    holder.borrow_mut().set_handler::<Child>(Rc::clone(&child));

    // The child can reach its holder while it exists.
    let parent = child.borrow().parent.upgrade().unwrap();
    assert_eq!(parent.borrow().get_name().unwrap(), "child");
    drop(parent);

    let weak_holder = Rc::downgrade(&holder);
    drop(holder);
    assert!(weak_holder.upgrade().is_none());
    // The child itself survives through our handle.
    assert!(child.borrow().parent.upgrade().is_none());
    assert_eq!(Rc::strong_count(&child), 1);
}
