// Static dispatch through the capability interface, then runtime selection
// through a holder bound to one of a closed set of handlers.

use std::rc::Rc;

use tola_dispatch::prelude::*;
use tola_dispatch::{handler, name_of};

handler! {
    pub struct D1 = "D1::impl()";
    pub struct D2 = "D2::impl()";
}

handler_set! {
    pub enum AnyHandler { D1, D2 }
}

// reference version
fn handle<N: Named>(handler: &mut N) {
    println!("handle: {}", name_of(handler));
}

// pointer version
fn handle_shared<T: Handler>(handler: &Rc<std::cell::RefCell<T>>) {
    match Local::read_name(handler) {
        Ok(name) => println!("handle_shared: {name}"),
        Err(err) => println!("handle_shared failed: {err}"),
    }
}

fn main() {
    let mut d1 = D1::default();
    println!("d1.name() = {}", d1.name());
    let mut d2 = D2::default();
    println!("d2.name() = {}", d2.name());

    handle(&mut d1);

    let d11 = Local::wrap(D1::default());
    let d22 = Local::wrap(D2::default());
    handle_shared(&d11);
    handle_shared(&d22);

    let mut holder = Holder::<AnyHandler>::new();
    match holder.get_name() {
        Ok(name) => println!("unexpected name on empty holder: {name}"),
        Err(err) => println!("empty holder: {err}"),
    }

    holder.set_handler::<D1>(Rc::clone(&d11));
    println!("holder -> {:?}", holder.get_name());

    holder.set_handler::<D2>(d22);
    println!("holder -> {:?}", holder.get_name());
}
