// Tag-dispatched capability: `debug::<Provider>` and `debug::<Calculator>`
// resolve to different branches of one implementation at compile time.

use std::cell::RefCell;
use std::rc::Rc;

use tola_dispatch::prelude::*;
use tola_dispatch::Trace;

#[derive(Default)]
struct Test;

impl TraceImpl for Test {
    fn impl_debug<S: Source>(&mut self, id: u32) -> Trace {
        match S::TYPE {
            SourceType::Provider => Trace::new::<S>(id, "impl PROVIDER"),
            SourceType::Calculator => Trace::new::<S>(id, "impl CALCULATOR"),
        }
    }
}

fn handle<T: TraceImpl>(cc: &Rc<RefCell<T>>) {
    println!("{}", cc.borrow_mut().debug::<Provider>(1));
}

fn main() {
    let mut c = Test;
    println!("{}", c.debug::<Provider>(1));
    println!("{}", c.debug::<Calculator>(1));

    let cc = Local::wrap(Test);
    println!("{}", cc.borrow_mut().debug::<Provider>(1));
    handle(&cc);

    // Runtime code back to the static tag.
    for code in [10u8, 11, 12] {
        match SourceType::try_from(code) {
            Ok(ty) => println!("{}", c.debug_dyn(ty, 2)),
            Err(err) => println!("{err}"),
        }
    }
}
