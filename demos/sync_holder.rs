// A holder shared across threads. Rebinding and reading are serialized, so
// every read sees one complete label.

use std::sync::Arc;
use std::thread;

use tola_dispatch::prelude::*;
use tola_dispatch::handler;

handler! {
    pub struct A = "A-impl";
    pub struct B = "B-impl";
}

handler_set! {
    pub enum AnyHandler { A, B }
}

fn main() {
    let holder = Arc::new(SyncHolder::<AnyHandler<Shared>>::new());

    let writer = {
        let holder = Arc::clone(&holder);
        thread::spawn(move || {
            for n in 0..5 {
                let bound = if n % 2 == 0 {
                    holder.bind(A::default()).map(|_| "A")
                } else {
                    holder.bind(B::default()).map(|_| "B")
                };
                println!("writer bound {bound:?}");
            }
        })
    };

    let reader = {
        let holder = Arc::clone(&holder);
        thread::spawn(move || {
            for _ in 0..5 {
                println!("reader saw {:?}", holder.get_name());
            }
        })
    };

    writer.join().expect("writer panicked");
    reader.join().expect("reader panicked");
    println!("final: {:?}", holder.get_name());
}
