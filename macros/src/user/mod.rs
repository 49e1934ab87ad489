//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[derive(Handler)]` | on struct | Implement the concrete side of the capability |
//! | `handler_set!` | function macro | Build a closed handler set enum |

mod handler;
mod handler_set;

pub use handler::expand_derive_handler;
pub use handler_set::{expand_handler_set, HandlerSetInput};
