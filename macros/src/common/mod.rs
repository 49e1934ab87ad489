// Common utilities shared between the user-facing macros
//
// This module contains:
// - parse_utils: duplicate detection and marker attribute helpers

mod parse_utils;

pub use parse_utils::*;
