//! Errors reported by holders, handles and source tags.

use thiserror::Error;

/// Failures surfaced by the runtime half of the crate.
///
/// All of these are contract violations by the caller. Nothing is retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capability access on a holder that was never bound.
    #[error("handler holder is unbound: no variant has been set")]
    Unbound,

    /// The variant is already mutably borrowed (re-entrant access on a local handle).
    #[error("handler `{variant}` is already borrowed")]
    Busy { variant: &'static str },

    /// A thread panicked while holding the variant or holder lock.
    #[error("lock around `{variant}` was poisoned")]
    Poisoned { variant: &'static str },

    /// Numeric source code outside the known `SourceType` set.
    #[error("unknown source type code {0}")]
    UnknownSource(u8),
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
