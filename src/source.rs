//! # Tag-Dispatched Capability
//!
//! A second capability whose behaviour is selected by a *type-level* tag:
//!
//! ```ignore
//! handler.debug::<Provider>(1);    // resolved at compile time
//! handler.debug::<Calculator>(1);
//! ```
//!
//! Each tag is a marker type implementing [`Source`]. Its `TYPE` constant is
//! known at compile time, so a `match S::TYPE { .. }` inside
//! [`TraceImpl::impl_debug`] folds down to the single taken arm.
//!
//! When the tag is only known at runtime, [`Traced::debug_dyn`] bridges it back
//! to the static call through [`SourceType::dispatch`].

use alloc::string::String;
use core::fmt;

use crate::error::Error;

/// A type-level source tag.
pub trait Source: 'static {
    const TYPE: SourceType;
}

/// Callback invoked with the static tag matching a runtime [`SourceType`].
pub trait SourceVisitor {
    type Out;

    fn visit<S: Source>(self) -> Self::Out;
}

// =============================================================================
// define_sources! - SourceType enum + marker types
// =============================================================================

/// Define the `SourceType` enum and one marker type per source.
///
/// ```ignore
/// define_sources! {
///     Provider = 10,
///     Calculator = 11,
/// }
/// ```
///
/// Generates `SourceType::{Provider, Calculator}`, marker structs `Provider`
/// and `Calculator` implementing [`Source`], `is_provider()`/`is_calculator()`,
/// `TryFrom<u8>` and [`SourceType::dispatch`].
macro_rules! define_sources {
    ($($Name:ident = $code:literal),* $(,)?) => {
        $crate::paste::paste! {
            /// Runtime source tag.
            #[repr(u8)]
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum SourceType {
                $($Name = $code,)*
            }

            impl SourceType {
                pub const ALL: &'static [SourceType] = &[$(SourceType::$Name,)*];

                #[inline]
                pub const fn code(self) -> u8 {
                    self as u8
                }

                /// Upper-case name used in traces.
                pub const fn as_str(self) -> &'static str {
                    match self {
                        $(SourceType::$Name => stringify!([<$Name:upper>]),)*
                    }
                }

                $(
                    #[inline]
                    pub const fn [<is_ $Name:snake>](self) -> bool {
                        matches!(self, SourceType::$Name)
                    }
                )*

                /// Call `visitor` with the marker type matching `self`.
                pub fn dispatch<V: SourceVisitor>(self, visitor: V) -> V::Out {
                    match self {
                        $(SourceType::$Name => visitor.visit::<$Name>(),)*
                    }
                }
            }

            impl TryFrom<u8> for SourceType {
                type Error = Error;

                fn try_from(code: u8) -> Result<Self, Error> {
                    match code {
                        $($code => Ok(SourceType::$Name),)*
                        other => Err(Error::UnknownSource(other)),
                    }
                }
            }

            $(
                /// Type-level source tag.
                #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
                pub struct $Name;

                impl Source for $Name {
                    const TYPE: SourceType = SourceType::$Name;
                }
            )*
        }
    };
}

define_sources! {
    Provider = 10,
    Calculator = 11,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Trace
// =============================================================================

/// Result of a tag-dispatched call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trace {
    pub source: SourceType,
    pub id: u32,
    pub message: String,
}

impl Trace {
    pub fn new<S: Source>(id: u32, message: impl Into<String>) -> Self {
        Trace { source: S::TYPE, id, message: message.into() }
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}#{}] {}", self.source, self.id, self.message)
    }
}

// =============================================================================
// TraceImpl / Traced
// =============================================================================

/// Concrete side of the tag-dispatched capability.
pub trait TraceImpl: 'static {
    fn impl_debug<S: Source>(&mut self, id: u32) -> Trace;
}

/// Interface side of the tag-dispatched capability.
pub trait Traced {
    fn debug<S: Source>(&mut self, id: u32) -> Trace;

    fn debug_dyn(&mut self, source: SourceType, id: u32) -> Trace;
}

struct DebugVisitor<'a, T> {
    target: &'a mut T,
    id: u32,
}

impl<T: TraceImpl> SourceVisitor for DebugVisitor<'_, T> {
    type Out = Trace;

    #[inline(always)]
    fn visit<S: Source>(self) -> Trace {
        self.target.debug::<S>(self.id)
    }
}

impl<T: TraceImpl> Traced for T {
    #[inline(always)]
    fn debug<S: Source>(&mut self, id: u32) -> Trace {
        log::trace!("debug::<{}>({id}) on {}", S::TYPE, core::any::type_name::<T>());
        self.impl_debug::<S>(id)
    }

    fn debug_dyn(&mut self, source: SourceType, id: u32) -> Trace {
        source.dispatch(DebugVisitor { target: self, id })
    }
}
