//! Declarative shorthand for defining handler variants.

// =============================================================================
// handler! - Declare label-only handler structs
// =============================================================================

/// Declare one or more handler structs holding just a label.
///
/// # Example
///
/// ```
/// use tola_dispatch::{handler, Named};
///
/// handler! {
///     /// First variant.
///     pub struct D1 = "D1::impl()";
///     pub struct D2 = "D2::impl()";
/// }
///
/// let mut d1 = D1::default();
/// assert_eq!(d1.name(), "D1::impl()");
/// assert_eq!(D2::new("custom").label, "custom");
/// ```
///
/// Each struct gets a public `label` field, `#[derive(Handler, Debug, Clone,
/// PartialEq)]`, `new(label)` and a `Default` using the given label.
#[macro_export]
macro_rules! handler {
    ($(
        $(#[$meta:meta])*
        $vis:vis struct $Name:ident = $label:expr;
    )+) => {
        $(
            $(#[$meta])*
            #[derive($crate::Handler, Debug, Clone, PartialEq)]
            $vis struct $Name {
                pub label: $crate::Label,
            }

            impl $Name {
                #[allow(dead_code)]
                pub fn new(label: impl ::core::convert::Into<$crate::Label>) -> Self {
                    $Name { label: label.into() }
                }
            }

            impl ::core::default::Default for $Name {
                fn default() -> Self {
                    $Name::new($label)
                }
            }
        )+
    };
}
