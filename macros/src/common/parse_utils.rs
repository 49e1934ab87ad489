//! Common parsing utilities
//!
//! Shared helpers for the derive and function-like macros.

use std::collections::HashSet;

use quote::ToTokens;
use syn::{Attribute, Ident};

// =============================================================================
// Duplicate Detection
// =============================================================================

/// Reject the first item whose token text was already seen.
///
/// `what` names the kind of item in the error message ("variant", "handler type").
pub fn check_duplicates<T: ToTokens>(items: &[&T], what: &str, set: &Ident) -> syn::Result<()> {
    let mut seen = HashSet::new();
    for item in items {
        let text = item.to_token_stream().to_string().replace(' ', "");
        if !seen.insert(text.clone()) {
            return Err(syn::Error::new_spanned(
                item,
                format!(
                    "duplicate {what} `{text}` in handler set `{set}`\n\
                     \n\
                     Each {what} may appear only once; a holder picks the \
                     alternative from the handler's type, so duplicates would \
                     make the selection ambiguous."
                ),
            ));
        }
    }
    Ok(())
}

// =============================================================================
// Marker Attributes
// =============================================================================

/// Whether `attrs` contains the bare marker attribute `#[name]`.
///
/// Errors if the attribute is present but carries arguments.
pub fn has_marker(attrs: &[Attribute], name: &str) -> syn::Result<bool> {
    let mut found = false;
    for attr in attrs.iter().filter(|a| a.path().is_ident(name)) {
        attr.meta.require_path_only()?;
        found = true;
    }
    Ok(found)
}
