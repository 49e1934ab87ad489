//! Label value exposed by every handler.
//!
//! A `Label` is a plain owned string with a distinct type, so handler
//! signatures say what they return instead of returning a bare `String`.

use alloc::string::String;
use core::borrow::Borrow;
use core::fmt;
use core::ops::{Deref, DerefMut};

/// Mutable string-like value a handler exposes through its capability.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Label(String);

impl Label {
    #[inline]
    pub const fn empty() -> Self {
        Label(String::new())
    }

    #[inline]
    pub fn new(value: impl Into<String>) -> Self {
        Label(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Replace the contents, returning the previous value.
    pub fn replace(&mut self, value: impl Into<String>) -> Label {
        Label(core::mem::replace(&mut self.0, value.into()))
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Label {
    type Target = String;

    #[inline]
    fn deref(&self) -> &String {
        &self.0
    }
}

impl DerefMut for Label {
    #[inline]
    fn deref_mut(&mut self) -> &mut String {
        &mut self.0
    }
}

impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Label(String::from(value))
    }
}

impl From<String> for Label {
    fn from(value: String) -> Self {
        Label(value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl PartialEq<str> for Label {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl PartialEq<String> for Label {
    fn eq(&self, other: &String) -> bool {
        &self.0 == other
    }
}

impl PartialEq<Label> for &str {
    fn eq(&self, other: &Label) -> bool {
        *self == other.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_label_compares_with_str() {
        let label = Label::from("D1::impl()");
        assert_eq!(label, "D1::impl()");
        assert_eq!("D1::impl()", label);
        assert_ne!(label, "D2::impl()");
    }

    #[test]
    fn test_label_mutation_through_deref() {
        let mut label = Label::new("A");
        label.push_str("-impl");
        assert_eq!(label.as_str(), "A-impl");

        let old = label.replace("B-impl");
        assert_eq!(old, "A-impl");
        assert_eq!(label, "B-impl");
    }

    #[test]
    fn test_label_display_and_debug() {
        let label = Label::from("x");
        assert_eq!(format!("{label}"), "x");
        assert_eq!(format!("{label:?}"), "\"x\"");
        assert!(Label::empty().is_empty());
    }
}
