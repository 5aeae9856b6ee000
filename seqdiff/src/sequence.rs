//! Sequence adapter.
//!
//! The engine works on slices. Text is the one input that is not already a
//! slice of comparable elements, so it is turned into a `Vec<char>` here and
//! nowhere else.

use std::borrow::Cow;

/// An ordered, randomly indexable collection of comparable elements.
pub trait Sequence {
    /// The element type compared by the engine.
    type Element: Clone;

    /// Returns the elements as a slice, borrowing when possible.
    fn elements(&self) -> Cow<'_, [Self::Element]>;
}

impl Sequence for str {
    type Element = char;

    fn elements(&self) -> Cow<'_, [char]> {
        Cow::Owned(self.chars().collect())
    }
}

impl Sequence for String {
    type Element = char;

    fn elements(&self) -> Cow<'_, [char]> {
        self.as_str().elements()
    }
}

impl<T: Clone> Sequence for [T] {
    type Element = T;

    fn elements(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self)
    }
}

impl<T: Clone> Sequence for Vec<T> {
    type Element = T;

    fn elements(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: Clone, const N: usize> Sequence for [T; N] {
    type Element = T;

    fn elements(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}
