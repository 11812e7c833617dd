// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Strongly Typed Indices (Zero-Cost)
//!
//! Phantom-typed wrappers around `usize` that keep index spaces from
//! different domains apart (tickets vs. technicians). `TypedIndex<T>` carries
//! a tag type `T: TypedIndexTag` encoding intent at the type level while
//! compiling down to a transparent `usize`.
//!
//! The assignment engine addresses three index spaces concurrently (tickets,
//! technicians, flat decision variables); raw `usize` invites accidental
//! swaps that type tags catch at compile time.
//!
//! ## Usage
//!
//! ```rust
//! use dispatch_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
//! struct RowTag;
//! impl TypedIndexTag for RowTag { const NAME: &'static str = "RowIndex"; }
//!
//! type RowIndex = TypedIndex<RowTag>;
//! let r = RowIndex::new(7);
//! assert_eq!(r.get(), 7);
//! assert_eq!(format!("{}", r), "RowIndex(7)");
//! ```

/// A trait to tag typed indices with a name for debugging and display purposes.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A strongly typed index associated with a specific tag type `T`.
///
/// Wraps a `usize` and uses a phantom type parameter to prevent mixing
/// indices of different domains.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new `TypedIndex` with the given `usize` index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the underlying `usize` index.
    #[inline]
    pub const fn get(&self) -> usize {
        self.index
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline]
    fn from(index: TypedIndex<T>) -> Self {
        index.get()
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct TestTag;

    impl TypedIndexTag for TestTag {
        const NAME: &'static str = "TestIndex";
    }

    type TestIndex = TypedIndex<TestTag>;

    #[test]
    fn test_new_and_get_round_trip() {
        let index = TestIndex::new(42);
        assert_eq!(index.get(), 42);
    }

    #[test]
    fn test_conversions_to_and_from_usize() {
        let index: TestIndex = 3.into();
        assert_eq!(index.get(), 3);
        let raw: usize = index.into();
        assert_eq!(raw, 3);
    }

    #[test]
    fn test_ordering_follows_underlying_index() {
        assert!(TestIndex::new(1) < TestIndex::new(2));
        assert_eq!(TestIndex::new(5), TestIndex::new(5));
    }

    #[test]
    fn test_display_and_debug_include_tag_name() {
        let index = TestIndex::new(9);
        assert_eq!(format!("{}", index), "TestIndex(9)");
        assert_eq!(format!("{:?}", index), "TestIndex(9)");
    }
}
