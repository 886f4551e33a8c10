use std::{fmt, ops::Index};

use smallvec::SmallVec;

use crate::{
    compare::Compare,
    galloping::{galloping_lower_bound, galloping_upper_bound},
};

/// Read position within one caller-owned sorted sequence.
///
/// Holds the unconsumed tail of the sequence; an exhausted cursor holds an
/// empty tail. Cursors never mutate the sequence.
pub struct Cursor<'a, T> {
    rest: &'a [T],
}

impl<'a, T> Cursor<'a, T> {
    pub fn new(sequence: &'a [T]) -> Self {
        Self { rest: sequence }
    }

    pub fn exhausted() -> Self {
        Self { rest: &[] }
    }

    #[inline]
    pub fn current(&self) -> Option<&'a T> {
        self.rest.first()
    }

    /// Current element of a cursor known to be live.
    #[inline]
    pub(crate) fn head(&self) -> &'a T {
        &self.rest[0]
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }

    #[inline]
    pub fn remaining(&self) -> &'a [T] {
        self.rest
    }

    #[inline]
    pub fn advance(&mut self) {
        if let Some((_, tail)) = self.rest.split_first() {
            self.rest = tail;
        }
    }

    /// Moves past the run of elements equivalent to `value` at the front.
    /// Returns the length of that run.
    pub fn skip_past<C: Compare<T>>(&mut self, value: &T, compare: &C) -> usize {
        let run = galloping_upper_bound(self.rest, value, compare);
        self.rest = &self.rest[run..];
        run
    }

    /// Moves to the first element not less than `value`.
    pub fn skip_to<C: Compare<T>>(&mut self, value: &T, compare: &C) -> usize {
        let skipped = galloping_lower_bound(self.rest, value, compare);
        self.rest = &self.rest[skipped..];
        skipped
    }
}

// Manual impls: `T` itself need not be `Clone`/`Copy` for a cursor to be.
impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

/// Positional identity: same place in the same sequence. All exhausted
/// cursors are equal.
impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        (self.is_exhausted() && other.is_exhausted())
            || std::ptr::eq(self.rest, other.rest)
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> fmt::Debug for Cursor<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("remaining", &self.rest.len())
            .finish()
    }
}

/// Exactly k cursors, one per input sequence, in input order.
pub struct CursorSet<'a, T> {
    cursors: SmallVec<[Cursor<'a, T>; 8]>,
}

impl<'a, T> CursorSet<'a, T> {
    pub fn new<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        Self {
            cursors: sequences.into_iter().map(Cursor::new).collect(),
        }
    }

    pub fn empty() -> Self {
        Self { cursors: SmallVec::new() }
    }

    /// Number of sequences, k.
    pub fn len(&self) -> usize {
        self.cursors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursors.is_empty()
    }

    pub fn live(&self) -> usize {
        self.cursors.iter().filter(|c| !c.is_exhausted()).count()
    }

    pub fn any_exhausted(&self) -> bool {
        self.cursors.iter().any(Cursor::is_exhausted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cursor<'a, T>> {
        self.cursors.iter()
    }

    pub fn get_mut(&mut self, index: usize) -> &mut Cursor<'a, T> {
        &mut self.cursors[index]
    }

    /// Drops every cursor. The result is the terminal state shared by all
    /// exhausted engines.
    pub fn release(&mut self) {
        self.cursors.clear();
    }
}

impl<'a, T> Index<usize> for CursorSet<'a, T> {
    type Output = Cursor<'a, T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cursors[index]
    }
}

impl<'a, T> Clone for CursorSet<'a, T> {
    fn clone(&self) -> Self {
        Self { cursors: self.cursors.clone() }
    }
}

impl<'a, T> PartialEq for CursorSet<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        self.cursors == other.cursors
    }
}

impl<'a, T> Eq for CursorSet<'a, T> {}

impl<'a, T> fmt::Debug for CursorSet<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.cursors.iter()).finish()
    }
}
