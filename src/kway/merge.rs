use std::{fmt, iter::FusedIterator};

use crate::compare::Compare;
use super::{cursor::CursorSet, selector::Selector};

/// Stable k-way merge.
///
/// Yields every element of every input exactly once, in sorted order.
/// Equivalent elements come out in input order: lower sequence index first,
/// then position within the sequence.
pub struct Merge<'a, T, C> {
    selector: Selector<'a, T, C>,
}

impl<'a, T, C> Merge<'a, T, C>
where
    C: Compare<T>,
{
    pub fn new<I>(sequences: I, compare: C) -> Self
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        let cursors = CursorSet::new(sequences);
        debug_assert!(cursors
            .iter()
            .all(|c| crate::compare::is_sorted_by(c.remaining(), &compare)));

        let mut selector = Selector::new(cursors, compare);
        selector.release_if_exhausted();
        Self { selector }
    }

    pub fn end_with(compare: C) -> Self {
        Self { selector: Selector::end(compare) }
    }

    pub fn end() -> Self
    where
        C: Default,
    {
        Self::end_with(C::default())
    }

    /// Terminal state of this merge, built without advancing it.
    pub fn to_end(&self) -> Self
    where
        C: Clone,
    {
        Self::end_with(self.selector.compare().clone())
    }

    pub fn is_exhausted(&self) -> bool {
        self.selector.is_exhausted()
    }

    /// Next element without consuming it.
    pub fn peek(&self) -> Option<&'a T> {
        self.selector.peek()
    }
}

impl<'a, T, C> Iterator for Merge<'a, T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.selector.next()?;
        self.selector.release_if_exhausted();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .selector
            .cursors()
            .iter()
            .map(|c| c.remaining().len())
            .sum();
        (remaining, Some(remaining))
    }
}

impl<'a, T, C: Compare<T>> ExactSizeIterator for Merge<'a, T, C> {}

impl<'a, T, C: Compare<T>> FusedIterator for Merge<'a, T, C> {}

impl<'a, T, C: Clone> Clone for Merge<'a, T, C> {
    fn clone(&self) -> Self {
        Self { selector: self.selector.clone() }
    }
}

impl<'a, T, C> PartialEq for Merge<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.selector == other.selector
    }
}

impl<'a, T, C> Eq for Merge<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Merge<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Merge").field("selector", &self.selector).finish()
    }
}
