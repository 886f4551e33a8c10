use std::{fmt, iter::FusedIterator};

use crate::compare::{is_sorted_by, Compare};
use super::cursor::Cursor;

/// Multiset difference of two sorted sequences.
///
/// Every occurrence of a value in the subtrahend cancels one occurrence of
/// it in the minuend. `[1,2,2,3,5] \ [2,3,4]` is `[1,2,5]`.
///
/// Between steps either the engine is terminal, or the minuend's head is
/// strictly less than the subtrahend's (or the subtrahend is exhausted).
pub struct Difference<'a, T, C> {
    minuend: Cursor<'a, T>,
    subtrahend: Cursor<'a, T>,
    compare: C,
}

impl<'a, T, C> Difference<'a, T, C>
where
    C: Compare<T>,
{
    pub fn new(minuend: &'a [T], subtrahend: &'a [T], compare: C) -> Self {
        debug_assert!(is_sorted_by(minuend, &compare));
        debug_assert!(is_sorted_by(subtrahend, &compare));

        let mut difference = Self {
            minuend: Cursor::new(minuend),
            subtrahend: Cursor::new(subtrahend),
            compare,
        };
        difference.settle();
        difference
    }

    pub fn end_with(compare: C) -> Self {
        Self {
            minuend: Cursor::exhausted(),
            subtrahend: Cursor::exhausted(),
            compare,
        }
    }

    pub fn end() -> Self
    where
        C: Default,
    {
        Self::end_with(C::default())
    }

    pub fn to_end(&self) -> Self
    where
        C: Clone,
    {
        Self::end_with(self.compare.clone())
    }

    pub fn is_exhausted(&self) -> bool {
        self.minuend.is_exhausted()
    }

    /// Cancels equal heads and skips the subtrahend forward until the
    /// minuend's head is strictly smaller.
    fn settle(&mut self) {
        while let (Some(left), Some(right)) = (self.minuend.current(), self.subtrahend.current()) {
            if self.compare.less(left, right) {
                break;
            }
            if self.compare.less(right, left) {
                self.subtrahend.skip_to(left, &self.compare);
            } else {
                self.minuend.advance();
                self.subtrahend.advance();
            }
        }

        if self.minuend.is_exhausted() {
            self.subtrahend = Cursor::exhausted();
        }
    }
}

impl<'a, T, C> Iterator for Difference<'a, T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.minuend.current()?;
        self.minuend.advance();
        self.settle();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.minuend.remaining().len();
        let right = self.subtrahend.remaining().len();
        (left.saturating_sub(right), Some(left))
    }
}

impl<'a, T, C: Compare<T>> FusedIterator for Difference<'a, T, C> {}

impl<'a, T, C: Clone> Clone for Difference<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            minuend: self.minuend,
            subtrahend: self.subtrahend,
            compare: self.compare.clone(),
        }
    }
}

impl<'a, T, C> PartialEq for Difference<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.minuend == other.minuend && self.subtrahend == other.subtrahend
    }
}

impl<'a, T, C> Eq for Difference<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Difference<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Difference")
            .field("minuend", &self.minuend)
            .field("subtrahend", &self.subtrahend)
            .finish()
    }
}
