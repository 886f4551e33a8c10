use std::{fmt, iter::FusedIterator};

use crate::compare::{is_sorted_by, Compare};
use super::{
    cursor::CursorSet,
    selector::{same_pending, Group, Selector},
};

/// Multiset union of k sorted sequences.
///
/// Each distinct value is yielded as many times as it occurs in the input
/// where it occurs most often. `[1,2,2,3] ∪ [0,2,2,4]` is `[0,1,2,2,3,4]`.
pub struct Union<'a, T, C> {
    selector: Selector<'a, T, C>,
    group: Group,
    // Value being repeated and how many more copies are owed.
    pending: Option<(&'a T, usize)>,
}

impl<'a, T, C> Union<'a, T, C>
where
    C: Compare<T>,
{
    pub fn new<I>(sequences: I, compare: C) -> Self
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        let cursors = CursorSet::new(sequences);
        debug_assert!(cursors.iter().all(|c| is_sorted_by(c.remaining(), &compare)));

        let mut selector = Selector::new(cursors, compare);
        selector.release_if_exhausted();
        Self {
            selector,
            group: Group::new(),
            pending: None,
        }
    }

    pub fn end_with(compare: C) -> Self {
        Self {
            selector: Selector::end(compare),
            group: Group::new(),
            pending: None,
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
        Self::end_with(self.selector.compare().clone())
    }

    pub fn is_exhausted(&self) -> bool {
        self.pending.is_none() && self.selector.is_exhausted()
    }

    /// Consumes the run of the minimal value in every sequence holding it.
    /// Returns the value and its longest run.
    fn take_group(&mut self) -> Option<(&'a T, usize)> {
        let value = self.selector.pop_group(&mut self.group)?;

        let mut longest = 0;
        for &index in &self.group {
            longest = longest.max(self.selector.skip_past(index, value));
        }

        self.selector.restore(&mut self.group);
        self.selector.release_if_exhausted();
        Some((value, longest))
    }
}

impl<'a, T, C> Iterator for Union<'a, T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((value, owed)) = self.pending {
            self.pending = (owed > 1).then_some((value, owed - 1));
            return Some(value);
        }

        let (value, run) = self.take_group()?;
        if run > 1 {
            self.pending = Some((value, run - 1));
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let owed = self.pending.map_or(0, |(_, owed)| owed);
        let longest = self
            .selector
            .cursors()
            .iter()
            .map(|c| c.remaining().len())
            .max()
            .unwrap_or(0);
        let total: usize = self
            .selector
            .cursors()
            .iter()
            .map(|c| c.remaining().len())
            .sum();

        (owed + longest, Some(owed + total))
    }
}

impl<'a, T, C: Compare<T>> FusedIterator for Union<'a, T, C> {}

impl<'a, T, C: Clone> Clone for Union<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            group: Group::new(),
            pending: self.pending,
        }
    }
}

impl<'a, T, C> PartialEq for Union<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        same_pending(self.pending, other.pending) && self.selector == other.selector
    }
}

impl<'a, T, C> Eq for Union<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Union<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Union")
            .field("selector", &self.selector)
            .field("owed", &self.pending.map_or(0, |(_, owed)| owed))
            .finish()
    }
}
