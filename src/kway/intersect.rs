use std::{fmt, iter::FusedIterator};

use crate::compare::{is_sorted_by, Compare};
use super::{
    cursor::CursorSet,
    selector::{same_pending, Group, Selector},
};

/// Multiset intersection of k sorted sequences.
///
/// Each value present in every input is yielded as many times as it occurs
/// in the input where it occurs least often. `[1,1,2] ∩ [1,1,1,2,2]` is
/// `[1,1,2]`. The first sequence to run out ends the intersection: no later
/// value can be common to all inputs.
///
/// At each step the cursors holding the minimal value are popped from the
/// selector as a group. A full group (all k cursors) is a hit; otherwise the
/// group gallops forward to the next smallest value held by any other
/// cursor, skipping everything in between without inspecting it.
pub struct Intersect<'a, T, C> {
    selector: Selector<'a, T, C>,
    group: Group,
    // Value being repeated and how many more copies are owed.
    pending: Option<(&'a T, usize)>,
}

impl<'a, T, C> Intersect<'a, T, C>
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
        if selector.width() == 0 || selector.cursors().any_exhausted() {
            selector.release();
        }
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

    /// Moves every grouped cursor past its run of `value`. Returns the
    /// shortest run.
    fn consume(&mut self, value: &T) -> usize {
        let mut shortest = usize::MAX;
        for &index in &self.group {
            shortest = shortest.min(self.selector.skip_past(index, value));
        }
        self.rejoin();
        shortest
    }

    /// Moves every grouped cursor to `bound`. Returns false if any of them
    /// ran out.
    fn skip_group_to(&mut self, bound: &T) -> bool {
        for &index in &self.group {
            self.selector.skip_to(index, bound);
        }
        self.rejoin()
    }

    fn rejoin(&mut self) -> bool {
        let intact = self
            .group
            .iter()
            .all(|&index| !self.selector.cursor(index).is_exhausted());

        if intact {
            self.selector.restore(&mut self.group);
        } else {
            self.group.clear();
            self.selector.release();
        }
        intact
    }
}

impl<'a, T, C> Iterator for Intersect<'a, T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((value, owed)) = self.pending {
            self.pending = (owed > 1).then_some((value, owed - 1));
            return Some(value);
        }

        loop {
            let width = self.selector.width();
            let value = self.selector.pop_group(&mut self.group)?;

            if self.group.len() == width {
                let run = self.consume(value);
                if run > 1 {
                    self.pending = Some((value, run - 1));
                }
                return Some(value);
            }

            // Nothing below the smallest value outside the group can be in
            // every sequence.
            let Some(bound) = self.selector.peek() else {
                self.group.clear();
                self.selector.release();
                return None;
            };

            if !self.skip_group_to(bound) {
                return None;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let owed = self.pending.map_or(0, |(_, owed)| owed);
        let shortest = self
            .selector
            .cursors()
            .iter()
            .map(|c| c.remaining().len())
            .min();
        (owed, Some(owed + shortest.unwrap_or(0)))
    }
}

impl<'a, T, C: Compare<T>> FusedIterator for Intersect<'a, T, C> {}

impl<'a, T, C: Clone> Clone for Intersect<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            group: Group::new(),
            pending: self.pending,
        }
    }
}

impl<'a, T, C> PartialEq for Intersect<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        same_pending(self.pending, other.pending) && self.selector == other.selector
    }
}

impl<'a, T, C> Eq for Intersect<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Intersect<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Intersect")
            .field("selector", &self.selector)
            .field("owed", &self.pending.map_or(0, |(_, owed)| owed))
            .finish()
    }
}
