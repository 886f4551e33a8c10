use std::{fmt, iter::FusedIterator};

use smallvec::SmallVec;

use crate::compare::{is_sorted_by, Compare};
use super::{
    cursor::CursorSet,
    selector::{same_pending, Group, Selector},
};

/// Multiset symmetric difference of k sorted sequences.
///
/// Occurrences of a value are matched up level by level: the j-th copy of
/// `v` is yielded when an odd number of inputs hold at least j copies of it.
/// For plain sets this is "present in an odd number of inputs".
/// `[0,0,1,2] △ [0,1,1] △ [1,1,1,2]` is `[0,1,1]`.
pub struct SymmetricDifference<'a, T, C> {
    selector: Selector<'a, T, C>,
    group: Group,
    // Value being repeated and how many more copies are owed.
    pending: Option<(&'a T, usize)>,
}

impl<'a, T, C> SymmetricDifference<'a, T, C>
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

    /// Consumes the runs of the minimal value and returns it with the
    /// number of copies it contributes to the output (possibly zero).
    fn take_group(&mut self) -> Option<(&'a T, usize)> {
        let value = self.selector.pop_group(&mut self.group)?;

        let mut runs: SmallVec<[usize; 8]> = SmallVec::with_capacity(self.group.len());
        for &index in &self.group {
            runs.push(self.selector.skip_past(index, value));
        }

        self.selector.restore(&mut self.group);
        self.selector.release_if_exhausted();
        Some((value, odd_levels(&mut runs)))
    }
}

/// Number of levels `j` held by an odd number of runs, i.e. for which an
/// odd count of `runs` is at least `j`.
fn odd_levels(runs: &mut [usize]) -> usize {
    runs.sort_unstable();

    let mut copies = 0;
    let mut level = 0;
    for (position, &run) in runs.iter().enumerate() {
        // Levels in (level, run] are held by every run from here on.
        if (runs.len() - position) % 2 == 1 {
            copies += run - level;
        }
        level = run;
    }
    copies
}

impl<'a, T, C> Iterator for SymmetricDifference<'a, T, C>
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
            let (value, copies) = self.take_group()?;
            if copies == 0 {
                continue;
            }
            if copies > 1 {
                self.pending = Some((value, copies - 1));
            }
            return Some(value);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let owed = self.pending.map_or(0, |(_, owed)| owed);
        let total: usize = self
            .selector
            .cursors()
            .iter()
            .map(|c| c.remaining().len())
            .sum();
        (owed, Some(owed + total))
    }
}

impl<'a, T, C: Compare<T>> FusedIterator for SymmetricDifference<'a, T, C> {}

impl<'a, T, C: Clone> Clone for SymmetricDifference<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            group: Group::new(),
            pending: self.pending,
        }
    }
}

impl<'a, T, C> PartialEq for SymmetricDifference<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        same_pending(self.pending, other.pending) && self.selector == other.selector
    }
}

impl<'a, T, C> Eq for SymmetricDifference<'a, T, C> {}

impl<'a, T, C> fmt::Debug for SymmetricDifference<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricDifference")
            .field("selector", &self.selector)
            .field("owed", &self.pending.map_or(0, |(_, owed)| owed))
            .finish()
    }
}

