use std::{fmt, iter::FusedIterator};

use tracing::debug;

use crate::{
    compare::{is_sorted_by, Compare},
    error::{Error, Result},
};
use super::{
    cursor::CursorSet,
    selector::{Group, Selector},
};

/// Threshold intersection: each distinct value present in at least
/// `threshold` of the k sequences, yielded once.
///
/// With `threshold == k` this is the deduplicated [super::Intersect]; with
/// `threshold == 1` it is the deduplicated union. Sequences running out
/// only lower the reachable count, so the engine keeps going until fewer
/// than `threshold` sequences are left.
pub struct Semiintersect<'a, T, C> {
    selector: Selector<'a, T, C>,
    group: Group,
    threshold: usize,
}

impl<'a, T, C> Semiintersect<'a, T, C>
where
    C: Compare<T>,
{
    /// Fails unless `1 <= threshold <= k`.
    pub fn new<I>(sequences: I, threshold: usize, compare: C) -> Result<Self>
    where
        I: IntoIterator<Item = &'a [T]>,
    {
        let cursors = CursorSet::new(sequences);
        if threshold == 0 || threshold > cursors.len() {
            return Err(Error::ThresholdOutOfRange {
                threshold,
                sequences: cursors.len(),
            });
        }
        debug_assert!(cursors.iter().all(|c| is_sorted_by(c.remaining(), &compare)));
        debug!(sequences = cursors.len(), live = cursors.live(), threshold, "semiintersect");

        let mut selector = Selector::new(cursors, compare);
        if selector.live() < threshold {
            selector.release();
        }
        Ok(Self {
            selector,
            group: Group::new(),
            threshold,
        })
    }

    pub fn end_with(threshold: usize, compare: C) -> Self {
        Self {
            selector: Selector::end(compare),
            group: Group::new(),
            threshold,
        }
    }

    pub fn end(threshold: usize) -> Self
    where
        C: Default,
    {
        Self::end_with(threshold, C::default())
    }

    pub fn to_end(&self) -> Self
    where
        C: Clone,
    {
        Self::end_with(self.threshold, self.selector.compare().clone())
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn is_exhausted(&self) -> bool {
        self.selector.is_exhausted()
    }

    /// Returns the group to the heap, ending the engine if too few
    /// sequences remain to ever reach the threshold.
    fn rejoin(&mut self) {
        self.selector.restore(&mut self.group);
        if self.selector.live() < self.threshold {
            self.selector.release();
        }
    }
}

impl<'a, T, C> Iterator for Semiintersect<'a, T, C>
where
    C: Compare<T>,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = self.selector.pop_group(&mut self.group)?;

            if self.group.len() >= self.threshold {
                for &index in &self.group {
                    self.selector.skip_past(index, value);
                }
                self.rejoin();
                return Some(value);
            }

            // Values below the smallest one outside the group occur only in
            // the group's sequences, which are too few.
            match self.selector.peek() {
                Some(bound) => {
                    for &index in &self.group {
                        self.selector.skip_to(index, bound);
                    }
                }
                None => {
                    self.group.clear();
                    self.selector.release();
                    return None;
                }
            }
            self.rejoin();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total: usize = self
            .selector
            .cursors()
            .iter()
            .map(|c| c.remaining().len())
            .sum();
        (0, Some(total / self.threshold.max(1)))
    }
}

impl<'a, T, C: Compare<T>> FusedIterator for Semiintersect<'a, T, C> {}

impl<'a, T, C: Clone> Clone for Semiintersect<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            selector: self.selector.clone(),
            group: Group::new(),
            threshold: self.threshold,
        }
    }
}

impl<'a, T, C> PartialEq for Semiintersect<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.threshold == other.threshold && self.selector == other.selector
    }
}

impl<'a, T, C> Eq for Semiintersect<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Semiintersect<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Semiintersect")
            .field("threshold", &self.threshold)
            .field("selector", &self.selector)
            .finish()
    }
}
