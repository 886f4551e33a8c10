use std::{cmp::Ordering, fmt};

use smallvec::SmallVec;

use crate::compare::Compare;
use super::cursor::{Cursor, CursorSet};

/// Cursor indices popped together because they share the root value.
pub type Group = SmallVec<[usize; 8]>;

/// Equality of the repeat counters engines keep for multiset output: same
/// element (by address) and same number of copies owed.
pub fn same_pending<T>(a: Option<(&T, usize)>, b: Option<(&T, usize)>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some((a, n)), Some((b, m))) => std::ptr::eq(a, b) && n == m,
        _ => false,
    }
}

/// Index-based binary min-heap over the live cursors of a [CursorSet].
///
/// The root always names the cursor holding the globally-next element.
/// Ties between equivalent elements are broken by sequence index, lowest
/// first, which makes draining the selector a stable merge.
pub struct Selector<'a, T, C> {
    cursors: CursorSet<'a, T>,
    heap: SmallVec<[usize; 8]>,
    compare: C,
}

impl<'a, T, C> Selector<'a, T, C>
where
    C: Compare<T>,
{
    pub fn new(cursors: CursorSet<'a, T>, compare: C) -> Self {
        let heap = (0..cursors.len())
            .filter(|&i| !cursors[i].is_exhausted())
            .collect();

        let mut selector = Self { cursors, heap, compare };
        for position in (0..selector.heap.len() / 2).rev() {
            selector.sift_down(position);
        }
        selector
    }

    /// Terminal selector: no cursors at all.
    pub fn end(compare: C) -> Self {
        Self {
            cursors: CursorSet::empty(),
            heap: SmallVec::new(),
            compare,
        }
    }

    pub fn compare(&self) -> &C {
        &self.compare
    }

    pub fn cursors(&self) -> &CursorSet<'a, T> {
        &self.cursors
    }

    /// Number of input sequences the selector was built over (0 once
    /// released).
    pub fn width(&self) -> usize {
        self.cursors.len()
    }

    /// Number of cursors currently in the heap.
    pub fn live(&self) -> usize {
        self.heap.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn top(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    pub fn peek(&self) -> Option<&'a T> {
        self.top().map(|index| self.cursors[index].head())
    }

    /// Yields the globally-next element and advances its cursor.
    pub fn next(&mut self) -> Option<&'a T> {
        let value = self.peek()?;
        self.advance_top();
        Some(value)
    }

    /// Advances the root cursor by one element, O(log k).
    pub fn advance_top(&mut self) {
        let Some(index) = self.top() else {
            return;
        };

        self.cursors.get_mut(index).advance();
        if self.cursors[index].is_exhausted() {
            self.pop();
        } else {
            self.sift_down(0);
        }
    }

    /// Removes the root from the heap without touching its cursor.
    pub fn pop(&mut self) -> Option<usize> {
        let last = self.heap.len().checked_sub(1)?;
        self.heap.swap(0, last);
        let index = self.heap.pop();
        self.sift_down(0);
        index
    }

    /// Returns a cursor to the heap, unless it has been exhausted.
    pub fn push(&mut self, index: usize) {
        if self.cursors[index].is_exhausted() {
            return;
        }
        self.heap.push(index);
        self.sift_up(self.heap.len() - 1);
    }

    /// Pops every cursor whose current element is equivalent to the root's
    /// into `group`, lowest index first, and returns that element.
    pub fn pop_group(&mut self, group: &mut Group) -> Option<&'a T> {
        group.clear();
        let value = self.peek()?;

        while let Some(index) = self.top() {
            if !self.compare.equivalent(self.cursors[index].head(), value) {
                break;
            }
            group.push(index);
            self.pop();
        }
        Some(value)
    }

    /// Returns every grouped cursor to the heap.
    pub fn restore(&mut self, group: &mut Group) {
        for index in group.drain(..) {
            self.push(index);
        }
    }

    pub fn skip_past(&mut self, index: usize, value: &T) -> usize {
        let compare = &self.compare;
        self.cursors.get_mut(index).skip_past(value, compare)
    }

    pub fn skip_to(&mut self, index: usize, value: &T) -> usize {
        let compare = &self.compare;
        self.cursors.get_mut(index).skip_to(value, compare)
    }

    pub fn cursor(&self, index: usize) -> &Cursor<'a, T> {
        &self.cursors[index]
    }

    /// Drops every cursor, entering the terminal state.
    pub fn release(&mut self) {
        self.heap.clear();
        self.cursors.release();
    }

    /// Enters the terminal state once no cursor is left in the heap.
    pub fn release_if_exhausted(&mut self) {
        if self.is_exhausted() {
            self.release();
        }
    }

    fn precedes(&self, a: usize, b: usize) -> bool {
        let order = self
            .compare
            .compare(self.cursors[a].head(), self.cursors[b].head());

        match order {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => a < b,
        }
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.precedes(self.heap[position], self.heap[parent]) {
                break;
            }
            self.heap.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut smallest = position;

            if left < len && self.precedes(self.heap[left], self.heap[smallest]) {
                smallest = left;
            }
            if right < len && self.precedes(self.heap[right], self.heap[smallest]) {
                smallest = right;
            }
            if smallest == position {
                break;
            }
            self.heap.swap(position, smallest);
            position = smallest;
        }
    }
}

impl<'a, T, C: Clone> Clone for Selector<'a, T, C> {
    fn clone(&self) -> Self {
        Self {
            cursors: self.cursors.clone(),
            heap: self.heap.clone(),
            compare: self.compare.clone(),
        }
    }
}

/// Comparators are not compared: two selectors are equal when their cursors
/// sit at the same positions.
impl<'a, T, C> PartialEq for Selector<'a, T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cursors == other.cursors && self.heap == other.heap
    }
}

impl<'a, T, C> Eq for Selector<'a, T, C> {}

impl<'a, T, C> fmt::Debug for Selector<'a, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("cursors", &self.cursors)
            .field("heap", &self.heap)
            .finish()
    }
}
