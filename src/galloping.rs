//! Exponential search over sorted slices.
//!
//! Cursors skip forward through their sequence with these rather than one
//! element at a time, so jumping a distance `d` costs O(log d) comparisons.

use crate::compare::Compare;

/// Index of the first element of `set` not less than `target`.
pub fn galloping_lower_bound<T, C>(set: &[T], target: &T, compare: &C) -> usize
where
    C: Compare<T>,
{
    gallop(set, |item| compare.less(item, target))
}

/// Index of the first element of `set` greater than `target`.
pub fn galloping_upper_bound<T, C>(set: &[T], target: &T, compare: &C) -> usize
where
    C: Compare<T>,
{
    gallop(set, |item| !compare.less(target, item))
}

/// Finds the partition point of `set` for a predicate that holds on a prefix.
fn gallop<T, P>(set: &[T], before: P) -> usize
where
    P: Fn(&T) -> bool,
{
    if set.is_empty() || !before(&set[0]) {
        return 0;
    }

    // `before(set[base])` holds, `before(set[base + offset])` does not (or
    // it is out of range).
    let mut base = 0;
    let mut offset = 1;

    while base + offset < set.len() && before(&set[base + offset]) {
        base += offset;
        offset *= 2;
    }

    let hi = (base + offset).min(set.len());
    binary_search(set, base + 1, hi, before)
}

/// Plain binary search for the partition point within `set[lo..hi]`.
pub fn binary_search<T, P>(set: &[T], mut lo: usize, mut hi: usize, before: P) -> usize
where
    P: Fn(&T) -> bool,
{
    while lo < hi {
        let mid = lo + (hi - lo) / 2;

        if before(&set[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
