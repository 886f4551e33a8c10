use std::cmp::Ordering;

/// Three-way comparator inducing a strict weak ordering on `T`.
///
/// Every engine in this crate is parameterised by one. Violating strict weak
/// ordering, or feeding sequences not sorted under the same comparator, is
/// not detected and yields unspecified (but memory safe) output.
pub trait Compare<T: ?Sized> {
    fn compare(&self, a: &T, b: &T) -> Ordering;

    #[inline]
    fn less(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl<T, F> Compare<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// Ascending order given by `Ord`. The default comparator of every engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Compare<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Inverts the wrapped comparator. `Reversed(Natural)` is "greater".
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Reversed<C>(pub C);

impl<T, C> Compare<T> for Reversed<C>
where
    T: ?Sized,
    C: Compare<T>,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Returns true if `items` is sorted (non-decreasing) under `compare`.
pub fn is_sorted_by<T, C: Compare<T>>(items: &[T], compare: &C) -> bool {
    items.windows(2).all(|w| !compare.less(&w[1], &w[0]))
}
