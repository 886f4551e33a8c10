//! Lazy algebra over k already-sorted sequences.
//!
//! All engines read the inputs through cursors and yield references into
//! them; nothing is copied or buffered beyond one cursor per sequence.
//!
//! The heap ordering the cursors is internal; only the engines may move a
//! cursor it holds.
//!
//! ```compile_fail
//! use seqops::kway::selector::Selector;
//! ```

pub mod cursor;
pub(crate) mod selector;
mod merge;
mod union;
mod intersect;
mod semiintersect;
mod difference;
mod symmetric_difference;

pub use {
    merge::Merge,
    union::Union,
    intersect::Intersect,
    semiintersect::Semiintersect,
    difference::Difference,
    symmetric_difference::SymmetricDifference,
};

use crate::{
    compare::{Compare, Natural},
    error::Result,
    visitor::{VecWriter, Visitor},
};

fn slices<'a, T: 'a, S: AsRef<[T]>>(sets: &'a [S]) -> impl Iterator<Item = &'a [T]> {
    sets.iter().map(AsRef::as_ref)
}

pub fn merge<T: Ord, S: AsRef<[T]>>(sets: &[S]) -> Merge<'_, T, Natural> {
    Merge::new(slices(sets), Natural)
}

pub fn merge_by<T, S, C>(sets: &[S], compare: C) -> Merge<'_, T, C>
where
    S: AsRef<[T]>,
    C: Compare<T>,
{
    Merge::new(slices(sets), compare)
}

pub fn union<T: Ord, S: AsRef<[T]>>(sets: &[S]) -> Union<'_, T, Natural> {
    Union::new(slices(sets), Natural)
}

pub fn union_by<T, S, C>(sets: &[S], compare: C) -> Union<'_, T, C>
where
    S: AsRef<[T]>,
    C: Compare<T>,
{
    Union::new(slices(sets), compare)
}

pub fn intersect<T: Ord, S: AsRef<[T]>>(sets: &[S]) -> Intersect<'_, T, Natural> {
    Intersect::new(slices(sets), Natural)
}

pub fn intersect_by<T, S, C>(sets: &[S], compare: C) -> Intersect<'_, T, C>
where
    S: AsRef<[T]>,
    C: Compare<T>,
{
    Intersect::new(slices(sets), compare)
}

pub fn semiintersect<T: Ord, S: AsRef<[T]>>(
    sets: &[S],
    threshold: usize) -> Result<Semiintersect<'_, T, Natural>>
{
    Semiintersect::new(slices(sets), threshold, Natural)
}

pub fn semiintersect_by<T, S, C>(
    sets: &[S],
    threshold: usize,
    compare: C) -> Result<Semiintersect<'_, T, C>>
where
    S: AsRef<[T]>,
    C: Compare<T>,
{
    Semiintersect::new(slices(sets), threshold, compare)
}

pub fn symmetric_difference<T: Ord, S: AsRef<[T]>>(sets: &[S]) -> SymmetricDifference<'_, T, Natural> {
    SymmetricDifference::new(slices(sets), Natural)
}

pub fn symmetric_difference_by<T, S, C>(sets: &[S], compare: C) -> SymmetricDifference<'_, T, C>
where
    S: AsRef<[T]>,
    C: Compare<T>,
{
    SymmetricDifference::new(slices(sets), compare)
}

pub fn difference<'a, T: Ord>(minuend: &'a [T], subtrahend: &'a [T]) -> Difference<'a, T, Natural> {
    Difference::new(minuend, subtrahend, Natural)
}

pub fn difference_by<'a, T, C>(
    minuend: &'a [T],
    subtrahend: &'a [T],
    compare: C) -> Difference<'a, T, C>
where
    C: Compare<T>,
{
    Difference::new(minuend, subtrahend, compare)
}

/// Pushes every element of `engine` into `visitor`.
pub fn visit_all<'a, T, I, V>(engine: I, visitor: &mut V)
where
    T: 'a + Clone,
    I: Iterator<Item = &'a T>,
    V: Visitor<T>,
{
    for value in engine {
        visitor.visit(value.clone());
    }
}

pub type KSetFn<'a, T, I> = fn(sets: &'a [Vec<T>]) -> I;

/// Runs a k-set engine constructor and collects its output.
pub fn run_kset<'a, T, I>(sets: &'a [Vec<T>], engine: KSetFn<'a, T, I>) -> Vec<T>
where
    T: 'a + Clone,
    I: Iterator<Item = &'a T>,
{
    let mut writer: VecWriter<T> = VecWriter::new();
    visit_all(engine(sets), &mut writer);
    writer.into()
}
