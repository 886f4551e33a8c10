//! Bitap (shift-and) exact pattern search.
//!
//! The automaton keeps one register bit per pattern position. Bit `j` is set
//! when the last `j + 1` symbols read equal the first `j + 1` symbols of the
//! pattern, so a match ends wherever the top bit `len - 1` comes up. Each
//! symbol costs one shift, one or and one and, whatever the pattern length.

use std::{collections::BTreeMap, fmt, iter::FusedIterator, marker::PhantomData, sync::Arc};

use num::PrimInt;
use tracing::debug;

use crate::error::{Error, Result};

/// Symbol to position-mask lookup: bit `j` of `mask(s)` is set iff
/// `pattern[j] == s`. Symbols absent from the pattern map to zero.
pub trait MaskTable<T, M> {
    /// Builds the table for a non-empty pattern no longer than the width
    /// of `M`.
    fn build(pattern: &[T]) -> Self;

    fn mask(&self, symbol: &T) -> M;

    /// Number of distinct symbols in the pattern.
    fn symbols(&self) -> usize;
}

/// Ordered map holding only the pattern's symbols. Works for any `Ord`
/// alphabet; a lookup is `O(log σ)` in the pattern's alphabet size.
pub struct SparseMasks<T, M> {
    masks: BTreeMap<T, M>,
}

impl<T, M> MaskTable<T, M> for SparseMasks<T, M>
where
    T: Ord + Clone,
    M: PrimInt,
{
    fn build(pattern: &[T]) -> Self {
        let mut masks = BTreeMap::new();
        let mut position = M::one();
        for symbol in pattern {
            let mask = masks.entry(symbol.clone()).or_insert_with(M::zero);
            *mask = *mask | position;
            position = position << 1;
        }
        Self { masks }
    }

    #[inline]
    fn mask(&self, symbol: &T) -> M {
        self.masks.get(symbol).copied().unwrap_or_else(M::zero)
    }

    fn symbols(&self) -> usize {
        self.masks.len()
    }
}

/// Dense table indexed by byte value: constant-time lookup.
pub struct ByteMasks<M> {
    masks: [M; 256],
}

impl<M: PrimInt> MaskTable<u8, M> for ByteMasks<M> {
    fn build(pattern: &[u8]) -> Self {
        let mut masks = [M::zero(); 256];
        let mut position = M::one();
        for &byte in pattern {
            masks[byte as usize] = masks[byte as usize] | position;
            position = position << 1;
        }
        Self { masks }
    }

    #[inline]
    fn mask(&self, symbol: &u8) -> M {
        self.masks[*symbol as usize]
    }

    fn symbols(&self) -> usize {
        self.masks.iter().filter(|mask| !mask.is_zero()).count()
    }
}

/// Compiled search pattern. `M` is the register type and bounds the pattern
/// length by its bit width (`u64` by default, `u128` for up to 128 symbols).
/// `S` is the mask table; byte text is best served by [ByteBitap].
///
/// Cloning is cheap: the mask table is shared.
pub struct Bitap<T, M = u64, S = SparseMasks<T, M>> {
    table: Arc<S>,
    len: usize,
    symbol: PhantomData<fn(&T) -> M>,
}

/// Bitap over bytes with a dense 256-entry mask table.
pub type ByteBitap<M = u64> = Bitap<u8, M, ByteMasks<M>>;

impl<T, M, S> Bitap<T, M, S>
where
    M: PrimInt,
    S: MaskTable<T, M>,
{
    /// Fails if `pattern` is empty or longer than the register width.
    pub fn new(pattern: &[T]) -> Result<Self> {
        let width = Self::width();
        if pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }
        if pattern.len() > width as usize {
            return Err(Error::PatternTooLong { len: pattern.len(), width });
        }

        let table = S::build(pattern);
        debug!(len = pattern.len(), width, symbols = table.symbols(), "bitap automaton built");
        Ok(Self {
            table: Arc::new(table),
            len: pattern.len(),
            symbol: PhantomData,
        })
    }

    /// Register width in bits, the longest pattern this automaton accepts.
    pub fn width() -> u32 {
        M::zero().count_zeros()
    }

    pub fn pattern_len(&self) -> usize {
        self.len
    }

    #[inline]
    fn match_bit(&self) -> M {
        M::one() << (self.len - 1)
    }

    /// One automaton step: shift in a fresh candidate, keep only the
    /// positions `symbol` continues.
    #[inline]
    fn step(&self, register: M, symbol: &T) -> M {
        ((register << 1) | M::one()) & self.table.mask(symbol)
    }

    /// Start positions of every (possibly overlapping) occurrence.
    pub fn matches<'t>(&self, text: &'t [T]) -> Matches<'t, T, M, S> {
        self.matches_from(text, 0)
    }

    /// Occurrences starting at or after `start`.
    pub fn matches_from<'t>(&self, text: &'t [T], start: usize) -> Matches<'t, T, M, S> {
        Matches {
            bitap: self.clone(),
            text,
            position: start.min(text.len()),
            register: M::zero(),
        }
    }

    pub fn find(&self, text: &[T]) -> Option<usize> {
        self.matches(text).next()
    }

    pub fn find_from(&self, text: &[T], start: usize) -> Option<usize> {
        self.matches_from(text, start).next()
    }
}

impl<T, M, S> Clone for Bitap<T, M, S> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            len: self.len,
            symbol: PhantomData,
        }
    }
}

impl<T, M, S: MaskTable<T, M>> fmt::Debug for Bitap<T, M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitap")
            .field("pattern_len", &self.len)
            .field("symbols", &self.table.symbols())
            .finish()
    }
}

/// Lazy sequence of match start positions within one text.
///
/// Each copy owns its register, so advancing one never disturbs another.
pub struct Matches<'t, T, M = u64, S = SparseMasks<T, M>> {
    bitap: Bitap<T, M, S>,
    text: &'t [T],
    // Next text index to read.
    position: usize,
    register: M,
}

impl<'t, T, M, S> Matches<'t, T, M, S>
where
    M: PrimInt,
    S: MaskTable<T, M>,
{
    /// Terminal state for `text`.
    pub fn end(bitap: &Bitap<T, M, S>, text: &'t [T]) -> Self {
        Self {
            bitap: bitap.clone(),
            text,
            position: text.len(),
            register: M::zero(),
        }
    }

    pub fn to_end(&self) -> Self {
        Self::end(&self.bitap, self.text)
    }

    /// Repositions the search at `offset`, rebuilding the register from the
    /// `len - 1` symbols before it. Every match ending at or after `offset`
    /// is reported, including ones that start before it.
    pub fn seek(&mut self, offset: usize) {
        let offset = offset.min(self.text.len());
        let window = offset.saturating_sub(self.bitap.pattern_len() - 1);

        self.register = self.text[window..offset]
            .iter()
            .fold(M::zero(), |register, symbol| self.bitap.step(register, symbol));
        self.position = offset;
    }

    /// Index of the next symbol to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.position == self.text.len() && self.register.is_zero()
    }
}

impl<'t, T, M, S> Iterator for Matches<'t, T, M, S>
where
    M: PrimInt,
    S: MaskTable<T, M>,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let len = self.bitap.pattern_len();
        let match_bit = self.bitap.match_bit();

        while let Some(symbol) = self.text.get(self.position) {
            self.register = self.bitap.step(self.register, symbol);
            self.position += 1;

            if !(self.register & match_bit).is_zero() {
                return Some(self.position - len);
            }
        }

        self.register = M::zero();
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.text.len() - self.position))
    }
}

impl<'t, T, M: PrimInt, S: MaskTable<T, M>> FusedIterator for Matches<'t, T, M, S> {}

impl<'t, T, M: Copy, S> Clone for Matches<'t, T, M, S> {
    fn clone(&self) -> Self {
        Self {
            bitap: self.bitap.clone(),
            text: self.text,
            position: self.position,
            register: self.register,
        }
    }
}

impl<'t, T, M: PartialEq, S> PartialEq for Matches<'t, T, M, S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.text, other.text)
            && self.position == other.position
            && self.register == other.register
    }
}

impl<'t, T, M: fmt::Debug, S> fmt::Debug for Matches<'t, T, M, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matches")
            .field("position", &self.position)
            .field("register", &self.register)
            .finish()
    }
}
