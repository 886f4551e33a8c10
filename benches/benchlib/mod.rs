use std::ops::Range;

use rand::{distributions::Uniform, prelude::Distribution, thread_rng, Rng};

/// Sorted sequence of `len` values drawn uniformly from `range`, duplicates
/// allowed.
pub fn uniform_sorted_seq(range: Range<i32>, len: usize) -> Vec<i32> {
    let rng = &mut thread_rng();
    let dist = Uniform::from(range);

    let mut seq: Vec<i32> = (0..len).map(|_| dist.sample(rng)).collect();
    seq.sort_unstable();
    seq
}

pub fn uniform_sorted_seqs(range: Range<i32>, len: usize, count: usize) -> Vec<Vec<i32>> {
    (0..count).map(|_| uniform_sorted_seq(range.clone(), len)).collect()
}

pub fn uniform_keys(len: usize) -> Vec<u64> {
    let rng = &mut thread_rng();
    (0..len).map(|_| rng.gen()).collect()
}

/// Text over a `alphabet`-letter alphabet, starting at `b'a'`.
pub fn random_text(len: usize, alphabet: u8) -> Vec<u8> {
    let rng = &mut thread_rng();
    (0..len).map(|_| b'a' + rng.gen_range(0..alphabet)).collect()
}
