//! Least-significant-digit radix sort.
//!
//! Every pass is a stable counting sort by one digit of the key, ping-ponging
//! between the input and a scratch buffer of equal length. Passes run from
//! the lowest digit up to the highest digit in which any two keys differ, so
//! the result is ordered by the full key and stable for equal keys. A pass
//! whose digit is the same for every element only counts; it moves nothing.

use num::{PrimInt, Unsigned};
use tracing::{debug, trace};

use crate::{
    config::RadixConfig,
    error::{Error, Result},
};
use super::counting::{bucket_offsets, is_single_bucket, scatter};

/// Order-preserving map of a value onto an unsigned integer key.
///
/// Signed integers flip their sign bit, so `i32::MIN` maps to 0 and
/// `i32::MAX` to `u32::MAX`.
pub trait OrderedKey {
    type Key: PrimInt + Unsigned;

    fn ordered_key(&self) -> Self::Key;
}

macro_rules! ordered_unsigned {
    ($($t:ty),*) => {$(
        impl OrderedKey for $t {
            type Key = $t;

            #[inline]
            fn ordered_key(&self) -> $t {
                *self
            }
        }
    )*};
}

macro_rules! ordered_signed {
    ($($t:ty => $u:ty),*) => {$(
        impl OrderedKey for $t {
            type Key = $u;

            #[inline]
            fn ordered_key(&self) -> $u {
                (*self as $u) ^ (1 << (<$u>::BITS - 1))
            }
        }
    )*};
}

ordered_unsigned!(u8, u16, u32, u64, u128, usize);
ordered_signed!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);

/// Sorts integers in ascending order.
pub fn radix_sort<T>(values: &mut [T])
where
    T: OrderedKey + Clone,
{
    radix_sort_by_key(values, T::ordered_key);
}

/// Sorts by an unsigned key with the default base-256 digits, allocating
/// its own scratch buffer.
pub fn radix_sort_by_key<T, K, F>(values: &mut [T], key: F)
where
    T: Clone,
    K: PrimInt + Unsigned,
    F: Fn(&T) -> K,
{
    let mut buffer = values.to_vec();
    lsd_sort(values, &mut buffer, &key, RadixConfig::default().radix_bits);
}

/// Sorts by an unsigned key using a caller-provided scratch buffer.
///
/// The buffer's contents on return are unspecified.
pub fn radix_sort_with<T, K, F>(
    values: &mut [T],
    buffer: &mut [T],
    key: F,
    config: &RadixConfig) -> Result<()>
where
    T: Clone,
    K: PrimInt + Unsigned,
    F: Fn(&T) -> K,
{
    config.validate()?;
    if buffer.len() != values.len() {
        return Err(Error::BufferMismatch {
            input: values.len(),
            buffer: buffer.len(),
        });
    }

    lsd_sort(values, buffer, &key, config.radix_bits);
    Ok(())
}

/// Parallel variant: one most-significant-digit partition pass, then every
/// bucket is finished independently on the rayon pool.
///
/// Buckets are disjoint slices, so workers share no mutable state, and the
/// call returns only once all of them are done.
#[cfg(feature = "parallel")]
pub fn par_radix_sort_by_key<T, K, F>(values: &mut [T], key: F, config: &RadixConfig) -> Result<()>
where
    T: Clone + Send,
    K: PrimInt + Unsigned,
    F: Fn(&T) -> K + Sync,
{
    use rayon::prelude::*;
    use super::counting::counting_sort_by_key;

    config.validate()?;
    let bits = config.radix_bits;
    let mut buffer = values.to_vec();

    if values.len() < config.parallel_min_len {
        lsd_sort(values, &mut buffer, &key, bits);
        return Ok(());
    }

    let Some(passes) = plan_passes(values, &key, bits) else {
        return Ok(());
    };
    if passes == 1 {
        lsd_passes(values, &mut buffer, &key, bits, 1);
        return Ok(());
    }

    let top = passes - 1;
    let mask = digit_mask::<K>(bits);
    let offsets = counting_sort_by_key(values, &mut buffer, config.buckets(), |item| {
        digit(key(item), top * bits, mask)
    });
    debug!(len = values.len(), passes, radix_bits = bits, "radix sort partitioned by top digit");

    let mut ranges = Vec::with_capacity(config.buckets());
    let mut rest_values = values;
    let mut rest_buffer = buffer.as_mut_slice();
    for bounds in offsets.windows(2) {
        let len = bounds[1] - bounds[0];
        let (bucket_values, tail_values) = std::mem::take(&mut rest_values).split_at_mut(len);
        let (bucket_buffer, tail_buffer) = std::mem::take(&mut rest_buffer).split_at_mut(len);
        rest_values = tail_values;
        rest_buffer = tail_buffer;

        if len > 0 {
            ranges.push((bucket_values, bucket_buffer));
        }
    }

    ranges.into_par_iter().for_each(|(bucket_values, bucket_buffer)| {
        bucket_values.clone_from_slice(bucket_buffer);
        lsd_passes(bucket_values, bucket_buffer, &key, bits, top);
    });
    Ok(())
}

fn lsd_sort<T, K, F>(values: &mut [T], buffer: &mut [T], key: &F, bits: u32)
where
    T: Clone,
    K: PrimInt + Unsigned,
    F: Fn(&T) -> K,
{
    let Some(passes) = plan_passes(values, key, bits) else {
        return;
    };

    trace!(len = values.len(), passes, radix_bits = bits, "radix sort");
    lsd_passes(values, buffer, key, bits, passes);
}

/// Runs the lowest `passes` digit passes. The result always ends up in
/// `values`.
fn lsd_passes<T, K, F>(values: &mut [T], buffer: &mut [T], key: &F, bits: u32, passes: u32)
where
    T: Clone,
    K: PrimInt + Unsigned,
    F: Fn(&T) -> K,
{
    let buckets = 1usize << bits;
    let mask = digit_mask::<K>(bits);
    let mut sorted_in_values = true;

    for pass in 0..passes {
        let shift = pass * bits;
        let by_digit = |item: &T| digit(key(item), shift, mask);

        let (src, dst) = if sorted_in_values {
            (&*values, &mut *buffer)
        } else {
            (&*buffer, &mut *values)
        };

        let offsets = bucket_offsets(src, buckets, &by_digit);
        if is_single_bucket(&offsets) {
            continue;
        }
        scatter(src, dst, &offsets, &by_digit);
        sorted_in_values = !sorted_in_values;
    }

    if !sorted_in_values {
        values.clone_from_slice(buffer);
    }
}

/// Number of digit passes needed: the digits up to the highest bit in which
/// any key differs from the first, at least one. `None` for empty input.
fn plan_passes<T, K, F>(values: &[T], key: &F, bits: u32) -> Option<u32>
where
    K: PrimInt + Unsigned,
    F: Fn(&T) -> K,
{
    let first = key(values.first()?);
    let spread = values
        .iter()
        .fold(K::zero(), |spread, item| spread | (key(item) ^ first));
    Some(pass_count(spread, bits))
}

/// Number of digits in `spread`, at least one.
fn pass_count<K: PrimInt>(spread: K, bits: u32) -> u32 {
    let width = K::zero().count_zeros();
    let significant = width - spread.leading_zeros();
    significant.div_ceil(bits).max(1)
}

fn digit_mask<K: PrimInt>(bits: u32) -> K {
    let width = K::zero().count_zeros();
    K::max_value() >> (width - bits.min(width)) as usize
}

#[inline]
fn digit<K: PrimInt>(key: K, shift: u32, mask: K) -> usize {
    ((key >> shift as usize) & mask).to_usize().unwrap_or(0)
}
