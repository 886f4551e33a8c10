/// Stable counting sort of `src` into `dst` by a bucket index in
/// `[0, buckets)`.
///
/// Returns the start offset of every bucket in `dst`, plus a final entry
/// equal to `src.len()`. Elements sharing a bucket keep their relative
/// order from `src`.
pub fn counting_sort_by_key<T, F>(src: &[T], dst: &mut [T], buckets: usize, key: F) -> Vec<usize>
where
    T: Clone,
    F: Fn(&T) -> usize,
{
    let offsets = bucket_offsets(src, buckets, &key);
    scatter(src, dst, &offsets, &key);
    offsets
}

/// Histogram pass: start offset of every bucket, plus `src.len()`.
pub(crate) fn bucket_offsets<T, F>(src: &[T], buckets: usize, key: &F) -> Vec<usize>
where
    F: Fn(&T) -> usize,
{
    // counts[b + 1] is the size of bucket b; the prefix sum turns it into
    // the start of bucket b + 1.
    let mut offsets = vec![0usize; buckets + 1];
    for item in src {
        offsets[key(item) + 1] += 1;
    }
    for bucket in 1..=buckets {
        offsets[bucket] += offsets[bucket - 1];
    }
    offsets
}

/// True when a single bucket received every element, so scattering would
/// leave the order unchanged.
pub(crate) fn is_single_bucket(offsets: &[usize]) -> bool {
    let total = offsets.last().copied().unwrap_or(0);
    offsets.windows(2).any(|w| w[1] - w[0] == total)
}

pub(crate) fn scatter<T, F>(src: &[T], dst: &mut [T], offsets: &[usize], key: &F)
where
    T: Clone,
    F: Fn(&T) -> usize,
{
    assert_eq!(src.len(), dst.len());

    let mut next = offsets.to_vec();
    for item in src {
        let slot = &mut next[key(item)];
        dst[*slot] = item.clone();
        *slot += 1;
    }
}
