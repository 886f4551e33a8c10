use std::collections::BTreeMap;

pub fn prop_sorted(result: &[i32]) -> bool {
    result.windows(2).all(|w| w[0] <= w[1])
}

pub fn prop_strictly_increasing(result: &[i32]) -> bool {
    result.windows(2).all(|w| w[0] < w[1])
}

pub fn counts(seq: &[i32]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for &value in seq {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

// Reference results, computed the slow and obvious way //

pub fn naive_merge(seqs: &[Vec<i32>]) -> Vec<i32> {
    let mut all: Vec<i32> = seqs.iter().flatten().copied().collect();
    all.sort();
    all
}

pub fn naive_union(seqs: &[Vec<i32>]) -> Vec<i32> {
    let mut most: BTreeMap<i32, usize> = BTreeMap::new();
    for seq in seqs {
        for (value, count) in counts(seq) {
            let entry = most.entry(value).or_insert(0);
            *entry = (*entry).max(count);
        }
    }

    most.into_iter()
        .flat_map(|(value, count)| std::iter::repeat(value).take(count))
        .collect()
}

/// Distinct values contained in at least `threshold` sequences.
pub fn naive_semiintersect(seqs: &[Vec<i32>], threshold: usize) -> Vec<i32> {
    let mut holders: BTreeMap<i32, usize> = BTreeMap::new();
    for seq in seqs {
        for value in counts(seq).into_keys() {
            *holders.entry(value).or_insert(0) += 1;
        }
    }

    holders.into_iter()
        .filter(|&(_, count)| count >= threshold)
        .map(|(value, _)| value)
        .collect()
}

/// Every value held by all sequences, as often as the sequence holding the
/// fewest copies.
pub fn naive_intersect(seqs: &[Vec<i32>]) -> Vec<i32> {
    let Some((first, rest)) = seqs.split_first() else {
        return Vec::new();
    };

    let mut least = counts(first);
    for seq in rest {
        let held = counts(seq);
        least.retain(|value, count| match held.get(value) {
            Some(&other) => {
                *count = (*count).min(other);
                true
            }
            None => false,
        });
    }

    least.into_iter()
        .flat_map(|(value, count)| std::iter::repeat(value).take(count))
        .collect()
}

/// The j-th copy of a value is kept when an odd number of sequences hold
/// at least j copies of it.
pub fn naive_symmetric_difference(seqs: &[Vec<i32>]) -> Vec<i32> {
    let per_seq: Vec<BTreeMap<i32, usize>> = seqs.iter().map(|seq| counts(seq)).collect();
    let mut result = Vec::new();
    for value in naive_semiintersect(seqs, 1) {
        let most = per_seq.iter().filter_map(|c| c.get(&value)).max().copied().unwrap_or(0);
        for level in 1..=most {
            let holders = per_seq.iter()
                .filter(|c| c.get(&value).map_or(false, |&n| n >= level))
                .count();
            if holders % 2 == 1 {
                result.push(value);
            }
        }
    }
    result
}

pub fn naive_difference(minuend: &[i32], subtrahend: &[i32]) -> Vec<i32> {
    let mut cancel = counts(subtrahend);
    let mut result = Vec::new();
    for &value in minuend {
        match cancel.get_mut(&value) {
            Some(count) if *count > 0 => *count -= 1,
            _ => result.push(value),
        }
    }
    result
}

pub fn naive_matches<T: PartialEq>(pattern: &[T], text: &[T]) -> Vec<usize> {
    if pattern.is_empty() || pattern.len() > text.len() {
        return Vec::new();
    }
    text.windows(pattern.len())
        .enumerate()
        .filter(|(_, window)| *window == pattern)
        .map(|(start, _)| start)
        .collect()
}
