pub mod properties;

use quickcheck::{Arbitrary, Gen};
use seqops::visitor::Visitor;

// Values are drawn from a narrow domain so that sequences overlap and carry
// duplicate runs.
const DOMAIN: u8 = 32;

fn small_value(g: &mut Gen) -> i32 {
    (u8::arbitrary(g) % DOMAIN) as i32
}

fn vec_of_len<T>(len: usize, g: &mut Gen, item: impl Fn(&mut Gen) -> T) -> Vec<T> {
    (0..len).map(|_| item(g)).collect()
}

// Arbitrary Sorted Sequence //
#[derive(Debug, Clone)]
pub struct SortedSeq(Vec<i32>);

impl SortedSeq {
    pub fn from_unsorted(mut vec: Vec<i32>) -> Self {
        vec.sort_unstable();
        Self(vec)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<i32> {
        self.0
    }
}

impl From<SortedSeq> for Vec<i32> {
    fn from(value: SortedSeq) -> Self {
        value.into_inner()
    }
}

impl Arbitrary for SortedSeq {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 24;
        Self::from_unsorted(vec_of_len(len, g, small_value))
    }
}

// Arbitrary Collection of Sorted Sequences //
#[derive(Clone, Debug)]
pub struct SeqCollection {
    seqs: Vec<Vec<i32>>,
}

impl SeqCollection {
    pub fn as_slice(&self) -> &[Vec<i32>] {
        self.seqs.as_slice()
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }
}

impl Arbitrary for SeqCollection {
    fn arbitrary(g: &mut Gen) -> Self {
        let seq_count = usize::arbitrary(g) % 5 + 1;

        // A shared core keeps intersections from being empty most of the
        // time.
        let mutual_len = usize::arbitrary(g) % 6;
        let mutual = vec_of_len(mutual_len, g, small_value);

        let seqs = (0..seq_count)
            .map(|_| {
                let len = usize::arbitrary(g) % 20;
                let mut seq = vec_of_len(len, g, small_value);
                seq.extend(&mutual);
                SortedSeq::from_unsorted(seq).into_inner()
            })
            .collect();

        Self { seqs }
    }
}

// Arbitrary Keyed Items for Sort Stability //
#[derive(Clone, Debug)]
pub struct KeyedItems(pub Vec<(u32, usize)>);

impl Arbitrary for KeyedItems {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % 64;
        // Alternate between a narrow and the full key domain.
        let narrow = bool::arbitrary(g);

        let items = (0..len)
            .map(|tag| {
                let key = if narrow {
                    u32::arbitrary(g) % 8
                } else {
                    u32::arbitrary(g)
                };
                (key, tag)
            })
            .collect();

        Self(items)
    }
}

// Arbitrary Pattern and Text over a Small Alphabet //
#[derive(Clone, Debug)]
pub struct PatternText {
    pub pattern: Vec<u8>,
    pub text: Vec<u8>,
}

impl Arbitrary for PatternText {
    fn arbitrary(g: &mut Gen) -> Self {
        let letter = |g: &mut Gen| b'a' + u8::arbitrary(g) % 3;

        let pattern_len = usize::arbitrary(g) % 6 + 1;
        let text_len = usize::arbitrary(g) % 80;

        Self {
            pattern: vec_of_len(pattern_len, g, letter),
            text: vec_of_len(text_len, g, letter),
        }
    }
}

// Visitor asserting the values it receives match an expected sequence //
pub struct EnsureVisitor<'a, T>
where
    T: PartialEq,
{
    expected: &'a [T],
    position: usize,
}

impl<'a, T> EnsureVisitor<'a, T>
where
    T: PartialEq,
{
    pub fn position(&self) -> usize {
        self.position
    }
}

impl<'a, T> From<&'a [T]> for EnsureVisitor<'a, T>
where
    T: PartialEq,
{
    fn from(expected: &'a [T]) -> Self {
        Self {
            expected,
            position: 0,
        }
    }
}

impl<'a, T> Visitor<T> for EnsureVisitor<'a, T>
where
    T: PartialEq + std::fmt::Debug,
{
    fn visit(&mut self, value: T) {
        assert_eq!(value, self.expected[self.position]);
        self.position += 1;
    }
}
