mod benchlib;

use criterion::{
    criterion_group, criterion_main, AxisScale, BatchSize, Bencher, BenchmarkId, Criterion,
    PlotConfiguration,
};
use seqops::{kway, search::{Bitap, ByteBitap}, sort, RadixConfig};

const SAMPLE_SIZE: usize = 16;

criterion_group!(benches,
    bench_kset_same_size,
    bench_semiintersect_threshold,
    bench_radix_sort,
    bench_bitap
);
criterion_main!(benches);

fn bench_kset_same_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("kway_same_size");
    group.sample_size(SAMPLE_SIZE);

    const SIZE: usize = 64 * 1000;

    for set_count in [2, 4, 8, 16] {
        let generator = || benchlib::uniform_sorted_seqs(0..i32::MAX / 2, SIZE, set_count);

        group.bench_with_input(BenchmarkId::new("merge", set_count), &set_count,
            |b, &_count| run_kset(b, generator, |sets| kway::merge(sets).count())
        );
        group.bench_with_input(BenchmarkId::new("union", set_count), &set_count,
            |b, &_count| run_kset(b, generator, |sets| kway::union(sets).count())
        );
        group.bench_with_input(BenchmarkId::new("intersect", set_count), &set_count,
            |b, &_count| run_kset(b, generator, |sets| kway::intersect(sets).count())
        );
        group.bench_with_input(BenchmarkId::new("symmetric_difference", set_count), &set_count,
            |b, &_count| run_kset(b, generator, |sets| kway::symmetric_difference(sets).count())
        );
    }
}

fn bench_semiintersect_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("semiintersect_threshold");
    group.sample_size(SAMPLE_SIZE);

    const SIZE: usize = 64 * 1000;
    const SET_COUNT: usize = 8;
    let generator = || benchlib::uniform_sorted_seqs(0..(SIZE * 4) as i32, SIZE, SET_COUNT);

    for threshold in 1..=SET_COUNT {
        group.bench_with_input(BenchmarkId::new("semiintersect", threshold), &threshold,
            |b, &threshold| run_kset(b, generator, |sets| {
                kway::semiintersect(sets, threshold).map_or(0, Iterator::count)
            })
        );
    }
}

fn bench_radix_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("radix_sort");
    group.sample_size(SAMPLE_SIZE);
    group.plot_config(
        PlotConfiguration::default().summary_scale(AxisScale::Logarithmic)
    );

    const K: usize = 1000;
    const SIZES: [usize; 5] = [K, 16 * K, 128 * K, 512 * K, 1024 * K];

    for size in SIZES {
        group.bench_with_input(BenchmarkId::new("std_sort", size), &size,
            |b, &size| b.iter_batched(
                || benchlib::uniform_keys(size),
                |mut keys| keys.sort(),
                BatchSize::LargeInput,
            )
        );

        for radix_bits in [8, 11, 16] {
            let config = RadixConfig::with_radix_bits(radix_bits);
            let name = format!("radix_{radix_bits}");
            group.bench_with_input(BenchmarkId::new(name, size), &size,
                |b, &size| b.iter_batched(
                    || {
                        let keys = benchlib::uniform_keys(size);
                        let buffer = keys.clone();
                        (keys, buffer)
                    },
                    |(mut keys, mut buffer)| {
                        sort::radix_sort_with(&mut keys, &mut buffer, |k| *k, &config)
                    },
                    BatchSize::LargeInput,
                )
            );
        }

        #[cfg(feature = "parallel")]
        group.bench_with_input(BenchmarkId::new("par_radix_8", size), &size,
            |b, &size| b.iter_batched(
                || benchlib::uniform_keys(size),
                |mut keys| sort::par_radix_sort_by_key(&mut keys, |k| *k, &RadixConfig::default()),
                BatchSize::LargeInput,
            )
        );
    }
}

fn bench_bitap(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitap");
    group.sample_size(SAMPLE_SIZE);

    const TEXT_LEN: usize = 1024 * 1000;
    let text = benchlib::random_text(TEXT_LEN, 4);

    for pattern_len in [4, 16, 64] {
        let pattern = benchlib::random_text(pattern_len, 4);
        let bitap: Bitap<u8> = Bitap::new(&pattern).expect("pattern fits a u64 register");
        let dense: ByteBitap = ByteBitap::new(&pattern).expect("pattern fits a u64 register");

        group.bench_with_input(BenchmarkId::new("bitap_u64", pattern_len), &pattern_len,
            |b, &_len| b.iter(|| bitap.matches(&text).count())
        );
        group.bench_with_input(BenchmarkId::new("byte_bitap_u64", pattern_len), &pattern_len,
            |b, &_len| b.iter(|| dense.matches(&text).count())
        );
        group.bench_with_input(BenchmarkId::new("naive", pattern_len), &pattern_len,
            |b, &len| b.iter(|| text.windows(len).filter(|w| *w == pattern.as_slice()).count())
        );
    }
}

fn run_kset<G, R>(b: &mut Bencher, generator: G, routine: R)
where
    G: Fn() -> Vec<Vec<i32>>,
    R: Fn(&[Vec<i32>]) -> usize,
{
    b.iter_batched_ref(
        generator,
        |sets| routine(sets.as_slice()),
        BatchSize::LargeInput,
    );
}
