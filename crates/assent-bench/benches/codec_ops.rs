//! Criterion micro-benchmarks for combined-step encode and decode.

use std::hint::black_box;

use assent_bench::random_records;
use assent_codec::{combined_capacity, decode, encode, CombinedStep};
use criterion::{criterion_group, criterion_main, Criterion};

/// Benchmark: encode 16 participants x 32 octets.
fn bench_encode_16x32(c: &mut Criterion) {
    let record = random_records(1, 1, 16, 32).remove(0);
    let step: CombinedStep<'_> = decode(&record).unwrap();
    let mut buf = vec![0u8; combined_capacity(16, 32)];

    c.bench_function("codec_encode_16x32", |b| {
        b.iter(|| {
            let n = encode(black_box(&step.participants), &mut buf).unwrap();
            black_box(n);
        });
    });
}

/// Benchmark: decode 16 participants x 32 octets.
fn bench_decode_16x32(c: &mut Criterion) {
    let record = random_records(2, 1, 16, 32).remove(0);

    c.bench_function("codec_decode_16x32", |b| {
        b.iter(|| {
            let step = decode(black_box(&record)).unwrap();
            black_box(step.participant_count());
        });
    });
}

/// Benchmark: decode the widest step the wire format allows.
fn bench_decode_255x8(c: &mut Criterion) {
    let record = random_records(3, 1, 255, 8).remove(0);

    c.bench_function("codec_decode_255x8", |b| {
        b.iter(|| {
            let step = decode(black_box(&record)).unwrap();
            black_box(step.participant_count());
        });
    });
}

criterion_group!(
    benches,
    bench_encode_16x32,
    bench_decode_16x32,
    bench_decode_255x8
);
criterion_main!(benches);
