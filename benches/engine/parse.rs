//! Benchmarks for notation parsing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput};
use spn_player::notation::{parse, parse_resolved};

use crate::melody;

pub fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/parse");

    for bars in [1usize, 16, 256] {
        let text = melody(bars);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(BenchmarkId::new("tokens", bars), &text, |b, text| {
            b.iter(|| parse(black_box(text)))
        });

        group.bench_with_input(BenchmarkId::new("resolved", bars), &text, |b, text| {
            b.iter(|| parse_resolved(black_box(text)))
        });
    }

    group.finish();
}
