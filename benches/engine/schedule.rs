//! Benchmarks for schedule building.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use spn_player::notation::parse_resolved;
use spn_player::schedule::{build_schedule, build_session, Adsr, Voice, Waveform};

use crate::melody;

pub fn bench_schedule(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/schedule");
    let adsr = Adsr::new(0.01, 0.44, 0.01, 0.3);

    for bars in [1usize, 16, 256] {
        let notes = parse_resolved(&melody(bars)).unwrap();
        group.bench_with_input(BenchmarkId::new("voice", bars), &notes, |b, notes| {
            b.iter(|| build_schedule(black_box(notes), 100.0, &adsr, Waveform::Sine))
        });
    }

    // Full recompute as an editor would do after every keystroke
    for voices in [1usize, 4, 8] {
        let session: Vec<Voice> = (0..voices)
            .map(|i| Voice::new(melody(16)).bpm(80.0 + 20.0 * i as f64).adsr(adsr))
            .collect();
        group.bench_with_input(BenchmarkId::new("session", voices), &session, |b, session| {
            b.iter(|| build_session(black_box(session)))
        });
    }

    group.finish();
}
