//! Benchmarks for the offline renderer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use spn_player::playback::Renderer;
use spn_player::schedule::{build_session, Voice, Waveform};

use crate::{melody, BLOCK_SIZES};

const SAMPLE_RATE: f64 = 48_000.0;

pub fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/render");

    for voices in [1usize, 4] {
        let session = build_session(
            &(0..voices)
                .map(|i| Voice::new(melody(64)).waveform(Waveform::ALL[i % Waveform::ALL.len()]))
                .collect::<Vec<_>>(),
        )
        .unwrap();

        for &size in BLOCK_SIZES {
            let mut renderer = Renderer::new(&session, SAMPLE_RATE);
            let mut output = vec![0.0f32; size];

            group.bench_with_input(
                BenchmarkId::new(format!("{voices}_voices"), size),
                &size,
                |b, _| {
                    b.iter(|| {
                        // Start over rather than measure trailing silence
                        if renderer.is_finished() {
                            renderer = Renderer::new(&session, SAMPLE_RATE);
                        }
                        renderer.render_block(black_box(&mut output))
                    })
                },
            );
        }
    }

    group.finish();
}
