//! Benchmarks for the notation engine and the offline renderer.
//!
//! Run with: cargo bench
//!
//! Parsing and scheduling run off the audio thread whenever a voice changes,
//! so they only need to keep an editor responsive. Rendering runs inside the
//! audio callback and must finish well within the block deadline.
//!
//! Reference timing at 48kHz sample rate:
//!   - 64 samples  = 1.33ms deadline
//!   - 512 samples = 10.67ms deadline
//!
//! Benchmark groups:
//!   - engine/parse     Notation text -> tokens
//!   - engine/schedule  Tokens -> envelopes, single voice and sessions
//!   - engine/render    Session -> samples

use criterion::{criterion_group, criterion_main};

mod engine;

/// Common buffer sizes used in audio applications.
pub const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512];

/// A bar of sixteenths with a dotted figure and a rest.
pub const PHRASE: &str = "E4/16 E4/16 D#4/8. A#4/16 _/16 C5/16 B4/16 A4/16 G#4/8 E4/8";

/// `PHRASE` repeated `bars` times.
pub fn melody(bars: usize) -> String {
    vec![PHRASE; bars].join(" ")
}

criterion_group!(
    benches,
    engine::bench_parse,
    engine::bench_schedule,
    engine::bench_render,
);
criterion_main!(benches);
