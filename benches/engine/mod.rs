//! Benchmarks for the notation-to-playback pipeline.

mod parse;
mod render;
mod schedule;

pub use parse::bench_parse;
pub use render::bench_render;
pub use schedule::bench_schedule;
