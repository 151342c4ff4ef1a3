use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/*
Oscillator Shapes
=================

Every voice plays all of its notes with one waveform.

Sine: a single frequency with no harmonics.
  - Sound: Smooth, hollow, flute-like

Sawtooth: all harmonics, amplitude falling off as 1/n.
  - Sound: Bright, buzzy, brassy

Square: odd harmonics only, falling off as 1/n.
  - Sound: Hollow, woody, clarinet-like

Triangle: odd harmonics only, falling off as 1/n².
  - Sound: Soft, between sine and square

The schedule only names the shape; a backend decides how to synthesize it.
`Waveform::sample` is the naive (non band-limited) shape used by the
reference renderer, taking the phase in cycles so callers never deal with
radians:

    phase 0.0 ──────── 0.25 ──────── 0.5 ──────── 0.75 ──────── 1.0
    sine      0         1             0           -1            0
    sawtooth  0         0.5          ±1           -0.5          0
    square    1         1            -1           -1            1
    triangle  0         1             0           -1            0
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Waveform {
    #[default]
    Sine,
    Sawtooth,
    Square,
    Triangle,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sine,
        Waveform::Sawtooth,
        Waveform::Square,
        Waveform::Triangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Sawtooth => "sawtooth",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
        }
    }

    /// Value of the shape at `phase` cycles, in [-1, 1].
    pub fn sample(self, phase: f64) -> f32 {
        let phase = phase.rem_euclid(1.0);
        let value = match self {
            Waveform::Sine => (std::f64::consts::TAU * phase).sin(),
            Waveform::Sawtooth => {
                if phase < 0.5 {
                    2.0 * phase
                } else {
                    2.0 * phase - 2.0
                }
            }
            Waveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
        };
        value as f32
    }
}

impl std::fmt::Display for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Waveform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Waveform::ALL
            .iter()
            .copied()
            .find(|w| w.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownWaveform(s.to_string()))
    }
}
