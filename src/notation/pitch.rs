use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/*
Pitch Resolution
================

Pitches are written in scientific pitch notation: a letter, an optional
sharp, and an octave number. Only sharps are spelled; there are no flats.

    C4   = middle C
    C#4  = one semitone above middle C
    A4   = 440 Hz tuning reference

Every pitch is resolved by counting semitones from the reference A4:

    distance  = (index(pitch) - index(A)) + 12 * (octave - 4)
    frequency = 440 * 2^(distance / 12)

where index comes from the chromatic table starting at C:

    C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

The result is rounded to two decimals (cents of a Hz), so C4 resolves to
261.63 and A4 to exactly 440.00. This is plain 12-tone equal temperament;
no other tuning systems are supported.
*/

/// Frequency of the tuning reference A4.
pub const REFERENCE_FREQUENCY: f64 = 440.0;
/// Octave of the tuning reference.
pub const REFERENCE_OCTAVE: i32 = 4;

const SEMITONES_PER_OCTAVE: i64 = 12;

/// One of the twelve chromatic pitch classes, spelled with sharps.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    DSharp,
    E,
    F,
    FSharp,
    G,
    GSharp,
    A,
    ASharp,
    B,
}

impl PitchClass {
    /// Chromatic table, index 0 = C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Position in the chromatic table (C=0, C#=1, ..., B=11)
    pub fn index(self) -> u8 {
        match self {
            PitchClass::C => 0,
            PitchClass::CSharp => 1,
            PitchClass::D => 2,
            PitchClass::DSharp => 3,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::FSharp => 6,
            PitchClass::G => 7,
            PitchClass::GSharp => 8,
            PitchClass::A => 9,
            PitchClass::ASharp => 10,
            PitchClass::B => 11,
        }
    }

    /// Notation spelling, e.g. "C#".
    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// Signed semitone distance from A4 to this pitch class in `octave`.
    pub fn distance_from_reference(self, octave: i32) -> i64 {
        let class_distance = self.index() as i64 - PitchClass::A.index() as i64;
        let octave_distance = octave as i64 - REFERENCE_OCTAVE as i64;
        class_distance + octave_distance * SEMITONES_PER_OCTAVE
    }

    /// Equal-tempered frequency in Hz, rounded to two decimals.
    pub fn frequency(self, octave: i32) -> f64 {
        let distance = self.distance_from_reference(octave) as f64;
        let exact = REFERENCE_FREQUENCY * 2.0_f64.powf(distance / SEMITONES_PER_OCTAVE as f64);
        round_hundredths(exact)
    }
}

impl std::fmt::Display for PitchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = Error;

    /// Case-insensitive: "c#", "C#" and "c" are all accepted.
    fn from_str(s: &str) -> Result<Self> {
        let upper = s.to_ascii_uppercase();
        PitchClass::ALL
            .iter()
            .copied()
            .find(|class| class.name() == upper)
            .ok_or_else(|| Error::UnknownPitch {
                pitch: s.to_string(),
                token: s.to_string(),
            })
    }
}

/// A pitch class in a specific octave.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub class: PitchClass,
    pub octave: i32,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i32) -> Self {
        Self { class, octave }
    }

    pub fn frequency(&self) -> f64 {
        self.class.frequency(self.octave)
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

/// Resolve a pitch name and octave to its frequency in Hz.
///
/// Fails with [`Error::UnknownPitch`] when `pitch_class` is not one of the
/// twelve sharp-spelled names (compared case-insensitively).
pub fn resolve(pitch_class: &str, octave: i32) -> Result<f64> {
    let class: PitchClass = pitch_class.parse()?;
    Ok(class.frequency(octave))
}

fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
