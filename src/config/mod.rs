//! Editor-facing voice settings.
//!
//! The engine accepts any positive tempo and any envelope fractions; this
//! layer holds what an editor shows (integer BPM, slider values, notation
//! text) and enforces the editor's ranges before handing a [`Voice`] to the
//! scheduler. Recomputation is explicit: call [`VoiceSettings::evaluate`]
//! whenever a field changes and keep the latest result.

pub mod presets;

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schedule::{build_session, Adsr, Session, Voice, VoiceSchedule, Waveform};

pub use presets::{apply_preset, Preset};

pub const BPM_RANGE: RangeInclusive<u32> = 10..=300;
/// Range for attack, decay and release fractions
pub const RAMP_RANGE: RangeInclusive<f64> = 0.01..=1.0;
pub const SUSTAIN_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// One voice as edited: notation text plus playback parameters.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSettings {
    pub notation: String,
    pub bpm: u32,
    pub waveform: Waveform,
    pub attack: f64,
    pub decay: f64,
    pub sustain: f64,
    pub release: f64,
}

impl VoiceSettings {
    pub fn new(notation: impl Into<String>) -> Self {
        Self {
            notation: notation.into(),
            ..Self::default()
        }
    }

    /// Start from a named preset.
    pub fn from_preset(preset: Preset, notation: impl Into<String>) -> Self {
        preset.apply(&Self::new(notation))
    }

    pub fn with_bpm(mut self, bpm: u32) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn with_waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn with_adsr(mut self, attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        self.attack = attack;
        self.decay = decay;
        self.sustain = sustain;
        self.release = release;
        self
    }

    /// Check editor ranges and notation, producing the engine's voice.
    ///
    /// A BPM problem is reported in preference to a notation problem.
    pub fn validate(&self) -> Result<Voice> {
        check_range("BPM", self.bpm as f64, *BPM_RANGE.start() as f64, *BPM_RANGE.end() as f64)?;
        check_range("attack", self.attack, *RAMP_RANGE.start(), *RAMP_RANGE.end())?;
        check_range("decay", self.decay, *RAMP_RANGE.start(), *RAMP_RANGE.end())?;
        check_range("sustain", self.sustain, *SUSTAIN_RANGE.start(), *SUSTAIN_RANGE.end())?;
        check_range("release", self.release, *RAMP_RANGE.start(), *RAMP_RANGE.end())?;

        crate::notation::parse(&self.notation)?;

        Ok(self.to_voice())
    }

    /// Recompute the schedule for the current settings.
    pub fn evaluate(&self) -> Evaluation {
        self.validate().and_then(|voice| voice.schedule()).into()
    }

    /// The engine voice for these settings, without range checks.
    pub fn to_voice(&self) -> Voice {
        Voice::new(self.notation.clone())
            .bpm(self.bpm as f64)
            .adsr(Adsr::new(self.attack, self.decay, self.sustain, self.release))
            .waveform(self.waveform)
    }
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            notation: String::new(),
            bpm: 100,
            waveform: Waveform::Sine,
            attack: 0.01,
            decay: 0.01,
            sustain: 1.0,
            release: 0.01,
        }
    }
}

/// Latest validity and schedule of one voice, as an editor displays it.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Valid(VoiceSchedule),
    Invalid(Error),
}

impl Evaluation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Evaluation::Valid(_))
    }

    pub fn schedule(&self) -> Option<&VoiceSchedule> {
        match self {
            Evaluation::Valid(schedule) => Some(schedule),
            Evaluation::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            Evaluation::Valid(_) => None,
            Evaluation::Invalid(err) => Some(err),
        }
    }

    /// Unit to highlight in the notation text, if the error points at one.
    pub fn offending_token(&self) -> Option<&str> {
        self.error().and_then(Error::offending_token)
    }
}

impl From<Result<VoiceSchedule>> for Evaluation {
    fn from(result: Result<VoiceSchedule>) -> Self {
        match result {
            Ok(schedule) => Evaluation::Valid(schedule),
            Err(err) => Evaluation::Invalid(err),
        }
    }
}

fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// All voices in the editor, played together.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Composition {
    pub voices: Vec<VoiceSettings>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a voice and return its index.
    pub fn add_voice(&mut self, settings: VoiceSettings) -> usize {
        self.voices.push(settings);
        self.voices.len() - 1
    }

    pub fn remove_voice(&mut self, index: usize) -> Option<VoiceSettings> {
        (index < self.voices.len()).then(|| self.voices.remove(index))
    }

    /// Playback is only offered when every voice validates.
    pub fn is_playable(&self) -> bool {
        self.voices.iter().all(|v| v.validate().is_ok())
    }

    /// Validate every voice and build the session, all or nothing.
    pub fn session(&self) -> Result<Session> {
        let voices = self
            .voices
            .iter()
            .enumerate()
            .map(|(index, settings)| {
                settings.validate().map_err(|source| Error::Voice {
                    index,
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        build_session(&voices)
    }
}
