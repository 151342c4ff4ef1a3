use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::schedule::Waveform;

use super::VoiceSettings;

/// Named instrument settings a voice can start from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Percussive sine: fast attack, long decay to almost nothing
    Piano,
    /// Bright sawtooth held at full level
    Synthesizer,
    /// Short triangle hits
    Drums,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Piano, Preset::Synthesizer, Preset::Drums];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Piano => "piano",
            Preset::Synthesizer => "synthesizer",
            Preset::Drums => "drums",
        }
    }

    pub fn bpm(self) -> u32 {
        match self {
            Preset::Piano => 100,
            Preset::Synthesizer => 200,
            Preset::Drums => 144,
        }
    }

    pub fn waveform(self) -> Waveform {
        match self {
            Preset::Piano => Waveform::Sine,
            Preset::Synthesizer => Waveform::Sawtooth,
            Preset::Drums => Waveform::Triangle,
        }
    }

    /// (attack, decay, sustain, release)
    pub fn adsr(self) -> (f64, f64, f64, f64) {
        match self {
            Preset::Piano => (0.01, 0.44, 0.01, 0.3),
            Preset::Synthesizer => (0.01, 0.01, 1.0, 0.01),
            Preset::Drums => (0.01, 0.15, 0.01, 0.01),
        }
    }

    /// Overwrite tempo, waveform and envelope; the notation is kept.
    pub fn apply(self, settings: &VoiceSettings) -> VoiceSettings {
        let (attack, decay, sustain, release) = self.adsr();
        VoiceSettings {
            notation: settings.notation.clone(),
            bpm: self.bpm(),
            waveform: self.waveform(),
            attack,
            decay,
            sustain,
            release,
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Preset::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::UnknownPreset(s.to_string()))
    }
}

/// Apply the preset called `name` to `settings`.
///
/// Unknown names fail with [`Error::UnknownPreset`] and leave nothing changed.
pub fn apply_preset(settings: &VoiceSettings, name: &str) -> Result<VoiceSettings> {
    let preset: Preset = name.parse()?;
    Ok(preset.apply(settings))
}
