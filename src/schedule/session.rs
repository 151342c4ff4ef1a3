//! Session - several voices sharing one time zero
//!
//! Simple model: one voice = one notation string with its own tempo, envelope
//! and waveform. Voices are scheduled independently and only meet when the
//! overall finish time is reduced.

use crate::error::{Error, Result};
use crate::notation::parse;

use super::builder::{build_schedule, VoiceSchedule};
use super::envelope::Adsr;
use super::waveform::Waveform;

/// Default tempo in beats per minute
pub const DEFAULT_BPM: f64 = 100.0;

/// Everything needed to schedule one voice.
#[derive(Debug, Clone, PartialEq)]
pub struct Voice {
    pub notation: String,
    pub bpm: f64,
    pub adsr: Adsr,
    pub waveform: Waveform,
}

impl Voice {
    pub fn new(notation: impl Into<String>) -> Self {
        Self {
            notation: notation.into(),
            bpm: DEFAULT_BPM,
            adsr: Adsr::default(),
            waveform: Waveform::default(),
        }
    }

    /// Set the tempo in beats per minute
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    pub fn adsr(mut self, adsr: Adsr) -> Self {
        self.adsr = adsr;
        self
    }

    pub fn waveform(mut self, waveform: Waveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Parse the notation and schedule it.
    pub fn schedule(&self) -> Result<VoiceSchedule> {
        let tokens = parse(&self.notation)?;
        build_schedule(&tokens, self.bpm, &self.adsr, self.waveform)
    }
}

/// The schedules of all voices playing together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    /// One schedule per voice, in the order the voices were given
    pub voices: Vec<VoiceSchedule>,
    /// Latest finish time over all voices (0 for an empty session)
    pub finish_time: f64,
}

impl Session {
    /// Whether a backend clock at `time` has played everything.
    pub fn is_finished_at(&self, time: f64) -> bool {
        time > self.finish_time
    }

    /// Total number of scheduled oscillators.
    pub fn entry_count(&self) -> usize {
        self.voices.iter().map(|v| v.entries.len()).sum()
    }
}

/// Schedule every voice, all or nothing.
///
/// The first voice that fails aborts the session; its error is wrapped in
/// [`Error::Voice`] with the voice's index.
pub fn build_session(voices: &[Voice]) -> Result<Session> {
    let schedules = voices
        .iter()
        .enumerate()
        .map(|(index, voice)| {
            voice.schedule().map_err(|source| Error::Voice {
                index,
                source: Box::new(source),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let finish_time = schedules
        .iter()
        .map(|s| s.finish_time)
        .fold(0.0, f64::max);

    log::debug!(
        "session of {} voices, finish {:.3}s",
        schedules.len(),
        finish_time
    );

    Ok(Session {
        voices: schedules,
        finish_time,
    })
}
