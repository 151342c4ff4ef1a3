//! Shared state types for UI communication
//!
//! Static data is built once before the stream starts; the audio thread only
//! sends small `Copy` snapshots.

use spn_player::config::VoiceSettings;
use spn_player::playback::{Clock, PlaybackState};
use spn_player::schedule::Session;

/// Voices beyond this still play but are not shown as active
pub const MAX_SHOWN_VOICES: usize = 8;

/// Static state sent once at initialization (can allocate)
#[derive(Clone)]
pub struct UiStateInit {
    pub sample_rate: f64,
    pub finish_time: f64,
    pub voices: Vec<VoiceInfo>,
}

/// Static information about one voice
#[derive(Clone)]
pub struct VoiceInfo {
    /// Short description: waveform and tempo
    pub label: String,
    /// Sounding spans for the timeline, (start, finish) in seconds
    pub spans: Vec<(f64, f64)>,
}

impl UiStateInit {
    pub fn new(session: &Session, settings: &[VoiceSettings], sample_rate: f64) -> Self {
        let voices = session
            .voices
            .iter()
            .zip(settings)
            .map(|(schedule, settings)| VoiceInfo {
                label: format!("{} {}", settings.waveform, settings.bpm),
                spans: schedule
                    .entries
                    .iter()
                    .map(|e| (e.start_time, e.finish_time()))
                    .collect(),
            })
            .collect();

        Self {
            sample_rate,
            finish_time: session.finish_time,
            voices,
        }
    }
}

/// Clock reading sent from the audio thread (allocation-free, Copy)
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockSnapshot {
    pub time: f64,
    pub state: PlaybackState,
    pub active: [bool; MAX_SHOWN_VOICES],
}

impl ClockSnapshot {
    /// The (from, to) transport change between `previous` and this reading.
    pub fn state_change(
        &self,
        previous: &ClockSnapshot,
    ) -> Option<(PlaybackState, PlaybackState)> {
        (self.state != previous.state).then_some((previous.state, self.state))
    }
}

impl Clock for ClockSnapshot {
    fn current_time(&self) -> f64 {
        self.time
    }

    fn state(&self) -> PlaybackState {
        self.state
    }
}
