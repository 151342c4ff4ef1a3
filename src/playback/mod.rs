// Purpose: the boundary between schedules and whatever plays them
// A backend owns the clock; the engine only hands it offsets from session start.

pub mod control;
pub mod renderer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use control::{ControlMessage, ControlReceiver};
pub use renderer::Renderer;

/// Transport state of a playback backend.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    #[default]
    Running,
    /// Clock frozen, position kept
    Suspended,
    /// Torn down; nothing more will play
    Closed,
}

impl PlaybackState {
    pub fn can_suspend(self) -> bool {
        self == PlaybackState::Running
    }

    pub fn can_resume(self) -> bool {
        self == PlaybackState::Suspended
    }

    pub fn is_closed(self) -> bool {
        self == PlaybackState::Closed
    }

    /// State after `message`. Messages that don't apply leave the state alone.
    pub fn apply(self, message: ControlMessage) -> PlaybackState {
        match (self, message) {
            (PlaybackState::Closed, _) => PlaybackState::Closed,
            (_, ControlMessage::Stop) => PlaybackState::Closed,
            (PlaybackState::Running, ControlMessage::Suspend) => PlaybackState::Suspended,
            (PlaybackState::Suspended, ControlMessage::Resume) => PlaybackState::Running,
            (state, _) => state,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PlaybackState::Running => "running",
            PlaybackState::Suspended => "suspended",
            PlaybackState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A backend's notion of "now", in seconds since the session started.
pub trait Clock {
    fn current_time(&self) -> f64;
    fn state(&self) -> PlaybackState;
}

/// Polls a [`Clock`] against a session's finish time.
///
/// Playback is finished once the clock is strictly past the finish time.
/// The monitor reports that transition exactly once so the caller can tear
/// the backend down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinishMonitor {
    finish_time: f64,
    finished: bool,
}

impl FinishMonitor {
    pub fn new(finish_time: f64) -> Self {
        Self {
            finish_time,
            finished: false,
        }
    }

    pub fn finish_time(&self) -> f64 {
        self.finish_time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns true on the first poll that sees the clock past the finish time.
    pub fn poll<C: Clock + ?Sized>(&mut self, clock: &C) -> bool {
        if self.finished {
            return false;
        }
        if clock.current_time() > self.finish_time {
            log::debug!(
                "playback finished at {:.3}s (finish {:.3}s)",
                clock.current_time(),
                self.finish_time
            );
            self.finished = true;
            return true;
        }
        false
    }

    /// Time left until the finish time, never negative.
    pub fn remaining(&self, clock: &impl Clock) -> f64 {
        (self.finish_time - clock.current_time()).max(0.0)
    }
}
