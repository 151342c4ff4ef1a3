//! Renderer - offline sample-clock backend
//!
//! Realises a [`Session`] into mono `f32` blocks. The sample counter is the
//! clock: it only advances while running, so suspending freezes time without
//! losing position. Entries from all voices are merged into one start-ordered
//! list and walked with a cursor, starting oscillators as their start time is
//! reached and dropping them once their release tail has finished.

use crate::schedule::{ScheduleEntry, Session};

use super::control::{ControlMessage, ControlReceiver};
use super::{Clock, PlaybackState};

/// An entry tagged with the voice it came from
#[derive(Debug, Clone)]
struct Scheduled {
    voice: usize,
    entry: ScheduleEntry,
}

/// A running oscillator: index into the merged list plus its phase in cycles
#[derive(Debug, Clone, Copy)]
struct Oscillator {
    event: usize,
    phase: f64,
}

pub struct Renderer {
    sample_rate: f64,
    events: Vec<Scheduled>,
    /// Next event that has not started yet
    event_index: usize,
    active: Vec<Oscillator>,
    frames: u64,
    state: PlaybackState,
    /// 1/N for N voices, applied after mixing
    master_gain: f32,
    voice_count: usize,
    finish_time: f64,
}

impl Renderer {
    pub fn new(session: &Session, sample_rate: f64) -> Self {
        let mut events: Vec<Scheduled> = session
            .voices
            .iter()
            .enumerate()
            .flat_map(|(voice, schedule)| {
                schedule.entries.iter().map(move |entry| Scheduled {
                    voice,
                    entry: entry.clone(),
                })
            })
            .collect();
        // Stable, so entries starting together keep voice order
        events.sort_by(|a, b| a.entry.start_time.total_cmp(&b.entry.start_time));

        let voice_count = session.voices.len();
        let master_gain = 1.0 / voice_count.max(1) as f32;

        log::debug!(
            "renderer: {} entries over {} voices at {} Hz",
            events.len(),
            voice_count,
            sample_rate
        );

        Self {
            sample_rate,
            events,
            event_index: 0,
            active: Vec::with_capacity(32),
            frames: 0,
            state: PlaybackState::Running,
            master_gain,
            voice_count,
            finish_time: session.finish_time,
        }
    }

    pub fn finish_time(&self) -> f64 {
        self.finish_time
    }

    pub fn voice_count(&self) -> usize {
        self.voice_count
    }

    /// Oscillators currently running.
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Whether any oscillator of `voice` is running.
    pub fn is_voice_active(&self, voice: usize) -> bool {
        self.active
            .iter()
            .any(|osc| self.events[osc.event].voice == voice)
    }

    pub fn is_finished(&self) -> bool {
        self.current_time() > self.finish_time
    }

    /// Apply one transport command.
    pub fn handle(&mut self, message: ControlMessage) {
        let next = self.state.apply(message);
        if next != self.state {
            if next.is_closed() {
                self.active.clear();
            }
            self.state = next;
        }
    }

    /// Drain every pending command from `receiver`.
    pub fn process_messages<R: ControlReceiver + ?Sized>(&mut self, receiver: &mut R) {
        while let Some(message) = receiver.pop() {
            self.handle(message);
        }
    }

    pub fn suspend(&mut self) {
        self.handle(ControlMessage::Suspend);
    }

    pub fn resume(&mut self) {
        self.handle(ControlMessage::Resume);
    }

    pub fn stop(&mut self) {
        self.handle(ControlMessage::Stop);
    }

    /// Fill `out` with the next block. Silence unless running.
    pub fn render_block(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        if self.state != PlaybackState::Running {
            return;
        }

        let step = 1.0 / self.sample_rate;
        for sample in out.iter_mut() {
            let time = self.current_time();

            while self.event_index < self.events.len()
                && self.events[self.event_index].entry.start_time <= time
            {
                self.active.push(Oscillator {
                    event: self.event_index,
                    phase: 0.0,
                });
                self.event_index += 1;
            }

            let events = &self.events;
            let mut mix = 0.0f32;
            self.active.retain_mut(|osc| {
                let entry = &events[osc.event].entry;
                if time > entry.finish_time() {
                    return false;
                }
                mix += entry.waveform.sample(osc.phase) * entry.envelope.level_at(time);
                osc.phase = (osc.phase + entry.frequency_hz * step).fract();
                true
            });

            *sample = (mix * self.master_gain).clamp(-1.0, 1.0);
            self.frames += 1;
        }
    }
}

impl Clock for Renderer {
    fn current_time(&self) -> f64 {
        self.frames as f64 / self.sample_rate
    }

    fn state(&self) -> PlaybackState {
        self.state
    }
}
