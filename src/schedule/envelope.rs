/*
Scheduled ADSR Envelopes
========================

A scheduled envelope is not a running state machine: it is a fixed list of
gain breakpoints computed ahead of time for one note. A backend draws straight
lines between them.

Vocabulary
----------

  level       Gain multiplier (0.0 to 1.0) applied to the oscillator.

  breakpoint  A (time, level) pair. Between two breakpoints the level moves
              linearly; at equal times the later breakpoint wins.

  note length d = stop - start, in seconds. Attack, decay and release are
              fractions of d, NOT of the beat, so the envelope shape scales
              with each note and is independent of tempo.


The Shape
---------

  Level
    1.0 ┐    B
        │   ╱╲
    S   │  ╱  C─────────D
        │ ╱               ╲
    0.0 A──────────────────E──→ Time
        start        stop   stop + d*release

    A  (start,                   0.0)
    B  (start + d*attack,        1.0)
    C  (B + d*decay,             sustain)
    D  (stop,                    sustain)
    E  (stop + d*release,        RELEASE_FLOOR)

E is the note's acoustic finish time, which runs past `stop` by the release
tail. The release ends on a tiny positive floor instead of exactly zero so
exponential-ramp backends never have to reach log(0).

B and C are clamped to `stop`: if attack + decay exceed the note, the ramps
are cut short at the stop time rather than spilling into the release. The
breakpoints are therefore always in time order.
*/

/// Level the release ramps down to.
pub const RELEASE_FLOOR: f32 = 0.00001;

/// Attack/decay/release as fractions of note length, sustain as a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adsr {
    attack: f64,
    decay: f64,
    sustain: f64,
    release: f64,
}

impl Adsr {
    /// Negative or non-finite fractions become 0; sustain is clamped to [0, 1].
    pub fn new(attack: f64, decay: f64, sustain: f64, release: f64) -> Self {
        Self {
            attack: fraction(attack),
            decay: fraction(decay),
            sustain: fraction(sustain).min(1.0),
            release: fraction(release),
        }
    }

    pub fn attack(&self) -> f64 {
        self.attack
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn sustain(&self) -> f64 {
        self.sustain
    }

    pub fn release(&self) -> f64 {
        self.release
    }
}

impl Default for Adsr {
    fn default() -> Self {
        Self::new(0.01, 0.01, 1.0, 0.01)
    }
}

fn fraction(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// A gain target at an absolute time (seconds from voice start).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    pub time: f64,
    pub level: f32,
}

impl Breakpoint {
    fn new(time: f64, level: f32) -> Self {
        Self { time, level }
    }
}

/// Which part of the envelope a time falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,    // Before start or after the release has finished
    Attack,  // Ramping up to 1.0
    Decay,   // Ramping down to sustain level
    Sustain, // Holding until stop
    Release, // Ramping down to the floor
}

/// The five breakpoints of one scheduled note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    points: [Breakpoint; 5],
}

impl Envelope {
    /// Build the envelope for a note sounding from `start` to `stop`.
    pub fn for_note(start: f64, stop: f64, adsr: &Adsr) -> Self {
        let length = stop - start;
        let sustain = adsr.sustain() as f32;

        let attack_end = (start + length * adsr.attack()).min(stop);
        let decay_end = (attack_end + length * adsr.decay()).min(stop);
        let release_end = stop + length * adsr.release();

        Self {
            points: [
                Breakpoint::new(start, 0.0),
                Breakpoint::new(attack_end, 1.0),
                Breakpoint::new(decay_end, sustain),
                Breakpoint::new(stop, sustain),
                Breakpoint::new(release_end, RELEASE_FLOOR),
            ],
        }
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.points
    }

    pub fn start_time(&self) -> f64 {
        self.points[0].time
    }

    /// Time the release reaches its floor.
    pub fn finish_time(&self) -> f64 {
        self.points[4].time
    }

    /// Gain at `time`, interpolated linearly between breakpoints.
    ///
    /// Silent before the start and after the finish time.
    pub fn level_at(&self, time: f64) -> f32 {
        if time < self.start_time() || time > self.finish_time() {
            return 0.0;
        }

        // Last breakpoint at or before `time` wins
        let idx = self
            .points
            .iter()
            .rposition(|p| p.time <= time)
            .unwrap_or(0);
        let from = self.points[idx];

        match self.points.get(idx + 1) {
            Some(to) => {
                let progress = (time - from.time) / (to.time - from.time);
                from.level + (to.level - from.level) * progress as f32
            }
            None => from.level,
        }
    }

    pub fn stage_at(&self, time: f64) -> EnvelopeStage {
        let [start, attack_end, decay_end, stop, finish] = self.points.map(|p| p.time);
        if time < start || time > finish {
            EnvelopeStage::Idle
        } else if time < attack_end {
            EnvelopeStage::Attack
        } else if time < decay_end {
            EnvelopeStage::Decay
        } else if time < stop {
            EnvelopeStage::Sustain
        } else {
            EnvelopeStage::Release
        }
    }
}
