//! Schedule builder: note events + tempo + ADSR -> timed envelope instructions
//!
//! Times are absolute offsets in seconds from the voice's start. The beat
//! cursor is kept as an exact fraction so long voices never drift; it is only
//! converted to seconds when an entry is emitted. Denominators whose common
//! multiple no longer fits a `u64` switch the cursor to a float sum of beats
//! for the rest of the voice.

use crate::error::{Error, Result};
use crate::notation::{Duration, NoteToken, ResolvedNote};

use super::envelope::{Adsr, Envelope};
use super::waveform::Waveform;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Anything the builder can schedule: a frequency (None = rest) and a duration.
pub trait NoteEvent {
    fn frequency_hz(&self) -> Option<f64>;
    fn duration(&self) -> Duration;
}

impl NoteEvent for ResolvedNote {
    fn frequency_hz(&self) -> Option<f64> {
        self.frequency_hz
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

impl NoteEvent for NoteToken {
    fn frequency_hz(&self) -> Option<f64> {
        self.pitch.map(|p| p.frequency())
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

/// One oscillator to realize: what to play, when, and with which gain curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub frequency_hz: f64,
    /// When the note starts, in seconds from voice start
    pub start_time: f64,
    /// When the note's nominal length ends and the release begins
    pub stop_time: f64,
    pub envelope: Envelope,
    pub waveform: Waveform,
}

impl ScheduleEntry {
    /// When the release tail reaches silence; the oscillator can stop here.
    pub fn finish_time(&self) -> f64 {
        self.envelope.finish_time()
    }

    /// Whether the oscillator is running at `time`.
    pub fn is_sounding(&self, time: f64) -> bool {
        time >= self.start_time && time <= self.finish_time()
    }
}

/// Everything one voice will play.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VoiceSchedule {
    /// Entries in notation order, rests omitted
    pub entries: Vec<ScheduleEntry>,
    /// Latest finish time over all entries (0 when nothing sounds)
    pub finish_time: f64,
}

impl VoiceSchedule {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose oscillators are running at `time`.
    pub fn sounding_at(&self, time: f64) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(move |e| e.is_sounding(time))
    }
}

/// Incremental builder, one note at a time.
pub struct ScheduleBuilder {
    beat_duration: f64,
    adsr: Adsr,
    waveform: Waveform,
    cursor: Option<Duration>, // Position of the next note, None once inexact
    cursor_beats: f64,        // Same position as a float sum of beats
    notes_seen: usize,
    entries: Vec<ScheduleEntry>,
    finish_time: f64,
}

impl ScheduleBuilder {
    /// `bpm` must be a positive, finite number of quarter notes per minute.
    pub fn new(bpm: f64, adsr: Adsr, waveform: Waveform) -> Result<Self> {
        if !(bpm.is_finite() && bpm > 0.0) {
            return Err(Error::InvalidTempo { bpm });
        }

        Ok(Self {
            beat_duration: SECONDS_PER_MINUTE / bpm,
            adsr,
            waveform,
            cursor: Some(Duration::ZERO),
            cursor_beats: 0.0,
            notes_seen: 0,
            entries: Vec::new(),
            finish_time: 0.0,
        })
    }

    pub fn with_capacity(mut self, notes: usize) -> Self {
        self.entries.reserve(notes);
        self
    }

    /// Schedule the next note. Rests advance time without emitting an entry.
    pub fn push<N: NoteEvent + ?Sized>(&mut self, note: &N) {
        let index = self.notes_seen;
        let duration = note.duration();

        let start_beats = self.cursor.map_or(self.cursor_beats, |c| c.beats());
        let start_time = start_beats * self.beat_duration;
        let stop_time = start_time + duration.beats() * self.beat_duration;

        self.cursor = self.cursor.and_then(|c| {
            let next = c.checked_add(duration);
            if next.is_none() {
                log::debug!("note {index}: beat position no longer exact, using float beats");
            }
            next
        });
        self.cursor_beats += duration.beats();
        self.notes_seen += 1;

        let Some(frequency_hz) = note.frequency_hz() else {
            return;
        };

        let envelope = Envelope::for_note(start_time, stop_time, &self.adsr);
        self.finish_time = self.finish_time.max(envelope.finish_time());

        log::trace!(
            "note {index}: {frequency_hz} Hz, {start_time:.4}s..{stop_time:.4}s, finish {:.4}s",
            envelope.finish_time()
        );

        self.entries.push(ScheduleEntry {
            frequency_hz,
            start_time,
            stop_time,
            envelope,
            waveform: self.waveform,
        });
    }

    pub fn build(self) -> VoiceSchedule {
        VoiceSchedule {
            entries: self.entries,
            finish_time: self.finish_time,
        }
    }
}

/// Schedule a whole voice.
///
/// Entries come out in the same order as `notes`; the finish time includes
/// the release tail of every note.
pub fn build_schedule<N: NoteEvent>(
    notes: &[N],
    bpm: f64,
    adsr: &Adsr,
    waveform: Waveform,
) -> Result<VoiceSchedule> {
    let mut builder = ScheduleBuilder::new(bpm, *adsr, waveform)?.with_capacity(notes.len());
    for note in notes {
        builder.push(note);
    }

    let schedule = builder.build();
    log::debug!(
        "scheduled {} of {} notes at {bpm} bpm, finish {:.3}s",
        schedule.entries.len(),
        notes.len(),
        schedule.finish_time
    );
    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_resolved;

    fn schedule(notation: &str, bpm: f64, adsr: Adsr) -> VoiceSchedule {
        let notes = parse_resolved(notation).unwrap();
        build_schedule(&notes, bpm, &adsr, Waveform::Sine).unwrap()
    }

    #[test]
    fn quarter_notes_at_60_bpm_last_one_second() {
        let s = schedule("C4/4 E4/4 G4/4", 60.0, Adsr::new(0.1, 0.1, 0.5, 0.5));
        assert_eq!(s.entries.len(), 3);
        for (i, entry) in s.entries.iter().enumerate() {
            assert_eq!(entry.start_time, i as f64);
            assert_eq!(entry.stop_time, i as f64 + 1.0);
        }
        assert_eq!(s.entries[1].frequency_hz, 329.63);
        // Last note stops at 3.0 and releases for half its length
        assert_eq!(s.finish_time, 3.5);
    }

    #[test]
    fn rests_take_time_but_emit_nothing() {
        let s = schedule("C4/4 _/2 D4/8", 120.0, Adsr::default());
        assert_eq!(s.entries.len(), 2);
        // quarter (0.5s) + half rest (1.0s) at 120 bpm
        assert_eq!(s.entries[1].start_time, 1.5);
        assert_eq!(s.entries[1].stop_time, 1.75);
    }

    #[test]
    fn dotted_notes_shift_later_entries() {
        let s = schedule("C4/8. C4/16 C4/4", 60.0, Adsr::default());
        assert_eq!(s.entries[1].start_time, 0.75);
        assert_eq!(s.entries[2].start_time, 1.0);
    }

    #[test]
    fn finish_time_counts_release_tails() {
        // A long early note can outlast a short final note
        let s = schedule("C4/1 D4/16", 60.0, Adsr::new(0.1, 0.1, 0.5, 1.0));
        let last = s.entries.last().unwrap();
        assert!(s.finish_time > last.stop_time);
        assert_eq!(s.finish_time, 8.0);
    }

    #[test]
    fn rest_only_voice_finishes_at_zero() {
        let s = schedule("_/4 _/2", 90.0, Adsr::default());
        assert!(s.is_empty());
        assert_eq!(s.finish_time, 0.0);
    }

    #[test]
    fn envelope_shape_is_tempo_independent() {
        let adsr = Adsr::new(0.2, 0.3, 0.6, 0.4);
        let slow = schedule("A4/4", 60.0, adsr);
        let fast = schedule("A4/4", 240.0, adsr);

        let shape = |s: &VoiceSchedule| {
            let e = &s.entries[0];
            let length = e.stop_time - e.start_time;
            e.envelope
                .breakpoints()
                .iter()
                .map(|p| ((p.time - e.start_time) / length, p.level))
                .collect::<Vec<_>>()
        };
        for (a, b) in shape(&slow).iter().zip(shape(&fast)) {
            assert!((a.0 - b.0).abs() < 1e-9);
            assert_eq!(a.1, b.1);
        }
    }

    #[test]
    fn twelfths_stay_on_the_beat() {
        // 12 twelfth notes = 4 beats exactly, no accumulated error
        let notation = vec!["C4/12"; 12].join(" ") + " C5/4";
        let s = schedule(&notation, 60.0, Adsr::default());
        assert_eq!(s.entries[12].start_time, 4.0);
    }

    fn assert_starts_follow_denominators(denominators: &[u64]) {
        let notation = denominators
            .iter()
            .map(|d| format!("C4/{d}"))
            .collect::<Vec<_>>()
            .join(" ");
        // 120 bpm: half a second per beat
        let s = schedule(&notation, 120.0, Adsr::default());
        assert_eq!(s.entries.len(), denominators.len());

        let mut beats = 0.0;
        for (entry, &d) in s.entries.iter().zip(denominators) {
            assert!(
                (entry.start_time - beats * 0.5).abs() < 1e-9,
                "C4/{d} starts at {} instead of {}",
                entry.start_time,
                beats * 0.5
            );
            beats += 4.0 / d as f64;
        }
    }

    #[test]
    fn coprime_denominators_keep_scheduling() {
        assert_starts_follow_denominators(&[1000003, 1000033, 1000037, 1000039]);
        assert_starts_follow_denominators(&[
            2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53,
        ]);
    }

    #[test]
    fn invalid_tempo_is_rejected() {
        let notes = parse_resolved("C4/4").unwrap();
        for bpm in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            let result = build_schedule(&notes, bpm, &Adsr::default(), Waveform::Sine);
            assert!(matches!(result, Err(Error::InvalidTempo { .. })));
        }
    }

    #[test]
    fn tokens_schedule_like_resolved_notes() {
        let tokens = crate::notation::parse("C4/4 _/4 G4/2").unwrap();
        let resolved: Vec<_> = tokens.iter().map(NoteToken::resolve).collect();
        let a = build_schedule(&tokens, 100.0, &Adsr::default(), Waveform::Square).unwrap();
        let b = build_schedule(&resolved, 100.0, &Adsr::default(), Waveform::Square).unwrap();
        assert_eq!(a, b);
        assert!(a.entries.iter().all(|e| e.waveform == Waveform::Square));
    }

    #[test]
    fn sounding_at_includes_release_tail() {
        let s = schedule("C4/4 E4/4", 60.0, Adsr::new(0.1, 0.1, 0.5, 0.5));
        // At 1.2s the first note is still releasing while the second plays
        assert_eq!(s.sounding_at(1.2).count(), 2);
        assert_eq!(s.sounding_at(2.6).count(), 0);
    }
}
