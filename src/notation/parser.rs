//! Parser for scientific pitch notation melodies.
//!
//! Format (units separated by single spaces):
//!
//! ```text
//! unit     := (pitch | "_") "/" denominator ["."]
//! pitch    := letter octave | letter "#" octave
//! ```
//!
//! - `C4/4`   quarter note middle C
//! - `D#7/8.` dotted eighth
//! - `_/2`    half rest
//!
//! Parsing is strict: doubled, leading or trailing spaces produce an empty
//! unit, which is rejected rather than skipped.

use crate::error::{Error, ParseErrorKind, Result};

use super::duration::Duration;
use super::pitch::{Pitch, PitchClass};

/// Separator between units.
pub const UNIT_SEPARATOR: char = ' ';
/// Separator between the pitch part and the duration part of a unit.
pub const DURATION_SEPARATOR: char = '/';
/// Pitch part that marks a rest.
pub const REST_SYMBOL: &str = "_";
/// Second character of a sharp pitch name.
pub const SHARP: char = '#';
/// Suffix marking a dotted duration.
pub const DOT: char = '.';

/// One unit of notation: a pitch (or rest) and how long it lasts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteToken {
    /// The unit exactly as written
    pub text: String,
    /// Pitch to play (None = rest)
    pub pitch: Option<Pitch>,
    /// Length as a fraction of a whole note, dot already applied
    pub duration: Duration,
}

impl NoteToken {
    pub fn is_rest(&self) -> bool {
        self.pitch.is_none()
    }

    /// Length in quarter-note beats: (4 / denominator) * (1.5 if dotted)
    pub fn duration_units(&self) -> f64 {
        self.duration.beats()
    }

    pub fn pitch_class(&self) -> Option<PitchClass> {
        self.pitch.map(|p| p.class)
    }

    pub fn octave(&self) -> Option<i32> {
        self.pitch.map(|p| p.octave)
    }

    /// Resolve the pitch to a frequency.
    pub fn resolve(&self) -> ResolvedNote {
        ResolvedNote {
            frequency_hz: self.pitch.map(|p| p.frequency()),
            duration: self.duration,
        }
    }
}

/// A note after pitch resolution, ready for scheduling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedNote {
    /// Oscillator frequency (None = rest, silence rather than a 0 Hz tone)
    pub frequency_hz: Option<f64>,
    pub duration: Duration,
}

impl ResolvedNote {
    pub fn is_rest(&self) -> bool {
        self.frequency_hz.is_none()
    }

    pub fn duration_units(&self) -> f64 {
        self.duration.beats()
    }
}

/// Parse a whole notation string into its units, in order.
///
/// Fails on the first malformed unit; no partial list is returned.
pub fn parse(notation: &str) -> Result<Vec<NoteToken>> {
    let tokens = notation
        .split(UNIT_SEPARATOR)
        .map(parse_unit)
        .collect::<Result<Vec<_>>>()?;

    log::debug!("parsed {} notation units", tokens.len());
    Ok(tokens)
}

/// Parse and resolve in one step.
pub fn parse_resolved(notation: &str) -> Result<Vec<ResolvedNote>> {
    Ok(parse(notation)?.iter().map(NoteToken::resolve).collect())
}

/// Parse a single unit such as `C#4/8.` or `_/2`.
pub fn parse_unit(unit: &str) -> Result<NoteToken> {
    let (pitch_part, duration_part) = unit
        .split_once(DURATION_SEPARATOR)
        .filter(|(_, rest)| !rest.contains(DURATION_SEPARATOR))
        .ok_or_else(|| Error::parse(unit, ParseErrorKind::Split))?;

    let pitch = parse_pitch(unit, pitch_part)?;
    let duration = parse_duration(unit, duration_part)?;

    Ok(NoteToken {
        text: unit.to_string(),
        pitch,
        duration,
    })
}

/// Pitch part: `_`, or a one/two character name followed by an integer octave.
fn parse_pitch(unit: &str, part: &str) -> Result<Option<Pitch>> {
    if part == REST_SYMBOL {
        return Ok(None);
    }

    let mut chars = part.char_indices();
    let first = chars
        .next()
        .map(|(_, c)| c)
        .ok_or_else(|| Error::parse(unit, ParseErrorKind::Pitch))?;

    // Sharp only counts in second position: "C#4" splits as "C#" + "4"
    let name_end = match chars.next() {
        Some((i, SHARP)) => i + SHARP.len_utf8(),
        _ => first.len_utf8(),
    };
    let (name, octave) = part.split_at(name_end);

    let octave: i32 = octave
        .parse()
        .map_err(|_| Error::parse(unit, ParseErrorKind::Octave))?;

    let class: PitchClass = name.parse().map_err(|_| Error::UnknownPitch {
        pitch: name.to_string(),
        token: unit.to_string(),
    })?;

    Ok(Some(Pitch::new(class, octave)))
}

/// Duration part: positive integer denominator, optionally followed by a dot.
fn parse_duration(unit: &str, part: &str) -> Result<Duration> {
    let invalid = || Error::parse(unit, ParseErrorKind::Duration);

    let (digits, dotted) = match part.strip_suffix(DOT) {
        Some(digits) => (digits, true),
        None => (part, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let denominator: u64 = digits.parse().map_err(|_| invalid())?;
    let duration = Duration::from_denominator(denominator).ok_or_else(invalid)?;

    if dotted {
        duration.checked_dotted().ok_or_else(invalid)
    } else {
        Ok(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind_of(result: Result<NoteToken>) -> ParseErrorKind {
        match result {
            Err(Error::Parse { kind, .. }) => kind,
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn parse_sixteenth() {
        let token = parse_unit("C3/16").unwrap();
        assert_eq!(token.pitch_class(), Some(PitchClass::C));
        assert_eq!(token.octave(), Some(3));
        assert_eq!(token.duration_units(), 0.25);
        assert!(!token.is_rest());
    }

    #[test]
    fn parse_dotted_sharp() {
        let token = parse_unit("D#7/8.").unwrap();
        assert_eq!(token.pitch_class(), Some(PitchClass::DSharp));
        assert_eq!(token.octave(), Some(7));
        assert_eq!(token.duration_units(), 0.75);
    }

    #[test]
    fn parse_rest() {
        let token = parse_unit("_/2").unwrap();
        assert!(token.is_rest());
        assert_eq!(token.octave(), None);
        assert_eq!(token.duration_units(), 2.0);
        assert_eq!(token.resolve().frequency_hz, None);
    }

    #[test]
    fn parse_twelfth_is_a_third_of_a_beat() {
        let token = parse_unit("B8/12").unwrap();
        assert!((token.duration_units() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(token.resolve().frequency_hz, Some(7902.13));
    }

    #[test]
    fn lowercase_names_resolve() {
        let token = parse_unit("e4/4").unwrap();
        assert_eq!(token.resolve().frequency_hz, Some(329.63));
        assert_eq!(token.text, "e4/4");
    }

    #[test]
    fn negative_octaves_are_integers() {
        let token = parse_unit("A-1/4").unwrap();
        assert_eq!(token.octave(), Some(-1));
    }

    #[test]
    fn parse_sequence_keeps_order() {
        let tokens = parse("C4/4 _/8 G4/8.").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "C4/4");
        assert!(tokens[1].is_rest());
        assert_eq!(tokens[2].duration_units(), 0.75);
    }

    #[test]
    fn split_errors() {
        assert_eq!(kind_of(parse_unit("C4")), ParseErrorKind::Split);
        assert_eq!(kind_of(parse_unit("C4/4/4")), ParseErrorKind::Split);
        assert_eq!(kind_of(parse_unit("")), ParseErrorKind::Split);
    }

    #[test]
    fn pitch_and_octave_errors() {
        assert_eq!(kind_of(parse_unit("/4")), ParseErrorKind::Pitch);
        assert_eq!(kind_of(parse_unit("C/4")), ParseErrorKind::Octave);
        assert_eq!(kind_of(parse_unit("Cx/4")), ParseErrorKind::Octave);
        assert_eq!(kind_of(parse_unit("C#/4")), ParseErrorKind::Octave);
    }

    #[test]
    fn duration_errors() {
        assert_eq!(kind_of(parse_unit("C4/0")), ParseErrorKind::Duration);
        assert_eq!(kind_of(parse_unit("C4/x")), ParseErrorKind::Duration);
        assert_eq!(kind_of(parse_unit("C4/")), ParseErrorKind::Duration);
        assert_eq!(kind_of(parse_unit("C4/.")), ParseErrorKind::Duration);
        assert_eq!(kind_of(parse_unit("C4/8..")), ParseErrorKind::Duration);
        assert_eq!(kind_of(parse_unit("C4/-4")), ParseErrorKind::Duration);
    }

    #[test]
    fn denominators_stop_at_u64() {
        let largest = parse_unit("C4/18446744073709551615").unwrap();
        assert!(largest.duration_units() > 0.0);

        for text in [
            "C4/18446744073709551616",
            "C4/99999999999999999999",
            "C4/18446744073709551615.",
        ] {
            assert_eq!(kind_of(parse_unit(text)), ParseErrorKind::Duration, "{text}");
        }
    }

    #[test]
    fn unknown_pitch_names_the_unit() {
        let err = parse("C4/4 X9/4").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownPitch {
                pitch: "X".to_string(),
                token: "X9/4".to_string(),
            }
        );
        assert_eq!(err.offending_token(), Some("X9/4"));
    }

    #[test]
    fn whitespace_is_strict() {
        assert!(parse("C4/4  D4/4").is_err());
        assert!(parse(" C4/4").is_err());
        assert!(parse("C4/4 ").is_err());
        assert!(parse("").is_err());
    }

    #[test]
    fn parse_resolved_matches_token_resolution() {
        let notes = parse_resolved("A4/4 _/4").unwrap();
        assert_eq!(notes[0].frequency_hz, Some(440.0));
        assert!(notes[1].is_rest());
    }
}
