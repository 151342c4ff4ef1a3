/// What was wrong with a malformed notation unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The unit did not split into exactly one pitch part and one duration part.
    Split,
    /// The pitch part was empty.
    Pitch,
    /// The octave suffix was missing or not an integer.
    Octave,
    /// The duration was not a positive integer denominator with an optional dot.
    Duration,
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            ParseErrorKind::Split => "expected <pitch>/<duration>",
            ParseErrorKind::Pitch => "missing pitch",
            ParseErrorKind::Octave => "octave must be an integer",
            ParseErrorKind::Duration => "duration must be a positive integer, optionally dotted",
        };
        f.write_str(reason)
    }
}

/// Crate-level error type.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A notation unit is structurally malformed.
    #[error("invalid unit `{token}`: {kind}")]
    Parse { token: String, kind: ParseErrorKind },

    /// The pitch name is not one of the twelve recognized semitone names.
    #[error("invalid note `{pitch}` in unit `{token}`")]
    UnknownPitch { pitch: String, token: String },

    /// Tempo handed to the schedule builder is not a positive number.
    #[error("tempo must be a positive number of beats per minute, got {bpm}")]
    InvalidTempo { bpm: f64 },

    /// One voice of a session failed to build.
    #[error("voice {index}: {source}")]
    Voice {
        index: usize,
        #[source]
        source: Box<Error>,
    },

    /// A settings value lies outside the range the editor accepts.
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("unknown waveform `{0}`")]
    UnknownWaveform(String),
}

impl Error {
    /// The raw notation unit responsible for this error, if any.
    ///
    /// Editors use this to highlight the offending text inline.
    pub fn offending_token(&self) -> Option<&str> {
        match self {
            Error::Parse { token, .. } | Error::UnknownPitch { token, .. } => Some(token),
            Error::Voice { source, .. } => source.offending_token(),
            _ => None,
        }
    }

    pub(crate) fn parse(token: &str, kind: ParseErrorKind) -> Self {
        Error::Parse {
            token: token.to_string(),
            kind,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offending_token_unwraps_voice_errors() {
        let err = Error::Voice {
            index: 2,
            source: Box::new(Error::parse("C4/0", ParseErrorKind::Duration)),
        };
        assert_eq!(err.offending_token(), Some("C4/0"));
        assert_eq!(
            err.to_string(),
            "voice 2: invalid unit `C4/0`: duration must be a positive integer, optionally dotted"
        );
    }

    #[test]
    fn tempo_errors_have_no_token() {
        assert_eq!(Error::InvalidTempo { bpm: 0.0 }.offending_token(), None);
    }
}
