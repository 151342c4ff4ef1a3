// Purpose: text notation -> typed note events
// Pure functions only, nothing here knows about time in seconds.

pub mod duration;
pub mod parser;
pub mod pitch;

pub use duration::Duration;
pub use parser::{parse, parse_resolved, parse_unit, NoteToken, ResolvedNote};
pub use pitch::{resolve, Pitch, PitchClass};
