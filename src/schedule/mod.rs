// Purpose: note events -> absolute start/stop times and gain envelopes
// This layer sits above notation and knows tempo, ADSR and waveform.

pub mod builder;
pub mod envelope;
pub mod session;
pub mod waveform;

pub use builder::{build_schedule, NoteEvent, ScheduleBuilder, ScheduleEntry, VoiceSchedule};
pub use envelope::{Adsr, Breakpoint, Envelope, EnvelopeStage, RELEASE_FLOOR};
pub use session::{build_session, Session, Voice};
pub use waveform::Waveform;
