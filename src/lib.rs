pub mod config; // Editor settings, ranges and presets
pub mod error;
pub mod notation; // Text -> note tokens
pub mod playback; // Clock, transport and offline renderer
pub mod schedule; // Note tokens -> timed envelopes

pub use error::{Error, Result};

/// Largest block the player binary renders in one go.
pub const MAX_BLOCK_SIZE: usize = 2048;
