//! Log sink for the TUI: records go into a bounded in-memory buffer that the
//! log pane drains, since stderr is hidden behind the alternate screen.

use std::collections::VecDeque;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Lines kept for the log pane
const CAPACITY: usize = 64;

pub struct UiLogger {
    lines: Mutex<VecDeque<(Level, String)>>,
}

static LOGGER: UiLogger = UiLogger {
    lines: Mutex::new(VecDeque::new()),
};

/// Install the logger. `SPN_LOG=debug` (or trace, warn, ...) raises the level.
pub fn init() -> Result<&'static UiLogger, log::SetLoggerError> {
    let level = std::env::var("SPN_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(&LOGGER)
}

impl UiLogger {
    /// Most recent `count` lines, oldest first.
    pub fn recent(&self, count: usize) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(lines) => lines
                .iter()
                .skip(lines.len().saturating_sub(count))
                .cloned()
                .collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl Log for UiLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut lines) = self.lines.lock() {
            if lines.len() == CAPACITY {
                lines.pop_front();
            }
            lines.push_back((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}
