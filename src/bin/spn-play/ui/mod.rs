//! TUI module for spn-play
//!
//! Shows the transport, a per-voice timeline and recent log lines, and turns
//! key presses into control messages for the audio thread.

pub mod state;
mod timeline;
mod transport;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use spn_player::playback::{ControlMessage, FinishMonitor};

use crate::logger::UiLogger;

pub use state::{ClockSnapshot, UiStateInit};

use timeline::render_timeline;
use transport::render_transport;

/// How often the finish time is checked, also the redraw interval
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Why the UI loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Finished,
    Stopped,
}

pub struct UiApp {
    control_tx: Producer<ControlMessage>,
    snapshot_rx: Consumer<ClockSnapshot>,
    static_state: UiStateInit,
    snapshot: ClockSnapshot,
    monitor: FinishMonitor,
    logger: Option<&'static UiLogger>,
    exit: Option<Exit>,
}

impl UiApp {
    pub fn new(
        control_tx: Producer<ControlMessage>,
        snapshot_rx: Consumer<ClockSnapshot>,
        static_state: UiStateInit,
        logger: Option<&'static UiLogger>,
    ) -> Self {
        let monitor = FinishMonitor::new(static_state.finish_time);
        Self {
            control_tx,
            snapshot_rx,
            static_state,
            snapshot: ClockSnapshot::default(),
            monitor,
            logger,
            exit: None,
        }
    }

    /// Run until playback finishes or the user stops it.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<Exit> {
        loop {
            self.poll_snapshots();

            if self.monitor.poll(&self.snapshot) {
                log::info!("finished after {:.2}s", self.snapshot.time);
                self.exit = Some(Exit::Finished);
            }
            if let Some(exit) = self.exit {
                return Ok(exit);
            }

            terminal.draw(|frame| self.render(frame))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
    }

    /// Keep only the latest clock reading, logging transport changes
    fn poll_snapshots(&mut self) {
        while let Ok(snapshot) = self.snapshot_rx.pop() {
            if let Some((from, to)) = snapshot.state_change(&self.snapshot) {
                log::info!("playback {from} -> {to} at {:.2}s", snapshot.time);
            }
            self.snapshot = snapshot;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.send(ControlMessage::Stop);
                self.exit = Some(Exit::Stopped);
            }
            KeyCode::Char(' ') => {
                if self.snapshot.state.can_suspend() {
                    self.send(ControlMessage::Suspend);
                } else if self.snapshot.state.can_resume() {
                    self.send(ControlMessage::Resume);
                }
            }
            _ => {}
        }
    }

    fn send(&mut self, message: ControlMessage) {
        if self.control_tx.push(message).is_err() {
            log::warn!("control queue full, dropped {message:?}");
        }
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(4),    // Timeline
                Constraint::Length(7), // Log
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_transport(frame, chunks[0], &self.static_state, &self.snapshot);

        let timeline_block = Block::default().title(" Voices ").borders(Borders::ALL);
        let timeline_inner = timeline_block.inner(chunks[1]);
        frame.render_widget(timeline_block, chunks[1]);
        render_timeline(frame, timeline_inner, &self.static_state, &self.snapshot);

        self.render_log(frame, chunks[2]);

        let pause_label = if self.snapshot.state.can_resume() {
            "Resume"
        } else {
            "Suspend"
        };
        let help = Paragraph::new(format!(" [Q] Stop  [Space] {pause_label}"))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }

    fn render_log(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().title(" Log ").borders(Borders::ALL);
        let rows = block.inner(area).height as usize;

        let lines: Vec<Line> = self
            .logger
            .map(|logger| logger.recent(rows))
            .unwrap_or_default()
            .into_iter()
            .map(|(level, text)| {
                let color = match level {
                    log::Level::Error => Color::Red,
                    log::Level::Warn => Color::Yellow,
                    log::Level::Info => Color::White,
                    _ => Color::DarkGray,
                };
                Line::from(Span::styled(text, Style::default().fg(color)))
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}
