//! Transport bar widget - shows play state, position and finish time

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use spn_player::playback::PlaybackState;

use super::{ClockSnapshot, UiStateInit};

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    static_state: &UiStateInit,
    snapshot: &ClockSnapshot,
) {
    let block = Block::default().title(" spn-play ").borders(Borders::ALL);

    let (symbol, color) = match snapshot.state {
        PlaybackState::Running => ("▶", Color::Green),
        PlaybackState::Suspended => ("⏸", Color::Yellow),
        PlaybackState::Closed => ("■", Color::Red),
    };

    let progress = if static_state.finish_time > 0.0 {
        (snapshot.time / static_state.finish_time * 100.0).min(100.0)
    } else {
        100.0
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} {}  ", symbol, snapshot.state),
            Style::default().fg(color),
        ),
        Span::styled(
            format!(
                "{:6.2}s / {:.2}s  ",
                snapshot.time, static_state.finish_time
            ),
            Style::default().fg(Color::White),
        ),
        Span::styled(format!("{progress:3.0}%  "), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!("{} voices  ", static_state.voices.len()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz", static_state.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
