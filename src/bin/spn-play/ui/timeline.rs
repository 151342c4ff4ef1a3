//! Timeline widget - one row per voice, note spans and a playhead

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::{ClockSnapshot, UiStateInit};

const LABEL_WIDTH: u16 = 14;

pub fn render_timeline(
    frame: &mut Frame,
    area: Rect,
    static_state: &UiStateInit,
    snapshot: &ClockSnapshot,
) {
    if area.height < 2 || area.width < LABEL_WIDTH + 10 {
        return;
    }

    let width = area.width.saturating_sub(LABEL_WIDTH + 1) as usize;
    let total = static_state.finish_time.max(f64::EPSILON);
    let seconds_per_char = total / width as f64;
    let playhead = ((snapshot.time / seconds_per_char) as usize).min(width.saturating_sub(1));

    let mut lines = Vec::new();

    // Second markers
    let mut markers = " ".repeat(LABEL_WIDTH as usize);
    let mut next_second = 0.0;
    for column in 0..width {
        let t = column as f64 * seconds_per_char;
        if t >= next_second {
            markers.push('|');
            next_second += 1.0_f64.max(seconds_per_char);
        } else {
            markers.push(' ');
        }
    }
    lines.push(Line::from(Span::styled(
        markers,
        Style::default().fg(Color::DarkGray),
    )));

    for (index, voice) in static_state.voices.iter().enumerate() {
        let active = snapshot.active.get(index).copied().unwrap_or(false);
        let label_color = if active { Color::White } else { Color::DarkGray };
        let label = format!(
            "{:<width$}",
            format!("{}:{}", index + 1, voice.label),
            width = LABEL_WIDTH as usize
        );

        let row: String = (0..width)
            .map(|column| {
                let t = (column as f64 + 0.5) * seconds_per_char;
                if voice.spans.iter().any(|&(start, end)| t >= start && t < end) {
                    '▓'
                } else {
                    '░'
                }
            })
            .collect();

        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(label_color)),
            Span::styled(
                row,
                Style::default().fg(if active { Color::Cyan } else { Color::DarkGray }),
            ),
        ]));
    }

    let mut playhead_row = " ".repeat(LABEL_WIDTH as usize);
    playhead_row.extend((0..width).map(|c| if c == playhead { '▲' } else { ' ' }));
    lines.push(Line::from(Span::styled(
        playhead_row,
        Style::default().fg(Color::Yellow),
    )));

    frame.render_widget(Paragraph::new(lines), area);
}
