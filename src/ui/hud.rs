use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::{Difficulty, PixelStyle};
use crate::game::{GameStatus, Snapshot};

const SEPARATOR: &str = " │ ";

/// Host-side values shown next to the board.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub pixel_style: PixelStyle,
}

/// Renders the one-line HUD below the board and returns the area above it.
#[must_use]
pub fn render_hud(
    frame: &mut Frame<'_>,
    area: Rect,
    snapshot: &Snapshot,
    info: &HudInfo,
) -> Rect {
    let [play_area, hud_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot, info, usize::from(hud_area.width)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}

fn info_line(snapshot: &Snapshot, info: &HudInfo, available_width: usize) -> Line<'static> {
    let compact = full_width(snapshot, info) > available_width;
    let labels = if compact {
        ["L", "S", "H", "D"]
    } else {
        ["Length", "Score", "Hi", "Speed"]
    };
    let new_high = snapshot.score > info.high_score;
    let score_style = if new_high {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let plain = Style::default().fg(Color::White);

    Line::from(vec![
        Span::raw(format!("{}: ", labels[0])),
        Span::styled(snapshot.snake.len().to_string(), plain),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[1])),
        Span::styled(snapshot.score.to_string(), score_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[2])),
        Span::styled(
            info.high_score.max(snapshot.score).to_string(),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", labels[3])),
        Span::styled(info.difficulty.label(), Style::default().fg(Color::Cyan)),
        Span::raw(SEPARATOR),
        Span::styled(
            status_label(snapshot.status),
            Style::default().fg(Color::Green),
        ),
    ])
}

fn full_width(snapshot: &Snapshot, info: &HudInfo) -> usize {
    let separators = SEPARATOR.chars().count() * 4;
    format!("Length: {}", snapshot.snake.len()).len()
        + format!("Score: {}", snapshot.score).len()
        + format!("Hi: {}", info.high_score.max(snapshot.score)).len()
        + format!("Speed: {}", info.difficulty.label()).len()
        + status_label(snapshot.status).len()
        + separators
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Idle => "ready",
        GameStatus::Running => "running",
        GameStatus::Paused => "paused",
        GameStatus::Ended => "over",
    }
}
