use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{GridSize, PixelStyle};
use crate::game::{GameStatus, Snapshot};
use crate::score::RunRecord;
use crate::session::RunSummary;
use crate::snake::Position;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{
    render_game_over_menu, render_history_panel, render_pause_menu, render_start_menu,
};

/// Terminal columns per grid cell, so cells look roughly square.
const CELL_WIDTH: u16 = 2;

const COLOR_HEAD: Color = Color::LightGreen;
const COLOR_BODY: Color = Color::Green;
const COLOR_FOOD: Color = Color::Red;
const COLOR_BORDER: Color = Color::DarkGray;

/// Everything the frame shows besides the game snapshot.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub hud: HudInfo,
    pub last_run: Option<RunSummary>,
    /// Present while the history panel is open.
    pub history: Option<&'a [RunRecord]>,
}

/// Renders the full game frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, view: &View<'_>) {
    let area = frame.area();
    let play_area = render_hud(frame, area, snapshot, &view.hud);
    let board = board_area(play_area, snapshot.grid);

    let block = Block::bordered().border_style(Style::new().fg(COLOR_BORDER));
    let inner = block.inner(board);
    frame.render_widget(block, board);

    render_food(frame, inner, snapshot, view.hud.pixel_style);
    render_snake(frame, inner, snapshot, view.hud.pixel_style);

    if let Some(runs) = view.history {
        render_history_panel(frame, board, runs);
        return;
    }

    match snapshot.status {
        GameStatus::Idle => {
            render_start_menu(frame, board, view.hud.high_score, view.hud.difficulty);
        }
        GameStatus::Paused => render_pause_menu(frame, board),
        GameStatus::Ended => render_game_over_menu(
            frame,
            board,
            snapshot.score,
            view.last_run,
            snapshot.death_reason,
        ),
        GameStatus::Running => {}
    }
}

fn board_area(area: Rect, grid: GridSize) -> Rect {
    let width = grid.width.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid.height.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, style: PixelStyle) {
    let Some(food) = snapshot.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, food_glyph(style), Style::new().fg(COLOR_FOOD));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, style: PixelStyle) {
    let buffer = frame.buffer_mut();
    for (index, segment) in snapshot.snake.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                segment_glyph(style),
                Style::new().fg(COLOR_HEAD).add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(x, y, segment_glyph(style), Style::new().fg(COLOR_BODY));
        }
    }
}

fn segment_glyph(style: PixelStyle) -> &'static str {
    match style {
        PixelStyle::Bit8 => "▪▪",
        PixelStyle::Bit16 => "██",
    }
}

fn food_glyph(style: PixelStyle) -> &'static str {
    match style {
        PixelStyle::Bit8 => "▪▪",
        PixelStyle::Bit16 => "██",
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x + CELL_WIDTH > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
