//! Frame rendering: board and tiles, in-flight slide offsets, control
//! buttons, status banner.

use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Paragraph};
use ratatui::Frame;

use crate::app::{App, HitAreas};

/// Palette: dark-blue backdrop, orange tiles and accents, light-blue
/// buttons.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub tile_text: Color,
    pub button: Color,
    pub hint: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(35, 47, 62),
            accent: Color::Rgb(255, 153, 0),
            tile_text: Color::White,
            button: Color::Rgb(0, 119, 182),
            hint: Color::Gray,
        }
    }
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    let theme = app.theme;
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let size = app.board.size() as u16;
    let tile_w = (area.width.saturating_sub(2) / size).clamp(3, 8);
    let tile_h = (area.height.saturating_sub(7) / size).clamp(2, 4);
    let board_w = tile_w * size + 2;
    let board_h = tile_h * size + 2;

    let [column] = Layout::horizontal([Constraint::Length(board_w.max(29))])
        .flex(Flex::Center)
        .areas(area);
    let [board_area, banner_area, control_area, hint_area] = Layout::vertical([
        Constraint::Length(board_h),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .areas(column);

    let board_block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.accent));
    let grid = board_block.inner(board_area);
    frame.render_widget(board_block, board_area);

    // Settled tiles; the cell of an in-flight tile is drawn separately.
    let sliding = sliding_cell(app);
    for y in 0..app.board.size() {
        for x in 0..app.board.size() {
            if sliding == Some((x, y)) {
                continue;
            }
            if let Some(tile) = app.board.tile(x, y) {
                let rect = tile_rect(grid, tile_w, tile_h, x, y);
                render_tile(frame, rect, tile, theme);
            }
        }
    }

    // The in-flight tile glides from its cell toward the blank.
    if let (Some((cx, cy)), Some(anim)) = (sliding, app.animation) {
        if let Some(tile) = app.board.tile(cx, cy) {
            let (dx, dy) = anim.mv.delta();
            let shift_x = (tile_w * anim.frame / anim.total) as i32 * -(dx as i32);
            let shift_y = (tile_h * anim.frame / anim.total) as i32 * -(dy as i32);

            let base = tile_rect(grid, tile_w, tile_h, cx, cy);
            let rect = Rect::new(
                (base.x as i32 + shift_x).max(0) as u16,
                (base.y as i32 + shift_y).max(0) as u16,
                base.width,
                base.height,
            );
            render_tile(frame, rect.intersection(grid), tile, theme);
        }
    }

    if let Some(status) = app.status() {
        frame.render_widget(
            Line::styled(
                status,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )
            .centered(),
            banner_area,
        );
    }

    let [reset, new, solve] = Layout::horizontal([Constraint::Length(9); 3])
        .flex(Flex::SpaceBetween)
        .areas(control_area);
    render_button(frame, reset, "Reset", theme);
    render_button(frame, new, "New", theme);
    render_button(frame, solve, "Solve", theme);

    frame.render_widget(
        Line::styled("arrows slide · n new · q quit", Style::default().fg(theme.hint)).centered(),
        hint_area,
    );

    app.hit = HitAreas {
        board: grid,
        tile_w,
        tile_h,
        reset,
        new,
        solve,
    };
}

/// Board cell of the tile currently animating, if any: the blank's neighbor
/// in the move's direction.
fn sliding_cell(app: &App) -> Option<(usize, usize)> {
    let anim = app.animation?;
    let (dx, dy) = anim.mv.delta();
    let (bx, by) = app.board.blank();
    let x = bx as isize + dx;
    let y = by as isize + dy;
    let size = app.board.size() as isize;
    if x >= 0 && x < size && y >= 0 && y < size {
        Some((x as usize, y as usize))
    } else {
        None
    }
}

fn tile_rect(grid: Rect, tile_w: u16, tile_h: u16, x: usize, y: usize) -> Rect {
    Rect::new(
        grid.x + x as u16 * tile_w,
        grid.y + y as u16 * tile_h,
        tile_w,
        tile_h,
    )
}

fn render_tile(frame: &mut Frame, rect: Rect, tile: u8, theme: Theme) {
    // Clip instead of panicking when the terminal is too small for the grid.
    let rect = rect.intersection(frame.area());
    if rect.is_empty() {
        return;
    }
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.background))
        .style(Style::default().bg(theme.accent));

    let pad = rect.height.saturating_sub(3) / 2;
    let mut lines = vec![Line::raw(""); pad as usize];
    lines.push(Line::styled(
        tile.to_string(),
        Style::default()
            .fg(theme.tile_text)
            .add_modifier(Modifier::BOLD),
    ));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        rect,
    );
}

fn render_button(frame: &mut Frame, rect: Rect, label: &str, theme: Theme) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.tile_text))
        .style(Style::default().bg(theme.button));
    frame.render_widget(
        Paragraph::new(Line::styled(
            label,
            Style::default().fg(theme.tile_text),
        ))
        .alignment(Alignment::Center)
        .block(block),
        rect,
    );
}
