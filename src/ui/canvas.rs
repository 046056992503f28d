//! Terminal `Surface`: a cell buffer addressed in world pixels.
//!
//! Draw calls arrive in world coordinates and are scaled onto a grid of
//! terminal cells. Each cell keeps its own foreground and background so
//! sprites without a background let whatever was drawn before show through.
//! The finished buffer is stamped row by row as styled spans.

use crate::assets::Sprite;
use crate::game::types::Rect;
use crate::surface::{Rgb, Surface};
use ratatui::{
    layout::Rect as Area,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

#[derive(Debug, Clone)]
pub struct Canvas {
    cols: u16,
    rows: u16,
    world_width: f32,
    world_height: f32,
    cells: Vec<Cell>,
}

impl Canvas {
    /// Canvas of `cols` x `rows` cells showing a `world_width` x
    /// `world_height` world.
    pub fn new(cols: u16, rows: u16, world_width: f32, world_height: f32) -> Self {
        Self {
            cols,
            rows,
            world_width: world_width.max(1.0),
            world_height: world_height.max(1.0),
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    #[cfg(test)]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    #[cfg(test)]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    /// Text of one row, for assertions and debugging.
    #[cfg(test)]
    pub fn row_text(&self, row: u16) -> String {
        (0..self.cols)
            .filter_map(|col| self.cell(col, row))
            .map(|c| c.ch)
            .collect()
    }

    /// World x to fractional cell column.
    fn col_at(&self, x: f32) -> f32 {
        x * self.cols as f32 / self.world_width
    }

    /// World y to fractional cell row.
    fn row_at(&self, y: f32) -> f32 {
        y * self.rows as f32 / self.world_height
    }

    fn cell_mut(&mut self, col: usize, row: usize) -> &mut Cell {
        let cols = self.cols as usize;
        &mut self.cells[row * cols + col]
    }

    /// Cell columns and rows touched by a world-space box, clipped to the
    /// canvas. None when nothing is visible.
    fn span(&self, rect: Rect) -> Option<(Range<usize>, Range<usize>)> {
        let clip = |lo: f32, hi: f32, max: u16| -> Option<Range<usize>> {
            let start = lo.floor().max(0.0) as usize;
            let end = (hi.ceil().max(0.0) as usize).min(max as usize);
            (start < end).then_some(start..end)
        };
        let cols = clip(self.col_at(rect.left()), self.col_at(rect.right()), self.cols)?;
        let rows = clip(self.row_at(rect.top()), self.row_at(rect.bottom()), self.rows)?;
        Some((cols, rows))
    }

    /// Stamp the buffer onto the frame with its top-left corner at `area`.
    pub fn render(&self, frame: &mut Frame, area: Area) {
        let width = self.cols.min(area.width);
        let height = self.rows.min(area.height);

        for row in 0..height {
            let mut spans: Vec<Span> = Vec::new();
            let mut current_fg = Color::Reset;
            let mut current_bg = Color::Reset;
            let mut current_text = String::new();

            for col in 0..width {
                let Some(&cell) = self.cell(col, row) else {
                    continue;
                };
                if (cell.fg != current_fg || cell.bg != current_bg) && !current_text.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current_text),
                        Style::default().fg(current_fg).bg(current_bg),
                    ));
                }
                current_fg = cell.fg;
                current_bg = cell.bg;
                current_text.push(cell.ch);
            }
            if !current_text.is_empty() {
                spans.push(Span::styled(
                    current_text,
                    Style::default().fg(current_fg).bg(current_bg),
                ));
            }

            let row_area = Area::new(area.x, area.y + row, width, 1);
            frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
        }
    }
}

impl Surface for Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let Some((cols, rows)) = self.span(rect) else {
            return;
        };
        let bg = to_color(color);
        for row in rows {
            for col in cols.clone() {
                *self.cell_mut(col, row) = Cell {
                    ch: ' ',
                    fg: Color::Reset,
                    bg,
                };
            }
        }
    }

    fn blit(&mut self, sprite: &Sprite, x: f32, y: f32) {
        let dest = Rect::new(x, y, sprite.width, sprite.height);
        let Some((cols, rows)) = self.span(dest) else {
            return;
        };
        let fg = to_color(sprite.fg);
        let bg = sprite.bg.map(to_color);
        let cell_width = self.world_width / self.cols as f32;
        for row in rows {
            for col in cols.clone() {
                // Sample the pattern at the cell's center
                let world_x = (col as f32 + 0.5) * cell_width;
                let ch = sprite.glyph_at(world_x - x);
                let cell = self.cell_mut(col, row);
                cell.ch = ch;
                cell.fg = fg;
                if let Some(bg) = bg {
                    cell.bg = bg;
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb) {
        let row = self.row_at(y).floor();
        if row < 0.0 || row >= self.rows as f32 {
            return;
        }
        let row = row as usize;
        let start = self.col_at(x).floor().max(0.0) as usize;
        let fg = to_color(color);
        for (i, ch) in text.chars().enumerate() {
            let col = start + i;
            if col >= self.cols as usize {
                break;
            }
            let cell = self.cell_mut(col, row);
            cell.ch = ch;
            cell.fg = fg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{SpriteAtlas, SpriteRole};
    use ratatui::{backend::TestBackend, Terminal};

    /// 80x40 cells over the default 800x400 world: 10 world px per cell.
    fn canvas() -> Canvas {
        Canvas::new(80, 40, 800.0, 400.0)
    }

    #[test]
    fn test_new_canvas_is_blank() {
        let c = canvas();
        assert_eq!(c.cols(), 80);
        assert_eq!(c.rows(), 40);
        assert_eq!(c.cell(0, 0), Some(&Cell::default()));
        assert_eq!(c.cell(80, 0), None);
        assert_eq!(c.cell(0, 40), None);
    }

    #[test]
    fn test_fill_rect_maps_world_to_cells() {
        let mut c = canvas();
        c.fill_rect(Rect::new(0.0, 300.0, 800.0, 100.0), Rgb::GROUND);
        let ground = Color::Rgb(160, 82, 45);
        assert_eq!(c.cell(0, 30).map(|cell| cell.bg), Some(ground));
        assert_eq!(c.cell(79, 39).map(|cell| cell.bg), Some(ground));
        assert_eq!(c.cell(0, 29).map(|cell| cell.bg), Some(Color::Reset));
    }

    #[test]
    fn test_fill_rect_partial_cells_are_covered() {
        let mut c = canvas();
        c.fill_rect(Rect::new(15.0, 15.0, 10.0, 10.0), Rgb::RED);
        let red = Color::Rgb(255, 0, 0);
        // 15..25 spans cells 1 and 2 on both axes
        for (col, row) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
            assert_eq!(c.cell(col, row).map(|cell| cell.bg), Some(red));
        }
        assert_eq!(c.cell(0, 1).map(|cell| cell.bg), Some(Color::Reset));
        assert_eq!(c.cell(3, 1).map(|cell| cell.bg), Some(Color::Reset));
    }

    #[test]
    fn test_offscreen_draws_are_clipped() {
        let mut c = canvas();
        c.fill_rect(Rect::new(-100.0, -100.0, 50.0, 50.0), Rgb::RED);
        c.fill_rect(Rect::new(900.0, 0.0, 50.0, 50.0), Rgb::RED);
        assert!(c.cells.iter().all(|cell| *cell == Cell::default()));

        c.fill_rect(Rect::new(790.0, 390.0, 100.0, 100.0), Rgb::RED);
        assert_eq!(c.cell(79, 39).map(|cell| cell.bg), Some(Color::Rgb(255, 0, 0)));
    }

    #[test]
    fn test_blit_uses_sprite_size_and_keeps_background() {
        let atlas = SpriteAtlas::builtin().unwrap();
        let mut c = canvas();
        c.fill_rect(Rect::new(0.0, 0.0, 800.0, 400.0), Rgb::SKY_BLUE);
        c.blit(atlas.sprite(SpriteRole::PlayerRun), 50.0, 200.0);

        // 100x100 sprite at (50, 200) covers cols 5..15, rows 20..30
        let inside = c.cell(5, 20).copied().unwrap();
        assert_eq!(inside.ch, '█');
        assert_eq!(inside.bg, Color::Rgb(135, 206, 235));
        assert_eq!(c.cell(14, 29).map(|cell| cell.ch), Some('█'));
        assert_eq!(c.cell(15, 29).map(|cell| cell.ch), Some(' '));
        assert_eq!(c.cell(5, 30).map(|cell| cell.ch), Some(' '));
    }

    #[test]
    fn test_blit_pattern_follows_sprite_offset() {
        let atlas = SpriteAtlas::builtin().unwrap();
        let ground = atlas.sprite(SpriteRole::GroundTexture);

        let mut a = canvas();
        a.blit(ground, 0.0, 300.0);
        let mut b = canvas();
        b.blit(ground, -20.0, 300.0);

        // Shifting the sprite two cells left shifts its pattern too
        assert_eq!(a.cell(2, 30).map(|c| c.ch), b.cell(0, 30).map(|c| c.ch));
        assert_eq!(a.cell(0, 30).map(|c| c.ch), Some('░'));
        assert_eq!(b.cell(0, 30).map(|c| c.ch), Some('▒'));
    }

    #[test]
    fn test_draw_text() {
        let mut c = canvas();
        c.draw_text("Score: 3", 10.0, 10.0, Rgb::BLACK);
        assert!(c.row_text(1).starts_with(" Score: 3 "));

        // Text running past the right edge is cut off
        c.draw_text("overflow", 780.0, 0.0, Rgb::BLACK);
        assert!(c.row_text(0).ends_with("ov"));

        // Rows outside the canvas are ignored
        c.draw_text("hidden", 0.0, 500.0, Rgb::BLACK);
    }

    #[test]
    fn test_render_to_terminal() {
        let mut c = Canvas::new(20, 4, 800.0, 400.0);
        c.draw_text("Hi", 0.0, 0.0, Rgb::RED);
        let backend = TestBackend::new(20, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| c.render(frame, frame.size()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.get(0, 0).symbol(), "H");
        assert_eq!(buffer.get(1, 0).symbol(), "i");
        assert_eq!(buffer.get(0, 0).fg, Color::Rgb(255, 0, 0));
    }
}
