//! Screen chrome around the play field: outer frame, status bar, info panel.
//!
//! ```text
//! ┌─ Title ─────────────────────────┬─ Info ──────┐
//! │   [play field]                  │  [info]     │
//! │ [status: message]               │             │
//! │ [status: key hints]             │             │
//! └─────────────────────────────────┴─────────────┘
//! ```

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Lines reserved under the play field for the status bar.
const STATUS_BAR_HEIGHT: u16 = 2;

/// Areas inside the outer frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameLayout {
    pub play_field: Rect,
    pub status_bar: Rect,
    pub info_panel: Rect,
}

impl GameLayout {
    /// Clear `area`, draw the titled outer border and split its interior.
    pub fn draw_frame(
        frame: &mut Frame,
        area: Rect,
        title: &str,
        accent: Color,
        info_width: u16,
    ) -> Self {
        frame.render_widget(Clear, area);
        let border = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(accent));
        let inner = border.inner(area);
        frame.render_widget(border, area);
        Self::split(inner, info_width)
    }

    /// Split an interior area without drawing anything.
    pub fn split(inner: Rect, info_width: u16) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(info_width)])
            .split(inner);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(4), Constraint::Length(STATUS_BAR_HEIGHT)])
            .split(columns[0]);

        Self {
            play_field: left[0],
            status_bar: left[1],
            info_panel: columns[1],
        }
    }
}

/// Message line plus `[key] action` hints.
pub struct StatusBar<'a> {
    pub message: &'a str,
    pub color: Color,
    pub hints: &'a [(&'a str, &'a str)],
}

impl StatusBar<'_> {
    fn hint_line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.hints.len() * 3);
        for (key, action) in self.hints {
            if !spans.is_empty() {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key.to_string(), Style::default().fg(Color::White)));
            spans.push(Span::styled(
                format!(" {}", action),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let message = Paragraph::new(self.message)
            .style(Style::default().fg(self.color))
            .alignment(Alignment::Center);
        frame.render_widget(message, Rect { height: 1, ..area });

        if area.height < STATUS_BAR_HEIGHT || self.hints.is_empty() {
            return;
        }
        let hints = Paragraph::new(self.hint_line()).alignment(Alignment::Center);
        frame.render_widget(
            hints,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Bordered " Info " box. Returns the area inside it.
pub fn info_block(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}
