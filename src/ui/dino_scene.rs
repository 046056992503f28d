//! Dino Dash scene: play field, status bar and info panel.

use super::canvas::Canvas;
use super::game_common::{info_block, GameLayout, StatusBar};
use crate::assets::SpriteAtlas;
use crate::game::session::GameSession;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 20;

/// Render the whole game screen into `area`.
pub fn render_dino_scene(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    atlas: &SpriteAtlas,
    release_events: bool,
) {
    let layout = GameLayout::draw_frame(
        frame,
        area,
        " Dino Dash ",
        Color::LightYellow,
        INFO_PANEL_WIDTH,
    );

    render_play_field(frame, layout.play_field, session, atlas);
    render_status_bar_content(frame, layout.status_bar, session, release_events);
    render_info_panel(frame, layout.info_panel, session);
}

/// Draw the session into a canvas sized to the play field and stamp it.
fn render_play_field(frame: &mut Frame, area: Rect, session: &GameSession, atlas: &SpriteAtlas) {
    if area.width < 10 || area.height < 4 {
        return;
    }
    let config = session.config();
    let mut canvas = Canvas::new(
        area.width,
        area.height,
        config.screen_width,
        config.screen_height,
    );
    session.draw(&mut canvas, atlas);
    canvas.render(frame, area);
}

fn render_status_bar_content(
    frame: &mut Frame,
    area: Rect,
    session: &GameSession,
    release_events: bool,
) {
    if session.game_over {
        StatusBar {
            message: "Crashed!",
            color: Color::LightRed,
            hints: &[("[R]", "Restart"), ("[Esc]", "Quit")],
        }
        .render(frame, area);
        return;
    }

    let crouch_hint = if release_events {
        "Crouch (hold)"
    } else if session.player.crouching {
        "Stand"
    } else {
        "Crouch"
    };
    StatusBar {
        message: "Run!",
        color: Color::LightYellow,
        hints: &[
            ("[Space/Up]", "Jump"),
            ("[Down]", crouch_hint),
            ("[Esc]", "Quit"),
        ],
    }
    .render(frame, area);
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &GameSession) {
    let inner = info_block(frame, area);

    let label = Style::default().fg(Color::DarkGray);
    let seconds = session.tick_count() / u64::from(session.config().tick_rate.max(1));

    let lines: Vec<Line> = vec![
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                session.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Time: ", label),
            Span::styled(format!("{}s", seconds), Style::default().fg(Color::White)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Pose: ", label),
            Span::styled(
                session.player.pose().name(),
                Style::default().fg(Color::LightYellow),
            ),
        ]),
        Line::from(vec![
            Span::styled("On screen: ", label),
            Span::styled(
                session.obstacles.len().to_string(),
                Style::default().fg(Color::White),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
