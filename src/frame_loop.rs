//! Frame loop: drives the session at a fixed tick rate on one thread.
//!
//! Each iteration drains pending input, feeds elapsed time into the
//! session's fixed-step accumulator, redraws, then sleeps until the next
//! tick boundary. A quit request ends the loop after the current iteration.

use crate::assets::SpriteAtlas;
use crate::config::GameConfig;
use crate::game::session::GameSession;
use crate::input::{Command, InputState, KeyMapper};
use crate::ui;
use crossterm::event::{self, Event};
use rand::Rng;
use ratatui::{backend::Backend, Frame, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Whether the loop should keep running after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Quit,
}

pub struct FrameLoop<R: Rng> {
    config: GameConfig,
    session: GameSession,
    /// Acquired once at startup, released when the loop is dropped.
    atlas: SpriteAtlas,
    rng: R,
    keys: KeyMapper,
}

impl<R: Rng> FrameLoop<R> {
    pub fn new(config: GameConfig, atlas: SpriteAtlas, rng: R, release_events: bool) -> Self {
        Self {
            session: GameSession::new(config.clone()),
            config,
            atlas,
            rng,
            keys: KeyMapper::new(release_events),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Translate one terminal event and apply it to the session.
    pub fn handle_event(&mut self, event: &Event) -> LoopControl {
        let state = InputState {
            game_over: self.session.game_over,
            crouching: self.session.player.crouching,
        };
        match self.keys.map(event, state) {
            Some(Command::Quit) => LoopControl::Quit,
            Some(command) => {
                tracing::trace!(?command, "input");
                self.session.apply(command);
                LoopControl::Continue
            }
            None => LoopControl::Continue,
        }
    }

    /// Advance the simulation by `dt` of wall-clock time.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        let was_over = self.session.game_over;
        let ticks = self.session.advance(dt, &mut self.rng);
        if !was_over && self.session.game_over {
            tracing::info!(score = self.session.score, "game over");
        }
        ticks
    }

    pub fn draw(&self, frame: &mut Frame) {
        ui::render_dino_scene(
            frame,
            frame.size(),
            &self.session,
            &self.atlas,
            self.keys.release_events(),
        );
    }

    /// Run until a quit command arrives.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let tick = self.config.tick_interval();
        tracing::info!(
            tick_rate = self.config.tick_rate,
            release_events = self.keys.release_events(),
            "frame loop started"
        );

        let mut last_frame = Instant::now();
        let mut next_tick = last_frame + tick;

        loop {
            let mut control = LoopControl::Continue;
            while event::poll(Duration::ZERO)? {
                if self.handle_event(&event::read()?) == LoopControl::Quit {
                    control = LoopControl::Quit;
                }
            }

            let now = Instant::now();
            self.advance(now - last_frame);
            last_frame = now;

            terminal.draw(|frame| self.draw(frame))?;

            if control == LoopControl::Quit {
                break;
            }

            // Frame pacing: sleep to the next boundary, or resync if behind
            let now = Instant::now();
            if next_tick > now {
                std::thread::sleep(next_tick - now);
                next_tick += tick;
            } else {
                next_tick = now + tick;
            }
        }

        tracing::info!(
            score = self.session.score,
            ticks = self.session.tick_count(),
            "frame loop stopped"
        );
        Ok(())
    }
}
