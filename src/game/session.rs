//! Game session: owns the world and runs one simulation tick at a time.

use super::collision;
use super::obstacle::{retire_off_screen, Obstacle, Spawner};
use super::player::Player;
use super::scroll::ScrollTracker;
use super::types::{Actor, Rect};
use crate::assets::{SpriteAtlas, SpriteRole};
use crate::config::GameConfig;
use crate::input::Command;
use crate::surface::{Rgb, Surface};
use rand::Rng;
use std::time::Duration;

/// Largest frame delta fed to the accumulator. Longer stalls are dropped
/// rather than replayed as a burst of ticks.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

pub const GAME_OVER_TEXT: &str = "Game Over! Press R to Restart";

#[derive(Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    spawner: Spawner,
    scroll: ScrollTracker,

    pub player: Player,
    /// Live obstacles in spawn order.
    pub obstacles: Vec<Obstacle>,
    /// Obstacles that scrolled off the left edge.
    pub score: u32,
    /// Latched by a collision; only `restart` clears it.
    pub game_over: bool,

    /// Simulation ticks run since the session started.
    tick_count: u64,
    /// Frame time not yet consumed by a whole tick.
    accumulated: Duration,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        Self {
            spawner: Spawner::new(&config),
            scroll: ScrollTracker::new(&config),
            player: Player::new(&config),
            obstacles: Vec::new(),
            score: 0,
            game_over: false,
            tick_count: 0,
            accumulated: Duration::ZERO,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Replace every piece of mutable state with a fresh session.
    pub fn restart(&mut self) {
        tracing::info!(
            score = self.score,
            ticks = self.tick_count,
            "session restarted"
        );
        *self = Self::new(self.config.clone());
    }

    /// Apply a player command. Movement is ignored once the game is over and
    /// restart is ignored while it is not. Quit belongs to the frame loop.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Jump if !self.game_over => self.player.jump(),
            Command::CrouchStart if !self.game_over => self.player.crouch(),
            Command::CrouchEnd if !self.game_over => self.player.release_crouch(),
            Command::Restart if self.game_over => self.restart(),
            _ => {}
        }
    }

    /// Advance by one tick. No-op once the game is over.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.game_over {
            return;
        }
        self.tick_count += 1;

        // 1. Player physics
        self.player.update();

        // 2. Background scroll
        self.scroll.advance();

        // 3. Move obstacles, retire the ones past the left edge
        for obstacle in &mut self.obstacles {
            obstacle.update();
        }
        let retired = retire_off_screen(&mut self.obstacles);
        if retired > 0 {
            self.score += retired;
            tracing::debug!(retired, score = self.score, "obstacles cleared");
        }

        // 4. Spawn (ground, then aerial)
        self.spawner.spawn(&mut self.obstacles, &self.config, rng);

        // 5. Collision against the post-move world
        if let Some(hit) = collision::first_hit(&self.player.bounds(), &self.obstacles) {
            self.game_over = true;
            tracing::debug!(
                kind = self.obstacles[hit].kind.name(),
                score = self.score,
                tick = self.tick_count,
                "collision, game over"
            );
        }
    }

    /// Feed `dt` of wall-clock time through a fixed-step accumulator.
    /// Returns the number of ticks run.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: Duration, rng: &mut R) -> u32 {
        if self.game_over {
            return 0;
        }

        let tick = self.config.tick_interval();
        self.accumulated += dt.min(MAX_FRAME_DELTA);
        let mut ticks = 0;

        while self.accumulated >= tick {
            self.accumulated -= tick;
            self.update(rng);
            ticks += 1;

            if self.game_over {
                self.accumulated = Duration::ZERO;
                break;
            }
        }

        ticks
    }

    /// Issue draw calls for the whole scene, back to front.
    pub fn draw(&self, surface: &mut dyn Surface, atlas: &SpriteAtlas) {
        let width = self.config.screen_width;
        let height = self.config.screen_height;
        let ground = self.config.ground_line;

        surface.fill_rect(Rect::new(0.0, 0.0, width, height), Rgb::SKY_BLUE);
        surface.blit(atlas.sprite(SpriteRole::SkyBackground), 0.0, 0.0);

        surface.fill_rect(Rect::new(0.0, ground, width, height - ground), Rgb::GROUND);
        surface.blit(
            atlas.sprite(SpriteRole::GroundTexture),
            self.scroll.offset(),
            ground,
        );

        self.player.draw(surface, atlas);

        // Oldest first so newer obstacles overlap older ones
        for obstacle in &self.obstacles {
            obstacle.draw(surface, atlas);
        }

        surface.draw_text(&format!("Score: {}", self.score), 10.0, 10.0, Rgb::BLACK);

        if self.game_over {
            surface.draw_text(
                GAME_OVER_TEXT,
                width / 2.0 - 200.0,
                height / 2.0 - 50.0,
                Rgb::RED,
            );
        }
    }
}
