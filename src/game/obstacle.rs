//! Obstacles and the spawner that introduces them.

use super::types::{Actor, Rect};
use crate::assets::{SpriteAtlas, SpriteRole};
use crate::config::GameConfig;
use crate::surface::Surface;
use rand::Rng;
use std::ops::RangeInclusive;

/// Hitboxes are this much narrower than their sprites.
const HITBOX_TRIM: f32 = 25.0;

/// Obstacle variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    /// Rests on the ground line; jump over it.
    Ground,
    /// Hangs at head height; crouch under it.
    Aerial,
}

impl ObstacleKind {
    /// Order the spawner checks variants in each tick.
    pub const SPAWN_ORDER: [ObstacleKind; 2] = [ObstacleKind::Ground, ObstacleKind::Aerial];

    pub fn sprite_role(&self) -> SpriteRole {
        match self {
            Self::Ground => SpriteRole::GroundObstacle,
            Self::Aerial => SpriteRole::AerialObstacle,
        }
    }

    /// Collision box size (width, height).
    pub fn hitbox_size(&self) -> (f32, f32) {
        let (w, h) = self.sprite_role().target_size();
        (w - HITBOX_TRIM, h)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ground => "ground",
            Self::Aerial => "aerial",
        }
    }
}

/// A single obstacle moving leftward at a constant speed.
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub rect: Rect,
    speed: f32,
}

impl Obstacle {
    /// New obstacle with its left edge on the right screen edge.
    pub fn spawn(kind: ObstacleKind, config: &GameConfig) -> Self {
        let (width, height) = kind.hitbox_size();
        let mut rect = Rect::new(config.screen_width, 0.0, width, height);
        match kind {
            ObstacleKind::Ground => rect.set_bottom(config.ground_line),
            ObstacleKind::Aerial => rect.y = config.aerial_top,
        }
        Self {
            kind,
            rect,
            speed: config.obstacle_speed,
        }
    }

    /// Obstacle with an explicit box. A non-positive speed is replaced with 1.
    pub fn with_rect(kind: ObstacleKind, rect: Rect, speed: f32) -> Self {
        let speed = if speed > 0.0 { speed } else { 1.0 };
        Self { kind, rect, speed }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Right edge has passed the left screen boundary.
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

impl Actor for Obstacle {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self) {
        self.rect.x -= self.speed;
    }

    fn draw(&self, surface: &mut dyn Surface, atlas: &SpriteAtlas) {
        let sprite = atlas.sprite(self.kind.sprite_role());
        surface.blit(sprite, self.rect.x, self.rect.y);
    }
}

/// Drop every obstacle that has left the screen, keeping spawn order.
/// Returns how many were dropped.
pub fn retire_off_screen(obstacles: &mut Vec<Obstacle>) -> u32 {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_off_screen());
    (before - obstacles.len()) as u32
}

/// Decides when new obstacles appear at the right edge.
#[derive(Debug, Clone)]
pub struct Spawner {
    gap: RangeInclusive<u32>,
    screen_width: f32,
}

impl Spawner {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            gap: config.spawn_gap(),
            screen_width: config.screen_width,
        }
    }

    /// Spacing rule: spawn on an empty field, or once the last obstacle is
    /// further left than `screen_width - gap`.
    pub fn spacing_clear(&self, last_x: Option<f32>, gap: u32) -> bool {
        match last_x {
            None => true,
            Some(x) => x < self.screen_width - gap as f32,
        }
    }

    /// Run one spawn phase, appending new obstacles to `obstacles`.
    ///
    /// Each variant draws its own gap and tests it against the last obstacle
    /// as it stood before this phase. Both variants can therefore appear in
    /// the same tick (ground first); that doubling is deliberate difficulty.
    pub fn spawn<R: Rng + ?Sized>(
        &self,
        obstacles: &mut Vec<Obstacle>,
        config: &GameConfig,
        rng: &mut R,
    ) -> usize {
        let last_x = obstacles.last().map(|o| o.rect.x);
        let mut spawned = 0;
        for kind in ObstacleKind::SPAWN_ORDER {
            let gap = rng.gen_range(self.gap.clone());
            if self.spacing_clear(last_x, gap) {
                obstacles.push(Obstacle::spawn(kind, config));
                tracing::trace!(kind = kind.name(), gap, "obstacle spawned");
                spawned += 1;
            }
        }
        spawned
    }
}
