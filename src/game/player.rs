//! Player controller: vertical physics and pose.
//!
//! Jumping and crouching are two independent flags rather than one state
//! enum. `crouch()` resizes the box even mid-air and `jump()` still launches
//! while crouched; `pose()` resolves the flags with jump taking priority.

use super::types::{Actor, Rect};
use crate::assets::{SpriteAtlas, SpriteRole};
use crate::config::GameConfig;
use crate::surface::Surface;

pub const PLAYER_WIDTH: f32 = 100.0;
pub const PLAYER_STANDING_HEIGHT: f32 = 100.0;
pub const PLAYER_CROUCH_HEIGHT: f32 = 50.0;

/// Visible mode of the player. Selects the sprite only; collision always
/// uses the bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Running,
    Jumping,
    Crouching,
}

impl Pose {
    pub fn sprite_role(&self) -> SpriteRole {
        match self {
            Self::Running => SpriteRole::PlayerRun,
            Self::Jumping => SpriteRole::PlayerJump,
            Self::Crouching => SpriteRole::PlayerCrouch,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Jumping => "Jumping",
            Self::Crouching => "Crouching",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity in pixels/tick (negative = upward).
    pub velocity: f32,
    /// Set by `jump()`, cleared on landing.
    pub jumping: bool,
    /// Set by `crouch()`, cleared by `release_crouch()`.
    pub crouching: bool,
    pub grounded: bool,

    // -- Cached config --
    ground_line: f32,
    gravity: f32,
    jump_velocity: f32,
}

impl Player {
    /// Standing on the ground line at the configured x, Running.
    pub fn new(config: &GameConfig) -> Self {
        let mut rect = Rect::new(config.player_x, 0.0, PLAYER_WIDTH, PLAYER_STANDING_HEIGHT);
        rect.set_bottom(config.ground_line);
        Self {
            rect,
            velocity: 0.0,
            jumping: false,
            crouching: false,
            grounded: true,
            ground_line: config.ground_line,
            gravity: config.gravity,
            jump_velocity: config.jump_velocity,
        }
    }

    pub fn is_airborne(&self) -> bool {
        self.jumping
    }

    /// Launch upward. No-op while already airborne.
    pub fn jump(&mut self) {
        if self.is_airborne() {
            return;
        }
        self.velocity = self.jump_velocity;
        self.jumping = true;
        self.grounded = false;
    }

    /// Shrink to crouch size with the top of the box on the ground line.
    /// Velocity is untouched, so the next update lands a mid-air crouch.
    pub fn crouch(&mut self) {
        self.rect.width = PLAYER_WIDTH;
        self.rect.height = PLAYER_CROUCH_HEIGHT;
        self.rect.y = self.ground_line;
        self.crouching = true;
    }

    /// Back to standing size with the bottom on the ground line.
    pub fn release_crouch(&mut self) {
        self.rect.width = PLAYER_WIDTH;
        self.rect.height = PLAYER_STANDING_HEIGHT;
        self.rect.set_bottom(self.ground_line);
        self.crouching = false;
    }

    pub fn pose(&self) -> Pose {
        if self.jumping {
            Pose::Jumping
        } else if self.crouching {
            Pose::Crouching
        } else {
            Pose::Running
        }
    }
}

impl Actor for Player {
    fn bounds(&self) -> Rect {
        self.rect
    }

    fn update(&mut self) {
        self.velocity += self.gravity;
        self.rect.y += self.velocity;

        if self.rect.bottom() >= self.ground_line {
            self.rect.set_bottom(self.ground_line);
            self.velocity = 0.0;
            self.grounded = true;
            self.jumping = false;
        }
    }

    fn draw(&self, surface: &mut dyn Surface, atlas: &SpriteAtlas) {
        let sprite = atlas.sprite(self.pose().sprite_role());
        surface.blit(sprite, self.rect.x, self.rect.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn player() -> Player {
        Player::new(&GameConfig::default())
    }

    fn airborne_ticks(p: &mut Player) -> u32 {
        let mut ticks = 0;
        while p.is_airborne() {
            p.update();
            ticks += 1;
            assert!(ticks < 1000, "player never landed");
        }
        ticks
    }

    // ── Construction ──

    #[test]
    fn test_new_player_standing_on_ground() {
        let p = player();
        assert_eq!(p.rect, Rect::new(50.0, 200.0, 100.0, 100.0));
        assert_eq!(p.velocity, 0.0);
        assert!(p.grounded);
        assert!(!p.jumping);
        assert!(!p.crouching);
        assert_eq!(p.pose(), Pose::Running);
    }

    #[test]
    fn test_idle_update_stays_on_ground() {
        let mut p = player();
        for _ in 0..10 {
            p.update();
        }
        assert_eq!(p.rect.bottom(), 300.0);
        assert_eq!(p.velocity, 0.0);
        assert!(p.grounded);
    }

    // ── Jumping ──

    #[test]
    fn test_jump_sets_launch_velocity() {
        let mut p = player();
        p.jump();
        assert_eq!(p.velocity, -15.0);
        assert!(p.jumping);
        assert!(!p.grounded);
        assert_eq!(p.pose(), Pose::Jumping);
    }

    #[test]
    fn test_second_jump_while_airborne_is_noop() {
        let mut p = player();
        p.jump();
        p.update();
        let velocity = p.velocity;
        let rect = p.rect;
        p.jump();
        assert_eq!(p.velocity, velocity);
        assert_eq!(p.rect, rect);
        assert_eq!(p.pose(), Pose::Jumping);
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let mut p = player();
        p.jump();
        p.update();
        // -15 + 0.5
        assert_eq!(p.velocity, -14.5);
        assert_eq!(p.rect.y, 185.5);

        let ticks = airborne_ticks(&mut p);
        assert!(ticks > 50);
        assert_eq!(p.velocity, 0.0);
        assert!(p.grounded);
        assert_ne!(p.pose(), Pose::Jumping);
        assert_eq!(p.rect.bottom(), 300.0);
    }

    #[test]
    fn test_can_jump_again_after_landing() {
        let mut p = player();
        p.jump();
        airborne_ticks(&mut p);
        p.jump();
        assert_eq!(p.velocity, -15.0);
    }

    // ── Crouching ──

    #[test]
    fn test_crouch_resizes_box() {
        let mut p = player();
        p.crouch();
        assert!(p.crouching);
        assert_eq!(p.rect.height, 50.0);
        assert_eq!(p.rect.width, 100.0);
        assert_eq!(p.rect.top(), 300.0);
        assert_eq!(p.pose(), Pose::Crouching);

        // Gravity pulls the crouched box back onto the ground line
        p.update();
        assert_eq!(p.rect, Rect::new(50.0, 250.0, 100.0, 50.0));
        assert_eq!(p.pose(), Pose::Crouching);
    }

    #[test]
    fn test_release_crouch_restores_standing_box() {
        let mut p = player();
        p.crouch();
        p.update();
        p.release_crouch();
        assert!(!p.crouching);
        assert_eq!(p.rect, Rect::new(50.0, 200.0, 100.0, 100.0));
        assert_eq!(p.pose(), Pose::Running);
    }

    #[test]
    fn test_crouch_while_airborne_shrinks_immediately() {
        // Legacy behavior: the resize happens mid-jump and the velocity keeps
        // integrating. The crouched box starts on the ground line, so the
        // next update lands the player.
        let mut p = player();
        p.jump();
        assert_eq!(p.velocity, -15.0);

        p.crouch();
        assert_eq!(p.rect.height, 50.0);
        assert_eq!(p.velocity, -15.0);
        assert!(p.jumping);
        assert!(p.crouching);
        // Jump wins pose resolution
        assert_eq!(p.pose(), Pose::Jumping);

        p.update();
        assert_eq!(p.rect.bottom(), 300.0);
        assert_eq!(p.velocity, 0.0);
        assert_eq!(p.pose(), Pose::Crouching);
    }

    #[test]
    fn test_jump_while_crouching_sets_velocity_keeps_crouch_flag() {
        let mut p = player();
        p.crouch();
        p.update();
        p.jump();
        assert_eq!(p.velocity, -15.0);
        assert!(p.crouching);
        assert_eq!(p.rect.height, 50.0);
        assert_eq!(p.pose(), Pose::Jumping);

        airborne_ticks(&mut p);
        assert_eq!(p.pose(), Pose::Crouching);
        assert_eq!(p.rect.bottom(), 300.0);
    }

    #[test]
    fn test_pose_sprite_roles() {
        assert_eq!(Pose::Running.sprite_role(), SpriteRole::PlayerRun);
        assert_eq!(Pose::Jumping.sprite_role(), SpriteRole::PlayerJump);
        assert_eq!(Pose::Crouching.sprite_role(), SpriteRole::PlayerCrouch);
    }

    // ── Invariants ──

    #[test]
    fn test_bottom_never_below_ground_after_update() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut p = player();
        for _ in 0..5000 {
            match rng.gen_range(0..6) {
                0 => p.jump(),
                1 => p.crouch(),
                2 => p.release_crouch(),
                _ => {}
            }
            let was_airborne = p.is_airborne();
            p.update();
            assert!(p.rect.bottom() <= 300.0);
            if was_airborne && !p.is_airborne() {
                assert_eq!(p.velocity, 0.0);
            }
        }
    }
}
