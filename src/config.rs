//! Game configuration.
//!
//! Screen geometry, tick rate and physics tuning live here instead of in
//! process-wide constants so the session and frame loop can be built with
//! alternate values (tests use this heavily).

use std::ops::RangeInclusive;
use std::time::Duration;

/// Configuration for a game session and the frame loop that drives it.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Logical screen width in world pixels
    pub screen_width: f32,

    /// Logical screen height in world pixels
    pub screen_height: f32,

    /// Y coordinate of the walking surface (grounded boxes rest their bottom here)
    pub ground_line: f32,

    /// Simulation ticks per second
    pub tick_rate: u32,

    /// Fixed horizontal position of the player's left edge
    pub player_x: f32,

    /// Velocity added per tick while the player integrates (positive = downward)
    pub gravity: f32,

    /// Vertical velocity applied by a jump (negative = upward)
    pub jump_velocity: f32,

    /// Leftward movement of every obstacle per tick
    pub obstacle_speed: f32,

    /// Leftward movement of the ground texture per tick
    pub scroll_speed: f32,

    /// Smallest spacing draw for the spawner (inclusive)
    pub spawn_gap_min: u32,

    /// Largest spacing draw for the spawner (inclusive)
    pub spawn_gap_max: u32,

    /// Fixed top edge of aerial obstacles
    pub aerial_top: f32,

    /// Random seed for reproducible runs (None = seeded from entropy)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 400.0,
            ground_line: 300.0,
            tick_rate: 60,
            player_x: 50.0,
            gravity: 0.5,
            jump_velocity: -15.0,
            obstacle_speed: 5.0,
            scroll_speed: 5.0,
            spawn_gap_min: 300,
            spawn_gap_max: 2000,
            aerial_top: 175.0,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Wall-clock length of one simulation tick.
    pub fn tick_interval(&self) -> Duration {
        let rate = u64::from(self.tick_rate.max(1));
        Duration::from_nanos(1_000_000_000 / rate)
    }

    /// Inclusive spacing range for spawn draws. Swapped bounds are normalized.
    pub fn spawn_gap(&self) -> RangeInclusive<u32> {
        let lo = self.spawn_gap_min.min(self.spawn_gap_max);
        let hi = self.spawn_gap_min.max(self.spawn_gap_max);
        lo..=hi
    }

    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }
}
