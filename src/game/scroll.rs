//! Background scroll offset.

use crate::config::GameConfig;

/// Horizontal offset of the ground texture. Moves left every tick and
/// wraps back to 0 after one full screen width.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    offset: f32,
    speed: f32,
    wrap_width: f32,
}

impl ScrollTracker {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            offset: 0.0,
            speed: config.scroll_speed,
            wrap_width: config.screen_width,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn advance(&mut self) {
        self.offset -= self.speed;
        if self.offset <= -self.wrap_width {
            self.offset = 0.0;
        }
    }
}
