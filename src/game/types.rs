//! Shared geometry and the actor capability.

use crate::assets::SpriteAtlas;
use crate::surface::Surface;

/// Axis-aligned box in world pixels. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Move the box vertically so its bottom edge sits at `bottom`.
    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.height;
    }

    /// Overlap on both axes. Edges are exclusive: boxes that only touch
    /// do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// An entity in the world: it has a box, advances one tick at a time and
/// knows how to draw itself.
pub trait Actor {
    fn bounds(&self) -> Rect;

    /// Advance by exactly one tick.
    fn update(&mut self);

    fn draw(&self, surface: &mut dyn Surface, atlas: &SpriteAtlas);
}
