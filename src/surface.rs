//! Draw-call contract between the simulation and whatever presents it.
//!
//! The core only issues draw commands in world coordinates; it never reads
//! anything back from the surface.

use crate::assets::Sprite;
use crate::game::types::Rect;
use serde::{Deserialize, Serialize};

/// 24-bit color. Deserializes from a `[r, g, b]` array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
    pub const GROUND: Rgb = Rgb(160, 82, 45);
}

/// Something the game session can draw onto.
pub trait Surface {
    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Rgb);

    /// Draw `sprite` at its own size with its top-left corner at `(x, y)`.
    fn blit(&mut self, sprite: &Sprite, x: f32, y: f32);

    /// Draw a single line of text starting at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: Rgb);
}
