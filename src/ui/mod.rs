//! Terminal presentation of the game session.

pub mod canvas;
pub mod dino_scene;
pub mod game_common;

pub use dino_scene::render_dino_scene;
