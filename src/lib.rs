//! Dino Dash - terminal endless runner.
//!
//! This module exposes the simulation and its terminal front end for
//! testing and for the binary.

pub mod assets;
pub mod build_info;
pub mod config;
pub mod frame_loop;
pub mod game;
pub mod input;
pub mod surface;

// UI module is not exposed as it's tightly coupled to the terminal
mod ui;

pub use assets::{AssetError, SpriteAtlas, SpriteRole};
pub use config::GameConfig;
pub use frame_loop::{FrameLoop, LoopControl};
pub use game::GameSession;
pub use input::Command;
