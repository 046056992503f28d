//! Endless-runner simulation.
//!
//! Everything here is pure state plus draw calls against `Surface`; no
//! terminal, clock or global state is touched.

pub mod collision;
pub mod obstacle;
pub mod player;
pub mod scroll;
pub mod session;
pub mod types;

pub use obstacle::{Obstacle, ObstacleKind, Spawner};
pub use player::{Player, Pose};
pub use session::GameSession;
pub use types::{Actor, Rect};
