//! Sprite atlas: the drawable handles the game asks for by role.
//!
//! A sprite sheet is a small JSON document mapping each role to a glyph
//! pattern and colors. The atlas is acquired once before the first session
//! starts and is held by the frame loop until it exits; draws only ever
//! borrow from it.

use crate::surface::Rgb;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sprite sheet compiled into the binary.
const BUILTIN_SHEET: &str = include_str!("../assets/sprites.json");

/// Logical image roles the game draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteRole {
    PlayerRun,
    PlayerJump,
    PlayerCrouch,
    GroundObstacle,
    AerialObstacle,
    SkyBackground,
    GroundTexture,
}

impl SpriteRole {
    pub const ALL: [SpriteRole; 7] = [
        SpriteRole::PlayerRun,
        SpriteRole::PlayerJump,
        SpriteRole::PlayerCrouch,
        SpriteRole::GroundObstacle,
        SpriteRole::AerialObstacle,
        SpriteRole::SkyBackground,
        SpriteRole::GroundTexture,
    ];

    /// Fixed draw size (width, height) in world pixels.
    pub fn target_size(&self) -> (f32, f32) {
        match self {
            Self::PlayerRun => (100.0, 100.0),
            Self::PlayerJump => (100.0, 100.0),
            Self::PlayerCrouch => (100.0, 50.0),
            Self::GroundObstacle => (50.0, 125.0),
            Self::AerialObstacle => (150.0, 50.0),
            Self::SkyBackground => (800.0, 400.0),
            // Three screens wide so the scroll offset never exposes an edge
            Self::GroundTexture => (2400.0, 100.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::PlayerRun => "player_run",
            Self::PlayerJump => "player_jump",
            Self::PlayerCrouch => "player_crouch",
            Self::GroundObstacle => "ground_obstacle",
            Self::AerialObstacle => "aerial_obstacle",
            Self::SkyBackground => "sky_background",
            Self::GroundTexture => "ground_texture",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::PlayerRun => 0,
            Self::PlayerJump => 1,
            Self::PlayerCrouch => 2,
            Self::GroundObstacle => 3,
            Self::AerialObstacle => 4,
            Self::SkyBackground => 5,
            Self::GroundTexture => 6,
        }
    }
}

impl fmt::Display for SpriteRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure to acquire the sprite atlas. Always fatal at startup.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read sprite sheet {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed sprite sheet: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sprite sheet has no entry for '{0}'")]
    MissingSprite(SpriteRole),

    #[error("sprite '{0}' has an empty glyph pattern")]
    EmptyGlyphs(SpriteRole),
}

#[derive(Debug, Deserialize)]
struct SpriteDef {
    glyphs: String,
    fg: Rgb,
    #[serde(default)]
    bg: Option<Rgb>,
    /// World pixels covered by each glyph of the pattern
    #[serde(default)]
    tile: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct SpriteSheet {
    sprites: HashMap<SpriteRole, SpriteDef>,
}

/// A drawable handle with a stable size.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub role: SpriteRole,
    pub width: f32,
    pub height: f32,
    pub fg: Rgb,
    /// None = keep whatever background is already underneath
    pub bg: Option<Rgb>,
    glyphs: Vec<char>,
    tile: f32,
}

impl Sprite {
    fn from_def(role: SpriteRole, def: SpriteDef) -> Result<Self, AssetError> {
        let glyphs: Vec<char> = def.glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(AssetError::EmptyGlyphs(role));
        }
        let (width, height) = role.target_size();
        let tile = def
            .tile
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(width);
        Ok(Self {
            role,
            width,
            height,
            fg: def.fg,
            bg: def.bg,
            glyphs,
            tile,
        })
    }

    /// Glyph covering the point `offset` world pixels right of the sprite's
    /// left edge. The pattern repeats every `glyphs.len() * tile` pixels.
    pub fn glyph_at(&self, offset: f32) -> char {
        let step = (offset.max(0.0) / self.tile) as usize;
        self.glyphs[step % self.glyphs.len()]
    }
}

/// Every sprite the game needs, indexed by role.
#[derive(Debug, Clone)]
pub struct SpriteAtlas {
    sprites: Vec<Sprite>,
}

impl SpriteAtlas {
    /// The sprite sheet shipped with the binary.
    pub fn builtin() -> Result<Self, AssetError> {
        Self::from_json(BUILTIN_SHEET)
    }

    /// Read a sprite sheet from disk.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let json = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse a sprite sheet. Every role must be present.
    pub fn from_json(json: &str) -> Result<Self, AssetError> {
        let mut sheet: SpriteSheet = serde_json::from_str(json)?;
        let sprites = SpriteRole::ALL
            .iter()
            .map(|&role| {
                let def = sheet
                    .sprites
                    .remove(&role)
                    .ok_or(AssetError::MissingSprite(role))?;
                Sprite::from_def(role, def)
            })
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = sprites.len(), "sprite atlas loaded");
        Ok(Self { sprites })
    }

    pub fn sprite(&self, role: SpriteRole) -> &Sprite {
        &self.sprites[role.index()]
    }
}
