//! Components shared by every tank entity.

use fishtank_logic::geometry::Vec3;
use serde::{Deserialize, Serialize};

/// World-space position inside (or, for the shark, around) the tank.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position(pub Vec3);

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }
}

/// Kinds of visual entity the renderer is told to dispose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Fish,
    Food,
    Egg,
}
