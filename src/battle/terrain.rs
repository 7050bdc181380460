//! Terrain descriptor handed over by the overworld
//!
//! The encounter records where on the continent it happens and what the tile
//! looked like, but combat math never reads either - both are presentation.

use serde::{Deserialize, Serialize};

/// Overworld tile vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    Plains,
    Forest,
    Mountain,
    Water,
    Desert,
    Swamp,
}

/// Where on the overworld this encounter takes place
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    pub kind: TerrainKind,
    pub coords: (i32, i32),
}

impl Terrain {
    pub fn new(kind: TerrainKind, coords: (i32, i32)) -> Self {
        Self { kind, coords }
    }
}
