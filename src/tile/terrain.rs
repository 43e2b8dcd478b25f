//! Terrain kinds carried by tile edges.

use std::fmt;

/// The terrain on one edge of a tile, or at its center.
///
/// Edges carry `Grass`, `Road` or `City`. `Crossroad` only ever appears at
/// the center of a tile whose roads meet there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    Grass,
    Road,
    City,
    Crossroad,
}

impl TerrainKind {
    /// Returns the lowercase name used in protocol output.
    pub const fn name(self) -> &'static str {
        match self {
            TerrainKind::Grass => "grass",
            TerrainKind::Road => "road",
            TerrainKind::City => "city",
            TerrainKind::Crossroad => "crossroad",
        }
    }
}

impl fmt::Display for TerrainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
