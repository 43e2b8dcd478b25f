//! Tile catalogs: the built-in tile set and JSON-authored sets.
//!
//! The built-in catalog is a process-wide, read-only value initialized on
//! first use. Custom catalogs can be loaded from JSON of the form
//! `{"tiles": [{"name": "tile01", "roads": [["E","W"]], "cities": [["N"]]}]}`
//! where road endpoints are `N`, `E`, `S`, `W` or `C` (center).

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::info;

use super::direction::{Direction, Endpoint};
use super::feature::{TileError, TileFeature};

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Tile(#[from] TileError),

    #[error("duplicate tile name '{0}'")]
    DuplicateName(String),

    #[error("catalog contains no tiles")]
    Empty,
}

/// A tile as authored in a JSON catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct TileSpec {
    pub name: String,
    #[serde(default)]
    pub roads: Vec<Vec<Endpoint>>,
    #[serde(default)]
    pub cities: Vec<Vec<Direction>>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    tiles: Vec<TileSpec>,
}

/// A named set of tile templates in their authored orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tiles: Vec<TileFeature>,
}

impl Catalog {
    /// Builds a catalog from validated tiles. Names must be unique.
    pub fn new(tiles: Vec<TileFeature>) -> Result<Self, CatalogError> {
        if tiles.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for tile in &tiles {
            if !seen.insert(tile.name()) {
                return Err(CatalogError::DuplicateName(tile.name().to_string()));
            }
        }
        Ok(Catalog { tiles })
    }

    /// Builds a catalog from authored specs, validating every tile.
    pub fn from_specs(specs: &[TileSpec]) -> Result<Self, CatalogError> {
        let tiles = specs
            .iter()
            .map(|s| TileFeature::new(s.name.clone(), s.roads.as_slice(), s.cities.as_slice()))
            .collect::<Result<Vec<_>, _>>()?;
        Catalog::new(tiles)
    }

    /// Parses a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Catalog::from_specs(&file.tiles)
    }

    /// Looks up a tile by name.
    pub fn get(&self, name: &str) -> Option<&TileFeature> {
        self.tiles.iter().find(|t| t.name() == name)
    }

    /// Returns the first tile, used to seed new boards.
    pub fn first(&self) -> &TileFeature {
        &self.tiles[0]
    }

    pub fn tiles(&self) -> &[TileFeature] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Loads a catalog from a JSON file at the given path.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let data = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json(&data)?;
    info!(path = %path.display(), tiles = catalog.len(), "loaded tile catalog");
    Ok(catalog)
}

/// Shorthand endpoints for the built-in layouts.
const N: Endpoint = Endpoint::Side(Direction::North);
const E: Endpoint = Endpoint::Side(Direction::East);
const S: Endpoint = Endpoint::Side(Direction::South);
const W: Endpoint = Endpoint::Side(Direction::West);
const C: Endpoint = Endpoint::Center;

use Direction::{East, North, South, West};

fn builtin_tiles() -> Result<Vec<TileFeature>, TileError> {
    type Roads<'a> = &'a [&'a [Endpoint]];
    type Cities<'a> = &'a [&'a [Direction]];
    let layouts: [(&str, Roads, Cities); 16] = [
        ("tile01", &[&[E, W]], &[&[North]]),
        ("tile02", &[], &[&[East, North, West]]),
        ("tile03", &[&[N, C], &[E, C], &[S, C], &[W, C]], &[]),
        ("tile04", &[&[S, E]], &[&[North]]),
        ("tile05", &[], &[&[North, East, South, West]]),
        ("tile06", &[&[N, S]], &[]),
        ("tile07", &[], &[&[West], &[East]]),
        ("tile08", &[], &[&[East, West]]),
        ("tile09", &[], &[&[North, East]]),
        ("tile10", &[&[E, C], &[S, C], &[W, C]], &[]),
        ("tile11", &[&[S, E]], &[&[North, West]]),
        ("tile12", &[&[W, S]], &[&[North]]),
        ("tile13", &[&[E, C], &[S, C], &[W, C]], &[&[North]]),
        ("tile14", &[], &[&[North], &[East]]),
        ("tile15", &[&[W, S]], &[]),
        ("tile16", &[], &[&[North]]),
    ];
    layouts
        .iter()
        .map(|&(name, roads, cities)| TileFeature::new(name, roads, cities))
        .collect()
}

static STANDARD: LazyLock<Catalog> = LazyLock::new(|| {
    let tiles = builtin_tiles().expect("built-in tile layouts are valid");
    Catalog { tiles }
});

/// Returns the built-in catalog of tiles `tile01` through `tile16`.
pub fn standard_catalog() -> &'static Catalog {
    &STANDARD
}

/// Returns the tile a new board starts with at the origin (`tile01`).
pub fn seed_tile() -> &'static TileFeature {
    &STANDARD.tiles[0]
}

/// Returns a built-in tile by name.
pub fn standard_tile(name: &str) -> Option<&'static TileFeature> {
    STANDARD.get(name)
}
