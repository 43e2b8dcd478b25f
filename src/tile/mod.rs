//! Tile representation.
//!
//! Contains compass directions, edge terrain, the immutable `TileFeature`
//! value with its rotation transform, and the tile catalog.

pub mod catalog;
pub mod direction;
pub mod feature;
pub mod terrain;

pub use catalog::{
    load_catalog, seed_tile, standard_catalog, standard_tile, Catalog, CatalogError, TileSpec,
};
pub use direction::{Direction, Endpoint, ALL_DIRECTIONS};
pub use feature::{RoadSegment, TileError, TileFeature, MAX_CITY_PATCH};
pub use terrain::TerrainKind;
