//! Random self-placement for building test boards.
//!
//! Draws tiles from a catalog with a seeded RNG and lays each one at a
//! uniformly random legal placement, discarding tiles that fit nowhere. The
//! finished board is summarized as a serializable report.

use std::io::Write;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info};

use crate::board::{BoardGraph, Coord};
use crate::tile::{standard_catalog, Catalog, TileFeature};

/// Configuration for an autoplay run.
#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    /// Number of tiles to draw after the seed tile.
    pub tiles: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        AutoplayConfig { tiles: 40, seed: 0 }
    }
}

/// One committed placement, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacementRecord {
    pub x: i32,
    pub y: i32,
    pub tile: String,
    pub rotation: u8,
}

impl PlacementRecord {
    fn new(coord: Coord, tile: &TileFeature) -> Self {
        PlacementRecord {
            x: coord.x,
            y: coord.y,
            tile: tile.name().to_string(),
            rotation: tile.rotation(),
        }
    }
}

/// Summary of a finished autoplay board.
#[derive(Debug, Clone, Serialize)]
pub struct AutoplayReport {
    pub seed: u64,
    /// Includes the seed tile at the origin as the first entry.
    pub placements: Vec<PlacementRecord>,
    pub discarded: usize,
    pub complete_cities: usize,
    pub open_cities: usize,
    pub complete_roads: usize,
    pub open_roads: usize,
    #[serde(skip)]
    pub board: BoardGraph,
}

impl AutoplayReport {
    /// Writes the report as pretty-printed JSON followed by a newline.
    pub fn write_json<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)
    }
}

/// Runs autoplay over the built-in catalog.
pub fn run(config: &AutoplayConfig) -> AutoplayReport {
    run_with_catalog(config, standard_catalog())
}

/// Runs autoplay over `catalog`, seeding the board with its first tile.
pub fn run_with_catalog(config: &AutoplayConfig, catalog: &Catalog) -> AutoplayReport {
    let mut rng = if config.seed == 0 {
        SmallRng::from_entropy()
    } else {
        SmallRng::seed_from_u64(config.seed)
    };

    let mut board = BoardGraph::with_seed(catalog.first().clone());
    let mut placements = vec![PlacementRecord::new(Coord::ORIGIN, catalog.first())];
    let mut discarded = 0;

    for _ in 0..config.tiles {
        let Some(template) = catalog.tiles().choose(&mut rng) else {
            break;
        };
        let legal = board.legal_placements(template);
        match legal.choose(&mut rng) {
            Some((coord, oriented)) => {
                if board.place_checked(oriented.clone(), *coord) {
                    placements.push(PlacementRecord::new(*coord, oriented));
                } else {
                    discarded += 1;
                }
            }
            None => {
                debug!(tile = template.name(), "no legal placement, discarding");
                discarded += 1;
            }
        }
    }

    let cities = board.all_cities();
    let complete_cities = cities.iter().filter(|c| c.complete).count();
    let roads = board.all_roads();
    let complete_roads = roads.iter().filter(|r| board.is_road_complete(r)).count();

    info!(
        seed = config.seed,
        placed = placements.len(),
        discarded,
        cities = cities.len(),
        roads = roads.len(),
        "autoplay finished"
    );

    AutoplayReport {
        seed: config.seed,
        placements,
        discarded,
        complete_cities,
        open_cities: cities.len() - complete_cities,
        complete_roads,
        open_roads: roads.len() - complete_roads,
        board,
    }
}

/// Prints a human-readable summary of a report to stderr.
pub fn print_summary(report: &AutoplayReport) {
    eprintln!("=== Autoplay Summary ===");
    eprintln!("Tiles placed: {}", report.placements.len());
    eprintln!("Discarded: {}", report.discarded);
    eprintln!(
        "Cities: {} complete, {} open",
        report.complete_cities, report.open_cities
    );
    eprintln!(
        "Roads: {} complete, {} open",
        report.complete_roads, report.open_roads
    );
    eprintln!("Frontier cells: {}", report.board.border_coordinates().len());
}
