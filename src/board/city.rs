//! City tracing.
//!
//! A city is the closure of `(tile, edge)` nodes under two relations: edges
//! of one tile joined by the same city patch, and an edge joined to the
//! facing edge of the neighbor across it. The city is complete when no node
//! in the closure faces an empty cell.

use std::collections::BTreeSet;

use super::coord::Coord;
use super::graph::BoardGraph;
use crate::tile::{Direction, ALL_DIRECTIONS};

/// A city edge on a placed tile.
pub type CityNode = (Coord, Direction);

/// The result of tracing a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityTrace {
    /// True when every edge of the city faces a placed tile.
    pub complete: bool,
    pub nodes: BTreeSet<CityNode>,
}

impl CityTrace {
    /// Returns the distinct tiles the city covers.
    pub fn tiles(&self) -> BTreeSet<Coord> {
        self.nodes.iter().map(|&(c, _)| c).collect()
    }
}

impl BoardGraph {
    /// Traces the city through edge `side` of the tile at `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start` is empty or its tile has no city on `side`.
    pub fn trace_city(&self, start: Coord, side: Direction) -> CityTrace {
        let Some(tile) = self.tile_at(start) else {
            panic!("trace_city: no tile at {}", start);
        };
        assert!(
            tile.has_city(side),
            "trace_city: tile {} at {} has no city on edge {}",
            tile,
            start,
            side
        );

        let mut nodes = BTreeSet::from([(start, side)]);
        let mut pending = vec![(start, side)];
        let mut complete = true;

        while let Some((coord, side)) = pending.pop() {
            // Nodes are only ever added on occupied cells.
            let Some(tile) = self.tile_at(coord) else {
                continue;
            };
            for other in ALL_DIRECTIONS {
                if tile.cities_connect(side, other) && nodes.insert((coord, other)) {
                    pending.push((coord, other));
                }
            }

            match coord.neighbor(side).filter(|&n| self.is_occupied(n)) {
                Some(across) => {
                    let facing = (across, side.opposite());
                    if nodes.insert(facing) {
                        pending.push(facing);
                    }
                }
                None => complete = false,
            }
        }

        CityTrace { complete, nodes }
    }

    /// Traces every distinct city on the board.
    pub fn all_cities(&self) -> Vec<CityTrace> {
        let mut seen: BTreeSet<CityNode> = BTreeSet::new();
        let mut cities = Vec::new();
        for (coord, tile) in self.tiles() {
            for side in ALL_DIRECTIONS {
                if !tile.has_city(side) || seen.contains(&(coord, side)) {
                    continue;
                }
                let city = self.trace_city(coord, side);
                seen.extend(city.nodes.iter().copied());
                cities.push(city);
            }
        }
        cities
    }
}
