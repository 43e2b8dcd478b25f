//! The board graph: placed tiles, the placement frontier, and edge matching.
//!
//! Tiles live on an unbounded grid keyed by `Coord`. The frontier (the set of
//! empty cells touching at least one tile) is a derived cache that is updated
//! incrementally on every commit; `recompute_frontier` rebuilds it from
//! scratch and must always agree with the cached value.

use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace};

use super::coord::Coord;
use crate::tile::{seed_tile, TileFeature};

/// How `BoardGraph::place` treats a placement request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceMode {
    /// Validate against the frontier and neighbor edges; commit only if legal.
    Checked,
    /// Validate exactly as `Checked` but never commit.
    DryRun,
    /// Commit without validation. Intended for board setup and tests only.
    Unchecked,
}

/// Placed tiles plus the frontier of legal candidate cells.
#[derive(Debug, Clone)]
pub struct BoardGraph {
    placed: HashMap<Coord, TileFeature>,
    frontier: BTreeSet<Coord>,
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGraph {
    /// Creates a board with the standard seed tile (`tile01`) at the origin.
    pub fn new() -> Self {
        Self::with_seed(seed_tile().clone())
    }

    /// Creates a board with the given tile at the origin.
    pub fn with_seed(tile: TileFeature) -> Self {
        let mut board = BoardGraph {
            placed: HashMap::new(),
            frontier: BTreeSet::new(),
        };
        board.commit(tile, Coord::ORIGIN);
        board
    }

    /// Returns the tile at `coord`, or `None` if the cell is empty.
    pub fn tile_at(&self, coord: Coord) -> Option<&TileFeature> {
        self.placed.get(&coord)
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.placed.contains_key(&coord)
    }

    /// Returns the number of placed tiles (at least one).
    pub fn tile_count(&self) -> usize {
        self.placed.len()
    }

    pub fn occupied_coordinates(&self) -> BTreeSet<Coord> {
        self.placed.keys().copied().collect()
    }

    /// Returns the current frontier: empty cells adjacent to a placed tile.
    pub fn border_coordinates(&self) -> &BTreeSet<Coord> {
        &self.frontier
    }

    /// Returns every placed tile ordered by coordinate.
    pub fn tiles(&self) -> Vec<(Coord, &TileFeature)> {
        let mut tiles: Vec<_> = self.placed.iter().map(|(&c, t)| (c, t)).collect();
        tiles.sort_by_key(|&(c, _)| c);
        tiles
    }

    /// Rebuilds the frontier from the placed tiles alone.
    pub fn recompute_frontier(&self) -> BTreeSet<Coord> {
        self.placed
            .keys()
            .flat_map(|c| c.neighbors())
            .map(|(_, n)| n)
            .filter(|n| !self.placed.contains_key(n))
            .collect()
    }

    /// Returns true if `tile` may legally occupy `coord`.
    ///
    /// The cell must be on the frontier, and every occupied neighbor must
    /// present the same terrain on the shared edge.
    pub fn can_place(&self, tile: &TileFeature, coord: Coord) -> bool {
        self.frontier.contains(&coord) && self.edges_match(tile, coord)
    }

    fn edges_match(&self, tile: &TileFeature, coord: Coord) -> bool {
        coord.neighbors().all(|(side, n)| match self.placed.get(&n) {
            Some(neighbor) => tile.edge(side) == neighbor.edge(side.opposite()),
            None => true,
        })
    }

    /// Places `tile` at `coord` according to `mode`.
    ///
    /// Returns whether the placement is (or, for `DryRun`, would be) applied.
    /// A rejected placement leaves the board untouched. `Unchecked` always
    /// commits, replacing any tile already at `coord`.
    pub fn place(&mut self, tile: TileFeature, coord: Coord, mode: PlaceMode) -> bool {
        match mode {
            PlaceMode::Checked => {
                if !self.can_place(&tile, coord) {
                    trace!(%coord, tile = %tile, "placement rejected");
                    return false;
                }
                self.commit(tile, coord);
                true
            }
            PlaceMode::DryRun => self.can_place(&tile, coord),
            PlaceMode::Unchecked => {
                self.commit(tile, coord);
                true
            }
        }
    }

    /// Shorthand for `place(tile, coord, PlaceMode::Checked)`.
    pub fn place_checked(&mut self, tile: TileFeature, coord: Coord) -> bool {
        self.place(tile, coord, PlaceMode::Checked)
    }

    fn commit(&mut self, tile: TileFeature, coord: Coord) {
        debug!(%coord, tile = %tile, "placed tile");
        self.placed.insert(coord, tile);
        self.frontier.remove(&coord);
        for (_, n) in coord.neighbors() {
            if !self.placed.contains_key(&n) {
                self.frontier.insert(n);
            }
        }
    }

    /// Returns every legal (cell, orientation) pair for `tile`, ordered by
    /// cell and then by rotation.
    pub fn legal_placements(&self, tile: &TileFeature) -> Vec<(Coord, TileFeature)> {
        let orientations: Vec<TileFeature> = tile.rotations().collect();
        let mut legal = Vec::new();
        for &coord in &self.frontier {
            for oriented in &orientations {
                if self.edges_match(oriented, coord) {
                    legal.push((coord, oriented.clone()));
                }
            }
        }
        legal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::standard_tile;

    fn tile(name: &str) -> TileFeature {
        standard_tile(name).unwrap().clone()
    }

    #[test]
    fn new_board_has_seed_at_origin() {
        let board = BoardGraph::new();
        assert_eq!(board.tile_count(), 1);
        assert_eq!(board.tile_at(Coord::ORIGIN).unwrap().name(), "tile01");
        assert!(board.tile_at(Coord::new(1, 0)).is_none());
        let expected: BTreeSet<Coord> = [(0, 1), (1, 0), (0, -1), (-1, 0)]
            .into_iter()
            .map(Coord::from)
            .collect();
        assert_eq!(board.border_coordinates(), &expected);
    }

    #[test]
    fn isolated_cells_are_never_placeable() {
        let board = BoardGraph::new();
        let grass = tile("tile16").rotated(2);
        for coord in [Coord::new(2, 0), Coord::new(1, 1), Coord::new(-5, 9)] {
            for oriented in grass.rotations() {
                assert!(!board.can_place(&oriented, coord));
            }
        }
    }

    #[test]
    fn occupied_cell_is_not_placeable() {
        let mut board = BoardGraph::new();
        assert!(!board.can_place(&tile("tile01"), Coord::ORIGIN));
        assert!(!board.place_checked(tile("tile01"), Coord::ORIGIN));
    }

    #[test]
    fn edges_must_match_every_neighbor() {
        let mut board = BoardGraph::new();
        // tile01 shows city to the north; tile06's south edge is road.
        assert!(!board.can_place(&tile("tile06"), Coord::new(0, 1)));
        // tile16 rotated twice shows city to the south.
        assert!(board.place_checked(tile("tile16").rotated(2), Coord::new(0, 1)));
        // tile15 has a road west and south; east of origin needs a road to the west.
        assert!(board.place_checked(tile("tile15"), Coord::new(1, 0)));
        // (1,1) touches tile16@2 (grass on its east) and tile15 (grass on its north).
        assert!(board.can_place(&tile("tile16"), Coord::new(1, 1)));
        assert!(!board.can_place(&tile("tile06"), Coord::new(1, 1)));
    }

    #[test]
    fn dry_run_never_commits() {
        let mut board = BoardGraph::new();
        let straight = tile("tile06").rotate_clockwise();
        assert!(board.place(straight.clone(), Coord::new(1, 0), PlaceMode::DryRun));
        assert!(board.tile_at(Coord::new(1, 0)).is_none());
        assert!(!board.place(tile("tile06"), Coord::new(1, 0), PlaceMode::DryRun));
        assert_eq!(board.tile_count(), 1);
    }

    #[test]
    fn rejected_placement_leaves_board_untouched() {
        let mut board = BoardGraph::new();
        let before = board.border_coordinates().clone();
        assert!(!board.place(tile("tile06"), Coord::new(0, 1), PlaceMode::Checked));
        assert_eq!(board.tile_count(), 1);
        assert_eq!(board.border_coordinates(), &before);
    }

    #[test]
    fn unchecked_commits_anything() {
        let mut board = BoardGraph::new();
        assert!(board.place(tile("tile06"), Coord::new(5, 5), PlaceMode::Unchecked));
        assert_eq!(board.tile_at(Coord::new(5, 5)).unwrap().name(), "tile06");
        assert!(board.border_coordinates().contains(&Coord::new(5, 6)));
        assert_eq!(board.border_coordinates(), &board.recompute_frontier());
    }

    #[test]
    fn unchecked_on_grid_rim_keeps_frontier_in_range() {
        let mut board = BoardGraph::new();
        let rim = Coord::new(i32::MAX, 0);
        assert!(board.place(tile("tile06"), rim, PlaceMode::Unchecked));
        let frontier = board.border_coordinates();
        assert!(frontier.contains(&Coord::new(i32::MAX - 1, 0)));
        assert!(frontier.contains(&Coord::new(i32::MAX, 1)));
        assert!(!frontier.contains(&Coord::new(i32::MIN, 0)));
        assert_eq!(frontier, &board.recompute_frontier());
        assert!(board.can_place(&tile("tile06"), Coord::new(i32::MAX, 1)));
    }

    #[test]
    fn frontier_matches_recompute_after_each_placement() {
        let mut board = BoardGraph::new();
        let mut placed = 0;
        for name in ["tile06", "tile15", "tile16", "tile03", "tile08", "tile10", "tile12"] {
            let template = tile(name);
            if let Some((coord, oriented)) = board.legal_placements(&template).into_iter().next() {
                assert!(board.place_checked(oriented, coord));
                placed += 1;
            }
            assert_eq!(board.border_coordinates(), &board.recompute_frontier());
            assert!(board
                .border_coordinates()
                .iter()
                .all(|c| board.tile_at(*c).is_none()));
        }
        assert_eq!(board.tile_count(), placed + 1);
    }

    #[test]
    fn legal_placements_agree_with_can_place() {
        let board = BoardGraph::new();
        let curve = tile("tile15");
        let legal = board.legal_placements(&curve);
        assert!(!legal.is_empty());
        for (coord, oriented) in &legal {
            assert!(board.can_place(oriented, *coord));
        }
        // Every orientation on every frontier cell that is not listed must be illegal.
        for &coord in board.border_coordinates() {
            for oriented in curve.rotations() {
                let listed = legal.iter().any(|(c, t)| *c == coord && *t == oriented);
                assert_eq!(listed, board.can_place(&oriented, coord));
            }
        }
    }

    #[test]
    fn tiles_are_listed_in_coordinate_order() {
        let mut board = BoardGraph::new();
        board.place(tile("tile05"), Coord::new(3, -2), PlaceMode::Unchecked);
        board.place(tile("tile05"), Coord::new(-3, 2), PlaceMode::Unchecked);
        let coords: Vec<Coord> = board.tiles().into_iter().map(|(c, _)| c).collect();
        assert_eq!(coords, vec![Coord::new(-3, 2), Coord::new(0, 0), Coord::new(3, -2)]);
        assert_eq!(board.occupied_coordinates().len(), 3);
    }
}
