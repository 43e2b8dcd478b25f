//! Road tracing.
//!
//! A road is followed tile by tile: leaving a tile through an edge enters the
//! neighbor through the opposite edge, and the neighbor's road segment names
//! the edge to leave by next. A walk stops at an empty cell, at a crossroad
//! (the segment ends at the tile center), or when it comes back round to the
//! segment it started from. A tile with two separate segments (an overpass)
//! may be passed through twice on one road.

use std::collections::{BTreeSet, HashSet};

use super::coord::Coord;
use super::graph::BoardGraph;
use crate::tile::{Direction, Endpoint, ALL_DIRECTIONS};

/// One tile on a traced road: where the road enters it and where it leaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoadStep {
    pub coord: Coord,
    pub enter: Endpoint,
    pub exit: Endpoint,
}

impl RoadStep {
    pub const fn new(coord: Coord, enter: Endpoint, exit: Endpoint) -> Self {
        RoadStep { coord, enter, exit }
    }

    /// The same step travelled in the opposite direction.
    pub const fn reversed(self) -> Self {
        RoadStep {
            coord: self.coord,
            enter: self.exit,
            exit: self.enter,
        }
    }
}

/// Returns the distinct tiles a traced road passes through.
pub fn road_tiles(steps: &[RoadStep]) -> BTreeSet<Coord> {
    steps.iter().map(|s| s.coord).collect()
}

impl BoardGraph {
    /// Follows a road in one direction, starting by leaving `start` through
    /// `side`. The starting segment itself is not recorded unless the road
    /// loops back into it; the walk then ends with the step that would leave
    /// through `side` again.
    ///
    /// Each step records the tile entered, the edge it was entered through
    /// and the far end of its road segment.
    pub fn walk_road(&self, start: Coord, side: Endpoint) -> Vec<RoadStep> {
        let mut steps = Vec::new();
        let mut seen = HashSet::new();
        let mut current = start;
        let mut leaving = side;

        // A center endpoint means a crossroad: the walk never passes through.
        while let Endpoint::Side(out) = leaving {
            let Some(next) = current.neighbor(out) else {
                break;
            };
            let Some(tile) = self.tile_at(next) else {
                break;
            };
            let enter = out.opposite();
            if !seen.insert((next, enter)) {
                break;
            }
            // Only reachable through unchecked placements.
            let Some(exit) = tile.road_partner(enter) else {
                break;
            };

            current = next;
            steps.push(RoadStep::new(current, enter.into(), exit));
            if (current == start && exit == side) || exit.is_center() {
                break;
            }
            leaving = exit;
        }
        steps
    }

    /// Traces the whole road through edge `side` of the tile at `start`.
    ///
    /// The result runs from one end of the road to the other and includes
    /// the starting tile. For a closed loop it starts just past `start` and
    /// ends with the starting segment, each segment appearing once.
    ///
    /// # Panics
    ///
    /// Panics if `start` is empty or its tile has no road on `side`.
    pub fn trace_road(&self, start: Coord, side: Direction) -> Vec<RoadStep> {
        let Some(tile) = self.tile_at(start) else {
            panic!("trace_road: no tile at {}", start);
        };
        let Some(other) = tile.road_partner(side) else {
            panic!("trace_road: tile {} at {} has no road on edge {}", tile, start, side);
        };

        let origin = RoadStep::new(start, other, side.into());
        let forward = self.walk_road(start, side.into());
        // The forward walk came back in through `other`: the road is a loop.
        if forward.last() == Some(&origin) {
            return forward;
        }

        let backward = self.walk_road(start, other);
        let mut route: Vec<RoadStep> = backward.iter().rev().map(|s| s.reversed()).collect();
        route.push(origin);
        route.extend(forward);
        route
    }

    /// Returns the ends of a traced road that stop at an empty cell, as the
    /// tile and the edge facing the empty cell.
    pub fn road_open_ends(&self, steps: &[RoadStep]) -> Vec<(Coord, Direction)> {
        let (Some(first), Some(last)) = (steps.first(), steps.last()) else {
            return Vec::new();
        };
        [(first.coord, first.enter), (last.coord, last.exit)]
            .into_iter()
            .filter_map(|(coord, end)| end.side().map(|side| (coord, side)))
            .filter(|&(coord, side)| !coord.neighbor(side).is_some_and(|n| self.is_occupied(n)))
            .collect()
    }

    /// Returns true if neither end of the traced road is open.
    pub fn is_road_complete(&self, steps: &[RoadStep]) -> bool {
        self.road_open_ends(steps).is_empty()
    }

    /// Traces every distinct road on the board, in coordinate order of the
    /// first tile edge found on each.
    pub fn all_roads(&self) -> Vec<Vec<RoadStep>> {
        let mut seen: HashSet<(Coord, Direction)> = HashSet::new();
        let mut roads = Vec::new();
        for (coord, tile) in self.tiles() {
            for side in ALL_DIRECTIONS {
                if !tile.has_road(side) || seen.contains(&(coord, side)) {
                    continue;
                }
                let steps = self.trace_road(coord, side);
                for step in &steps {
                    for end in [step.enter, step.exit] {
                        if let Endpoint::Side(d) = end {
                            seen.insert((step.coord, d));
                        }
                    }
                }
                roads.push(steps);
            }
        }
        roads
    }
}
