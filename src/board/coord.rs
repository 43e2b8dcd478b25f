//! Grid coordinates.

use std::fmt;

use crate::tile::{Direction, ALL_DIRECTIONS};

/// A cell on the tile grid. `y` grows to the north.
///
/// The grid spans the full `i32` range on both axes; cells on its outer rim
/// have no neighbor beyond it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// The origin, where the seed tile sits.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Returns the cell across the given edge, or `None` past the rim of
    /// the grid.
    pub fn neighbor(self, side: Direction) -> Option<Coord> {
        let (dx, dy) = side.delta();
        Some(Coord {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Returns the edge-adjacent cells paired with the edge they lie across.
    /// Yields four cells except on the rim of the grid.
    pub fn neighbors(self) -> impl Iterator<Item = (Direction, Coord)> {
        ALL_DIRECTIONS
            .into_iter()
            .filter_map(move |d| self.neighbor(d).map(|n| (d, n)))
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Coord { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_follows_direction_deltas() {
        let c = Coord::new(2, -3);
        assert_eq!(c.neighbor(Direction::North), Some(Coord::new(2, -2)));
        assert_eq!(c.neighbor(Direction::South), Some(Coord::new(2, -4)));
        assert_eq!(c.neighbor(Direction::East), Some(Coord::new(3, -3)));
        assert_eq!(c.neighbor(Direction::West), Some(Coord::new(1, -3)));
    }

    #[test]
    fn neighbor_then_opposite_returns_home() {
        let c = Coord::new(-7, 11);
        for (d, n) in c.neighbors() {
            assert_eq!(n.neighbor(d.opposite()), Some(c));
        }
        assert_eq!(c.neighbors().count(), 4);
    }

    #[test]
    fn rim_cells_have_no_neighbor_beyond_the_grid() {
        let corner = Coord::new(i32::MAX, i32::MIN);
        assert_eq!(corner.neighbor(Direction::East), None);
        assert_eq!(corner.neighbor(Direction::South), None);
        assert_eq!(corner.neighbor(Direction::West), Some(Coord::new(i32::MAX - 1, i32::MIN)));
        let dirs: Vec<Direction> = corner.neighbors().map(|(d, _)| d).collect();
        assert_eq!(dirs, vec![Direction::North, Direction::West]);
    }

    #[test]
    fn displays_as_pair() {
        assert_eq!(Coord::new(-1, 4).to_string(), "-1,4");
        assert_eq!(Coord::from((0, 0)), Coord::ORIGIN);
    }
}
