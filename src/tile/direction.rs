//! Compass directions and road endpoints.
//!
//! A tile has four edges, one per `Direction`. Roads may additionally end at
//! the tile's center (a crossroad), which is why road segments are expressed
//! in terms of `Endpoint` rather than `Direction`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four compass-aligned edges of a tile.
///
/// The `#[repr(u8)]` discriminant is the clockwise index starting at North,
/// which makes rotation and array indexing a matter of arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    #[serde(rename = "N")]
    North = 0,
    #[serde(rename = "E")]
    East = 1,
    #[serde(rename = "S")]
    South = 2,
    #[serde(rename = "W")]
    West = 3,
}

/// All directions in clockwise order starting at North.
pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

impl Direction {
    /// Returns the direction facing the other way.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Returns the grid offset `(dx, dy)` of the neighbor across this edge.
    /// North is +y, East is +x.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::East => (1, 0),
            Direction::South => (0, -1),
            Direction::West => (-1, 0),
        }
    }

    /// Returns the direction a quarter turn clockwise from this one.
    pub const fn clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Returns the single-letter abbreviation (`N`, `E`, `S`, `W`).
    pub const fn abbr(self) -> char {
        match self {
            Direction::North => 'N',
            Direction::East => 'E',
            Direction::South => 'S',
            Direction::West => 'W',
        }
    }

    /// Parses a direction from its single-letter abbreviation (case-insensitive).
    pub fn from_abbr(c: char) -> Option<Direction> {
        match c.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'E' => Some(Direction::East),
            'S' => Some(Direction::South),
            'W' => Some(Direction::West),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbr())
    }
}

/// One end of a road segment: an edge of the tile, or its center.
///
/// Serialized as a single letter, with `C` for the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub enum Endpoint {
    Side(Direction),
    Center,
}

impl Endpoint {
    /// Returns the edge direction, or `None` for the center.
    pub const fn side(self) -> Option<Direction> {
        match self {
            Endpoint::Side(d) => Some(d),
            Endpoint::Center => None,
        }
    }

    /// Returns true if this is the crossroad center.
    pub const fn is_center(self) -> bool {
        matches!(self, Endpoint::Center)
    }

    /// Rotates a quarter turn clockwise. The center stays put.
    pub const fn clockwise(self) -> Endpoint {
        match self {
            Endpoint::Side(d) => Endpoint::Side(d.clockwise()),
            Endpoint::Center => Endpoint::Center,
        }
    }

    /// Returns the single-letter abbreviation (`N`, `E`, `S`, `W`, `C`).
    pub const fn abbr(self) -> char {
        match self {
            Endpoint::Side(d) => d.abbr(),
            Endpoint::Center => 'C',
        }
    }

    /// Parses an endpoint from its single-letter abbreviation (case-insensitive).
    pub fn from_abbr(c: char) -> Option<Endpoint> {
        match c.to_ascii_uppercase() {
            'C' => Some(Endpoint::Center),
            other => Direction::from_abbr(other).map(Endpoint::Side),
        }
    }
}

impl From<Direction> for Endpoint {
    fn from(d: Direction) -> Self {
        Endpoint::Side(d)
    }
}

impl TryFrom<char> for Endpoint {
    type Error = String;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Endpoint::from_abbr(c).ok_or_else(|| format!("invalid endpoint '{}'", c))
    }
}

impl From<Endpoint> for char {
    fn from(e: Endpoint) -> char {
        e.abbr()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for d in ALL_DIRECTIONS {
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
        }
    }

    #[test]
    fn deltas_cancel_with_opposite() {
        for d in ALL_DIRECTIONS {
            let (dx, dy) = d.delta();
            let (ox, oy) = d.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn clockwise_cycles_in_four_steps() {
        for d in ALL_DIRECTIONS {
            let turned = d.clockwise().clockwise().clockwise().clockwise();
            assert_eq!(turned, d);
            assert_eq!(d.clockwise().clockwise(), d.opposite());
        }
        assert_eq!(Endpoint::Center.clockwise(), Endpoint::Center);
    }

    #[test]
    fn abbr_roundtrip() {
        for d in ALL_DIRECTIONS {
            assert_eq!(Direction::from_abbr(d.abbr()), Some(d));
            assert_eq!(Endpoint::from_abbr(d.abbr()), Some(Endpoint::Side(d)));
        }
        assert_eq!(Endpoint::from_abbr('c'), Some(Endpoint::Center));
        assert_eq!(Direction::from_abbr('C'), None);
        assert_eq!(Endpoint::from_abbr('x'), None);
    }

    #[test]
    fn endpoint_serde_uses_letters() {
        let json = serde_json::to_string(&[Endpoint::Side(Direction::East), Endpoint::Center]).unwrap();
        assert_eq!(json, r#"["E","C"]"#);
        let back: Vec<Endpoint> = serde_json::from_str(r#"["w","C"]"#).unwrap();
        assert_eq!(back, vec![Endpoint::Side(Direction::West), Endpoint::Center]);
        assert!(serde_json::from_str::<Endpoint>(r#""Q""#).is_err());
    }
}
