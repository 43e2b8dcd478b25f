//! Text notation for coordinates, sides and traces.
//!
//! Coordinates are written `x,y`, sides as a compass letter or word, road
//! steps as `x,y:ENTER-EXIT` (with `C` for a crossroad center) and city
//! nodes as `x,y:SIDE`.

use crate::board::{CityNode, Coord, RoadStep};
use crate::tile::Direction;

/// Errors that can occur while parsing protocol notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("invalid integer: '{0}'")]
    InvalidInteger(String),

    #[error("invalid side: '{0}'")]
    InvalidSide(String),

    #[error("invalid rotation '{0}': expected 0-3")]
    InvalidRotation(String),
}

/// Parses a coordinate from separate `x` and `y` tokens.
pub fn parse_coord(x: &str, y: &str) -> Result<Coord, NotationError> {
    let parse = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| NotationError::InvalidInteger(s.to_string()))
    };
    Ok(Coord::new(parse(x)?, parse(y)?))
}

/// Parses a side from a compass letter (`n`) or word (`north`), any case.
pub fn parse_side(s: &str) -> Result<Direction, NotationError> {
    let side = match s.to_ascii_lowercase().as_str() {
        "n" | "north" => Direction::North,
        "e" | "east" => Direction::East,
        "s" | "south" => Direction::South,
        "w" | "west" => Direction::West,
        _ => return Err(NotationError::InvalidSide(s.to_string())),
    };
    Ok(side)
}

/// Parses a quarter-turn count in `0..=3`.
pub fn parse_rotation(s: &str) -> Result<u8, NotationError> {
    match s.parse::<u8>() {
        Ok(r) if r < 4 => Ok(r),
        _ => Err(NotationError::InvalidRotation(s.to_string())),
    }
}

/// Formats coordinates as space-separated `x,y` tokens.
pub fn format_coords<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> String {
    coords
        .into_iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats a road trace as space-separated `x,y:ENTER-EXIT` tokens.
pub fn format_road(steps: &[RoadStep]) -> String {
    steps
        .iter()
        .map(|s| format!("{}:{}-{}", s.coord, s.enter, s.exit))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats city nodes as space-separated `x,y:SIDE` tokens.
pub fn format_city<'a>(nodes: impl IntoIterator<Item = &'a CityNode>) -> String {
    nodes
        .into_iter()
        .map(|(c, d)| format!("{}:{}", c, d))
        .collect::<Vec<_>>()
        .join(" ")
}
