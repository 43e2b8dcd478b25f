//! Tile placement protocol handling.
//!
//! This module implements parsing and formatting for the line-based protocol
//! the `cloister` binary speaks: text notation for coordinates, sides and
//! traces, and the command parser for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{
    format_city, format_coords, format_road, parse_coord, parse_rotation, parse_side,
    NotationError,
};
pub use parser::{parse_command, Command, PlaceRequest};
