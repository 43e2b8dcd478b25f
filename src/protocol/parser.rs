//! Command parser for the tile placement protocol.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the session main loop can dispatch on.

use tracing::warn;

use super::notation::{parse_coord, parse_rotation, parse_side};
use crate::board::Coord;
use crate::tile::Direction;

/// A placement request from the `place` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceRequest {
    pub tile: String,
    pub coord: Coord,
    pub rotation: u8,
    pub dry_run: bool,
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Initialize the protocol handshake.
    Cti,

    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a fresh board, optionally seeded with a named tile.
    NewGame { seed: Option<String> },

    /// Place (or dry-run) a tile: `place <tile> <x> <y> [rot <n>] [dryrun]`.
    Place(PlaceRequest),

    /// Report the tile at a cell: `tile <x> <y>`.
    Tile { coord: Coord },

    /// List every placed tile.
    Tiles,

    /// List the frontier cells.
    Border,

    /// Trace a road: `road <x> <y> <side>`.
    Road { coord: Coord, side: Direction },

    /// Trace a city: `city <x> <y> <side>`.
    City { coord: Coord, side: Direction },

    /// Pick a random legal placement for a tile: `go <tile>`.
    Go { tile: String },

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, _) = tokens.split_first()?;

    match head {
        "cti" => Some(Command::Cti),
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "tiles" => Some(Command::Tiles),
        "border" => Some(Command::Border),

        "newgame" => Some(Command::NewGame {
            seed: tokens.get(1).map(|s| s.to_string()),
        }),
        "setoption" => parse_setoption(&tokens),
        "place" => parse_place(&tokens),
        "tile" => parse_tile(&tokens),
        "road" | "city" => parse_trace(&tokens),
        "go" => parse_go(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");
    let (name_parts, value) = match value_idx {
        Some(vi) => {
            let value_parts = &tokens[vi + 1..];
            let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
            (&tokens[2..vi], value)
        }
        None => (&tokens[2..], None),
    };
    if name_parts.is_empty() {
        warn!("malformed setoption: empty name");
        return None;
    }

    Some(Command::SetOption {
        name: name_parts.join(" "),
        value,
    })
}

/// Parses `place <tile> <x> <y> [rot <n>] [dryrun]`.
fn parse_place(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 4 {
        warn!("malformed place: expected 'place <tile> <x> <y> [rot <n>] [dryrun]'");
        return None;
    }
    let coord = match parse_coord(tokens[2], tokens[3]) {
        Ok(c) => c,
        Err(e) => {
            warn!("malformed place: {}", e);
            return None;
        }
    };

    let mut request = PlaceRequest {
        tile: tokens[1].to_string(),
        coord,
        rotation: 0,
        dry_run: false,
    };
    let mut i = 4;
    while i < tokens.len() {
        match tokens[i] {
            "rot" => {
                i += 1;
                let Some(raw) = tokens.get(i) else {
                    warn!("malformed place: 'rot' needs a value");
                    return None;
                };
                match parse_rotation(raw) {
                    Ok(r) => request.rotation = r,
                    Err(e) => {
                        warn!("malformed place: {}", e);
                        return None;
                    }
                }
            }
            "dryrun" => request.dry_run = true,
            other => warn!("unknown place parameter: '{}'", other),
        }
        i += 1;
    }

    Some(Command::Place(request))
}

/// Parses `tile <x> <y>`.
fn parse_tile(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 {
        warn!("malformed tile: expected 'tile <x> <y>'");
        return None;
    }
    match parse_coord(tokens[1], tokens[2]) {
        Ok(coord) => Some(Command::Tile { coord }),
        Err(e) => {
            warn!("malformed tile: {}", e);
            None
        }
    }
}

/// Parses `road <x> <y> <side>` and `city <x> <y> <side>`.
fn parse_trace(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 4 {
        warn!("malformed {}: expected '{} <x> <y> <side>'", tokens[0], tokens[0]);
        return None;
    }
    let parsed = parse_coord(tokens[1], tokens[2])
        .and_then(|coord| parse_side(tokens[3]).map(|side| (coord, side)));
    match parsed {
        Ok((coord, side)) if tokens[0] == "road" => Some(Command::Road { coord, side }),
        Ok((coord, side)) => Some(Command::City { coord, side }),
        Err(e) => {
            warn!("malformed {}: {}", tokens[0], e);
            None
        }
    }
}

/// Parses `go <tile>`.
fn parse_go(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        Some(tile) => Some(Command::Go {
            tile: tile.to_string(),
        }),
        None => {
            warn!("malformed go: expected 'go <tile>'");
            None
        }
    }
}
