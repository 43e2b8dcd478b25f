//! Engine state management.
//!
//! Holds the current board, the active tile catalog, engine options and the
//! random source used by `go`. Each handler writes its protocol response to
//! the given writer.

use std::collections::HashMap;
use std::io::{self, Write};
use std::path::Path;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::board::{BoardGraph, Coord, PlaceMode};
use crate::protocol::notation::{format_city, format_coords, format_road};
use crate::protocol::parser::PlaceRequest;
use crate::tile::{load_catalog, standard_catalog, Catalog, CatalogError, Direction};

/// Errors surfaced by engine commands.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown tile '{0}'")]
    UnknownTile(String),

    #[error("option {name} needs a value")]
    MissingValue { name: String },

    #[error("invalid value '{value}' for option {name}")]
    InvalidValue { name: String, value: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub board: BoardGraph,
    pub options: HashMap<String, String>,
    catalog: Catalog,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with the built-in catalog and a fresh board.
    pub fn new() -> Self {
        Engine {
            board: BoardGraph::new(),
            options: HashMap::new(),
            catalog: standard_catalog().clone(),
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Starts a new board seeded with the named tile, or with the first
    /// catalog tile when no name is given.
    pub fn new_game(&mut self, seed: Option<&str>) -> Result<(), EngineError> {
        let tile = match seed {
            Some(name) => self
                .catalog
                .get(name)
                .ok_or_else(|| EngineError::UnknownTile(name.to_string()))?,
            None => self.catalog.first(),
        };
        self.board = BoardGraph::with_seed(tile.clone());
        debug!(seed = %tile, "new game");
        Ok(())
    }

    /// Sets an engine option and applies its effect.
    ///
    /// `Catalog` loads a JSON tile catalog; `Seed` reseeds the random source.
    /// Other names are stored without effect.
    pub fn set_option(&mut self, name: String, value: Option<String>) -> Result<(), EngineError> {
        match name.as_str() {
            "Catalog" => {
                let path = value
                    .as_deref()
                    .ok_or_else(|| EngineError::MissingValue { name: name.clone() })?;
                self.catalog = load_catalog(Path::new(path))?;
            }
            "Seed" => {
                let raw = value
                    .as_deref()
                    .ok_or_else(|| EngineError::MissingValue { name: name.clone() })?;
                let seed = raw.parse::<u64>().map_err(|_| EngineError::InvalidValue {
                    name: name.clone(),
                    value: raw.to_string(),
                })?;
                self.rng = SmallRng::seed_from_u64(seed);
                info!(seed, "reseeded random source");
            }
            _ => {}
        }
        self.options.insert(name, value.unwrap_or_default());
        Ok(())
    }

    /// Handles the handshake: writes id, options, protocol_version, and ctiok.
    pub fn handle_cti<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "id name cloister")?;
        writeln!(out, "id author cloister")?;
        writeln!(out, "option name Catalog type string default <builtin>")?;
        writeln!(out, "option name Seed type string default <entropy>")?;
        writeln!(out, "protocol_version 1")?;
        writeln!(out, "ctiok")?;
        out.flush()
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `place`: replies `placed`/`rejected`, or `legal`/`illegal`
    /// for a dry run.
    pub fn handle_place<W: Write>(&mut self, request: &PlaceRequest, out: &mut W) -> io::Result<()> {
        let Some(template) = self.catalog.get(&request.tile) else {
            return write_error(out, &EngineError::UnknownTile(request.tile.clone()));
        };
        let tile = template.rotated(request.rotation);
        let coord = request.coord;

        let reply = if request.dry_run {
            if self.board.place(tile, coord, PlaceMode::DryRun) {
                "legal"
            } else {
                "illegal"
            }
        } else if self.board.place(tile, coord, PlaceMode::Checked) {
            "placed"
        } else {
            "rejected"
        };
        writeln!(out, "{} {}", reply, coord)?;
        out.flush()
    }

    /// Handles `tile <x> <y>`.
    pub fn handle_tile<W: Write>(&self, coord: Coord, out: &mut W) -> io::Result<()> {
        match self.board.tile_at(coord) {
            Some(tile) => writeln!(out, "tile {} {} rot {}", coord, tile.name(), tile.rotation())?,
            None => writeln!(out, "empty {}", coord)?,
        }
        out.flush()
    }

    /// Handles `tiles`: every placed tile as `x,y:name@rot`.
    pub fn handle_tiles<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let listed: Vec<String> = self
            .board
            .tiles()
            .into_iter()
            .map(|(c, t)| format!("{}:{}", c, t))
            .collect();
        writeln!(out, "tiles {}", listed.join(" "))?;
        out.flush()
    }

    /// Handles `border`: the frontier cells in coordinate order.
    pub fn handle_border<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "border {}", format_coords(self.board.border_coordinates()))?;
        out.flush()
    }

    /// Handles `road <x> <y> <side>`.
    pub fn handle_road<W: Write>(&self, coord: Coord, side: Direction, out: &mut W) -> io::Result<()> {
        if !self.board.tile_at(coord).is_some_and(|t| t.has_road(side)) {
            writeln!(out, "error no road at {}:{}", coord, side)?;
            return out.flush();
        }
        let steps = self.board.trace_road(coord, side);
        let status = if self.board.is_road_complete(&steps) {
            "closed"
        } else {
            "open"
        };
        writeln!(out, "road {} {}", status, format_road(&steps))?;
        out.flush()
    }

    /// Handles `city <x> <y> <side>`.
    pub fn handle_city<W: Write>(&self, coord: Coord, side: Direction, out: &mut W) -> io::Result<()> {
        if !self.board.tile_at(coord).is_some_and(|t| t.has_city(side)) {
            writeln!(out, "error no city at {}:{}", coord, side)?;
            return out.flush();
        }
        let city = self.board.trace_city(coord, side);
        let status = if city.complete { "complete" } else { "open" };
        writeln!(out, "city {} {}", status, format_city(&city.nodes))?;
        out.flush()
    }

    /// Handles `go <tile>`: picks a uniformly random legal placement for the
    /// tile without committing it.
    pub fn handle_go<W: Write>(&mut self, tile: &str, out: &mut W) -> io::Result<()> {
        let Some(template) = self.catalog.get(tile) else {
            return write_error(out, &EngineError::UnknownTile(tile.to_string()));
        };
        let legal = self.board.legal_placements(template);
        debug!(tile, candidates = legal.len(), "searching placements");
        match legal.choose(&mut self.rng) {
            Some((coord, oriented)) => {
                writeln!(out, "bestplacement {} rot {}", coord, oriented.rotation())?
            }
            None => writeln!(out, "bestplacement none")?,
        }
        out.flush()
    }
}

/// Writes an `error` response line.
pub fn write_error<W: Write>(out: &mut W, err: &EngineError) -> io::Result<()> {
    writeln!(out, "error {}", err)?;
    out.flush()
}
