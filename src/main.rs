//! Cloister -- a tile placement engine speaking a line-based text protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to see more.

use std::io::{self, BufRead, Write};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use cloister::engine::{write_error, Engine};
use cloister::protocol::parser::{parse_command, Command};

/// Runs the protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };
        if cmd == Command::Quit {
            break;
        }

        if let Err(e) = dispatch(&mut engine, cmd, &mut out) {
            warn!("failed to write response: {}", e);
            break;
        }
    }
    let _ = out.flush();
}

fn dispatch<W: Write>(engine: &mut Engine, cmd: Command, out: &mut W) -> io::Result<()> {
    match cmd {
        Command::Cti => engine.handle_cti(out),
        Command::IsReady => engine.handle_isready(out),
        Command::SetOption { name, value } => match engine.set_option(name, value) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("{}", e);
                write_error(out, &e)
            }
        },
        Command::NewGame { seed } => match engine.new_game(seed.as_deref()) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("{}", e);
                write_error(out, &e)
            }
        },
        Command::Place(request) => engine.handle_place(&request, out),
        Command::Tile { coord } => engine.handle_tile(coord, out),
        Command::Tiles => engine.handle_tiles(out),
        Command::Border => engine.handle_border(out),
        Command::Road { coord, side } => engine.handle_road(coord, side, out),
        Command::City { coord, side } => engine.handle_city(coord, side, out),
        Command::Go { tile } => engine.handle_go(&tile, out),
        Command::Quit => Ok(()),
    }
}
