//! Autoplay CLI.
//!
//! Builds a random board by drawing and placing tiles, then writes a JSON
//! report of the placements and the finished features.
//!
//! Usage:
//!   cargo run --release --bin autoplay -- [OPTIONS]
//!
//! Options:
//!   --tiles N       Number of tiles to draw (default: 40)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --catalog FILE  JSON tile catalog (default: built-in tiles)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress summary output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use tracing::error;
use tracing_subscriber::EnvFilter;

use cloister::autoplay::{self, AutoplayConfig};
use cloister::tile::load_catalog;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    let mut config = AutoplayConfig::default();
    let mut catalog_path: Option<PathBuf> = None;
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--tiles" => {
                i += 1;
                config.tiles = parse_arg(&args, i, "--tiles");
            }
            "--seed" => {
                i += 1;
                config.seed = parse_arg(&args, i, "--seed");
            }
            "--catalog" => {
                i += 1;
                catalog_path = Some(PathBuf::from(arg_value(&args, i, "--catalog")));
            }
            "--output" => {
                i += 1;
                output_path = Some(arg_value(&args, i, "--output").to_string());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    if !quiet {
        eprintln!("Autoplay: {} tiles, seed {}", config.tiles, config.seed);
    }

    let start = Instant::now();
    let report = match &catalog_path {
        Some(path) => match load_catalog(path) {
            Ok(catalog) => autoplay::run_with_catalog(&config, &catalog),
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        },
        None => autoplay::run(&config),
    };

    if !quiet {
        eprintln!("Completed in {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);
        autoplay::print_summary(&report);
    }

    let written = match &output_path {
        Some(path) => File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            report.write_json(&mut writer)?;
            writer.flush()
        }),
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            report.write_json(&mut writer).and_then(|_| writer.flush())
        }
    };
    if let Err(e) = written {
        error!("failed to write report: {}", e);
        process::exit(1);
    }
    if let (Some(path), false) = (&output_path, quiet) {
        eprintln!("Wrote report to {}", path);
    }
}

fn arg_value<'a>(args: &'a [String], i: usize, flag: &str) -> &'a str {
    match args.get(i) {
        Some(v) => v,
        None => {
            eprintln!("{} needs a value", flag);
            print_usage();
            process::exit(1);
        }
    }
}

fn parse_arg<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    let raw = arg_value(args, i, flag);
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            eprintln!("invalid {} value: '{}'", flag, raw);
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: autoplay [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tiles N        Number of tiles to draw (default: 40)");
    eprintln!("  --seed N         Random seed, 0 for entropy (default: 0)");
    eprintln!("  --catalog FILE   JSON tile catalog (default: built-in tiles)");
    eprintln!("  --output FILE    Output file path (default: stdout)");
    eprintln!("  --quiet          Suppress summary output");
    eprintln!("  --help           Show this help");
}
