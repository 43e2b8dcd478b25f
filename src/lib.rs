//! Cloister tile placement engine library.
//!
//! Exposes the tile model, the board graph with its road and city tracers,
//! the text protocol and the autoplay driver for use by integration tests,
//! benchmarks and the binary entry points.

pub mod autoplay;
pub mod board;
pub mod engine;
pub mod protocol;
pub mod tile;
