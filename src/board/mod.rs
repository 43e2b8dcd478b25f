//! Board representation and connectivity analysis.
//!
//! Contains grid coordinates, the board graph with its placement frontier
//! and edge validation, and the road and city tracers.

pub mod city;
pub mod coord;
pub mod graph;
pub mod road;

pub use city::{CityNode, CityTrace};
pub use coord::Coord;
pub use graph::{BoardGraph, PlaceMode};
pub use road::{road_tiles, RoadStep};
