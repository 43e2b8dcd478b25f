//! Tile features: edge terrain plus the roads and cities inside a tile.
//!
//! A `TileFeature` is authored as a list of road segments and a list of city
//! patches. Edge terrain is derived from those lists once, at construction,
//! and the value is immutable afterwards. Rotation produces a new value.

use std::fmt;

use super::direction::{Direction, Endpoint, ALL_DIRECTIONS};
use super::terrain::TerrainKind;

/// A continuous road through a tile, joining two endpoints.
pub type RoadSegment = [Endpoint; 2];

/// Maximum number of edges a single city patch can cover.
pub const MAX_CITY_PATCH: usize = 4;

/// Errors raised when a tile layout is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    #[error("tile '{tile}': road segment needs exactly 2 endpoints, got {len}")]
    RoadSegmentSize { tile: String, len: usize },

    #[error("tile '{tile}': road segment joins endpoint {end} to itself")]
    DegenerateRoad { tile: String, end: Endpoint },

    #[error("tile '{tile}': edge {side} appears in more than one road segment")]
    RoadEdgeReused { tile: String, side: Direction },

    #[error("tile '{tile}': city patch is empty")]
    EmptyCityPatch { tile: String },

    #[error("tile '{tile}': city patch covers at most 4 edges, got {len}")]
    CityPatchTooLarge { tile: String, len: usize },

    #[error("tile '{tile}': edge {side} appears in more than one city patch")]
    CityEdgeReused { tile: String, side: Direction },

    #[error("tile '{tile}': edge {side} is declared as both road and city")]
    RoadCityConflict { tile: String, side: Direction },
}

/// An immutable description of one tile in one orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFeature {
    name: String,
    /// Quarter turns clockwise from the authored orientation, 0..=3.
    rotation: u8,
    roads: Vec<RoadSegment>,
    cities: Vec<Vec<Direction>>,
    /// Terrain per edge, indexed by `Direction as usize`.
    edges: [TerrainKind; 4],
    center: Option<TerrainKind>,
}

impl TileFeature {
    /// Builds a tile from its road segments and city patches, validating the
    /// layout and deriving the terrain of every edge.
    pub fn new<R, C>(name: impl Into<String>, roads: &[R], cities: &[C]) -> Result<Self, TileError>
    where
        R: AsRef<[Endpoint]>,
        C: AsRef<[Direction]>,
    {
        let name = name.into();
        let mut edges = [TerrainKind::Grass; 4];
        let mut center = None;
        let mut road_edges = [false; 4];
        let mut segments = Vec::with_capacity(roads.len());

        for road in roads {
            let road = road.as_ref();
            let &[a, b] = road else {
                return Err(TileError::RoadSegmentSize { tile: name, len: road.len() });
            };
            if a == b {
                return Err(TileError::DegenerateRoad { tile: name, end: a });
            }
            for end in [a, b] {
                match end {
                    Endpoint::Side(side) => {
                        if road_edges[side as usize] {
                            return Err(TileError::RoadEdgeReused { tile: name, side });
                        }
                        road_edges[side as usize] = true;
                        edges[side as usize] = TerrainKind::Road;
                    }
                    Endpoint::Center => center = Some(TerrainKind::Crossroad),
                }
            }
            segments.push([a, b]);
        }

        let mut city_edges = [false; 4];
        let mut patches = Vec::with_capacity(cities.len());

        for patch in cities {
            let patch = patch.as_ref();
            if patch.is_empty() {
                return Err(TileError::EmptyCityPatch { tile: name });
            }
            if patch.len() > MAX_CITY_PATCH {
                return Err(TileError::CityPatchTooLarge { tile: name, len: patch.len() });
            }
            for &side in patch {
                if city_edges[side as usize] {
                    return Err(TileError::CityEdgeReused { tile: name, side });
                }
                if road_edges[side as usize] {
                    return Err(TileError::RoadCityConflict { tile: name, side });
                }
                city_edges[side as usize] = true;
                edges[side as usize] = TerrainKind::City;
            }
            patches.push(patch.to_vec());
        }

        Ok(TileFeature {
            name,
            rotation: 0,
            roads: segments,
            cities: patches,
            edges,
            center,
        })
    }

    /// Returns the tile's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of clockwise quarter turns applied, 0..=3.
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Returns the terrain on the given edge.
    pub fn edge(&self, side: Direction) -> TerrainKind {
        self.edges[side as usize]
    }

    /// Returns the terrain at an endpoint. Edges always have terrain; the
    /// center is `Crossroad` or absent.
    pub fn terrain(&self, end: Endpoint) -> Option<TerrainKind> {
        match end {
            Endpoint::Side(side) => Some(self.edge(side)),
            Endpoint::Center => self.center,
        }
    }

    pub fn has_road(&self, side: Direction) -> bool {
        self.edge(side) == TerrainKind::Road
    }

    pub fn has_city(&self, side: Direction) -> bool {
        self.edge(side) == TerrainKind::City
    }

    pub fn has_crossroad(&self) -> bool {
        self.center == Some(TerrainKind::Crossroad)
    }

    /// Returns the far endpoint of the road segment entering at `side`.
    ///
    /// `Some(Endpoint::Center)` means the road ends at a crossroad: callers
    /// must treat that as a branch point, not a through-connection. Returns
    /// `None` when the edge carries no road.
    pub fn road_partner(&self, side: Direction) -> Option<Endpoint> {
        let from = Endpoint::Side(side);
        self.roads.iter().find_map(|&[a, b]| {
            if a == from {
                Some(b)
            } else if b == from {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Returns true if two distinct edges belong to the same city patch.
    pub fn cities_connect(&self, a: Direction, b: Direction) -> bool {
        a != b
            && self
                .cities
                .iter()
                .any(|patch| patch.contains(&a) && patch.contains(&b))
    }

    /// Returns this tile turned a quarter turn clockwise.
    pub fn rotate_clockwise(&self) -> TileFeature {
        let mut edges = [TerrainKind::Grass; 4];
        for side in ALL_DIRECTIONS {
            edges[side.clockwise() as usize] = self.edges[side as usize];
        }
        TileFeature {
            name: self.name.clone(),
            rotation: (self.rotation + 1) % 4,
            roads: self
                .roads
                .iter()
                .map(|&[a, b]| [a.clockwise(), b.clockwise()])
                .collect(),
            cities: self
                .cities
                .iter()
                .map(|patch| patch.iter().map(|d| d.clockwise()).collect())
                .collect(),
            edges,
            center: self.center,
        }
    }

    /// Returns this tile turned `quarter_turns` times clockwise.
    pub fn rotated(&self, quarter_turns: u8) -> TileFeature {
        (0..quarter_turns % 4).fold(self.clone(), |tile, _| tile.rotate_clockwise())
    }

    /// Returns the four orientations of this tile, starting with itself.
    pub fn rotations(&self) -> impl Iterator<Item = TileFeature> {
        std::iter::successors(Some(self.clone()), |t| Some(t.rotate_clockwise())).take(4)
    }
}

impl fmt::Display for TileFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    const N: Endpoint = Endpoint::Side(North);
    const E: Endpoint = Endpoint::Side(East);
    const S: Endpoint = Endpoint::Side(South);
    const W: Endpoint = Endpoint::Side(West);
    const C: Endpoint = Endpoint::Center;

    fn road_and_city() -> TileFeature {
        TileFeature::new("t", &[[E, W]], &[[North]]).unwrap()
    }

    #[test]
    fn edge_terrain_is_derived() {
        let t = road_and_city();
        assert_eq!(t.edge(North), TerrainKind::City);
        assert_eq!(t.edge(East), TerrainKind::Road);
        assert_eq!(t.edge(South), TerrainKind::Grass);
        assert_eq!(t.edge(West), TerrainKind::Road);
        assert_eq!(t.terrain(Endpoint::Center), None);
        assert!(!t.has_crossroad());
        assert!(t.has_road(East) && !t.has_road(North));
        assert!(t.has_city(North) && !t.has_city(South));
    }

    #[test]
    fn road_partner_follows_segment() {
        let t = road_and_city();
        assert_eq!(t.road_partner(East), Some(W));
        assert_eq!(t.road_partner(West), Some(E));
        assert_eq!(t.road_partner(North), None);
        assert_eq!(t.road_partner(South), None);
    }

    #[test]
    fn crossroad_roads_lead_to_center() {
        let t = TileFeature::new("x", &[[N, C], [E, C], [S, C], [W, C]], &[] as &[&[Direction]]).unwrap();
        assert!(t.has_crossroad());
        assert_eq!(t.terrain(Endpoint::Center), Some(TerrainKind::Crossroad));
        for side in ALL_DIRECTIONS {
            assert_eq!(t.edge(side), TerrainKind::Road);
            assert_eq!(t.road_partner(side), Some(C));
        }
    }

    #[test]
    fn cities_connect_within_patch_only() {
        let split = TileFeature::new("split", &[] as &[[Endpoint; 2]], &[vec![West], vec![East]]).unwrap();
        assert!(!split.cities_connect(West, East));
        assert!(!split.cities_connect(West, West));

        let joined = TileFeature::new("joined", &[] as &[[Endpoint; 2]], &[vec![West, East]]).unwrap();
        assert!(joined.cities_connect(West, East));
        assert!(joined.cities_connect(East, West));
        assert!(!joined.cities_connect(East, North));
    }

    #[test]
    fn rotation_relabels_edges_clockwise() {
        let t = road_and_city().rotate_clockwise();
        assert_eq!(t.rotation(), 1);
        assert_eq!(t.edge(East), TerrainKind::City);
        assert_eq!(t.edge(North), TerrainKind::Road);
        assert_eq!(t.edge(South), TerrainKind::Road);
        assert_eq!(t.edge(West), TerrainKind::Grass);
        assert_eq!(t.road_partner(North), Some(S));
        assert_eq!(t.name(), "t");
    }

    #[test]
    fn four_rotations_restore_tile() {
        let t = TileFeature::new("mixed", &[[S, E]], &[[North, West]]).unwrap();
        assert_eq!(t.rotated(4), t);
        assert_eq!(t.rotated(2), t.rotate_clockwise().rotate_clockwise());
        let all: Vec<TileFeature> = t.rotations().collect();
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].rotate_clockwise(), t);
        assert_eq!(all.iter().map(|r| r.rotation()).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn rejects_wrong_sized_road() {
        let err = TileFeature::new("bad", &[vec![N, S, E]], &[] as &[&[Direction]]).unwrap_err();
        assert_eq!(err, TileError::RoadSegmentSize { tile: "bad".into(), len: 3 });
        let err = TileFeature::new("bad", &[vec![N]], &[] as &[&[Direction]]).unwrap_err();
        assert!(matches!(err, TileError::RoadSegmentSize { len: 1, .. }));
    }

    #[test]
    fn rejects_degenerate_and_reused_roads() {
        let err = TileFeature::new("bad", &[[N, N]], &[] as &[&[Direction]]).unwrap_err();
        assert!(matches!(err, TileError::DegenerateRoad { .. }));
        let err = TileFeature::new("bad", &[[N, S], [N, E]], &[] as &[&[Direction]]).unwrap_err();
        assert!(matches!(err, TileError::RoadEdgeReused { side: North, .. }));
    }

    #[test]
    fn rejects_bad_city_patches() {
        let none: &[[Endpoint; 2]] = &[];
        let err = TileFeature::new("bad", none, &[vec![North, East, South, West, North]]).unwrap_err();
        assert!(matches!(err, TileError::CityPatchTooLarge { len: 5, .. }));
        let err = TileFeature::new("bad", none, &[Vec::<Direction>::new()]).unwrap_err();
        assert!(matches!(err, TileError::EmptyCityPatch { .. }));
        let err = TileFeature::new("bad", none, &[vec![North], vec![North, East]]).unwrap_err();
        assert!(matches!(err, TileError::CityEdgeReused { side: North, .. }));
    }

    #[test]
    fn rejects_edge_that_is_road_and_city() {
        let err = TileFeature::new("bad", &[[N, S]], &[[North]]).unwrap_err();
        assert_eq!(err, TileError::RoadCityConflict { tile: "bad".into(), side: North });
    }
}
