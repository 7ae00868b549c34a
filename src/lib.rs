//! Vector tile rendering core for a road routing engine.
//!
//! Given a slippy-map tile coordinate, renders a Mapbox Vector Tile (2.1)
//! with two layers: `speeds`, one line feature per directed road segment
//! annotated with speed, duration and datasource, and `turns`, one point
//! feature per turn penalty at the intersections inside the tile.
//!
//! Graph and geometry storage stay behind the [`model::TileFacade`] trait;
//! the renderer only drives bounding-box queries, geometry decompression
//! and shortcut unpacking against it.

pub mod error;
pub mod geometry;
pub mod intern;
pub mod model;
pub mod mvt;
pub mod prelude;
pub mod tile;
pub mod turns;

pub use error::Error;
pub use tile::{render_tile, TileParams};

/// Node identifier in the node-based (geometry) graph.
pub type NodeId = u32;
/// Identifier of a directed edge-based node (a road segment chain).
pub type SegmentNodeId = u32;
/// Edge identifier in the contracted edge-based graph.
pub type ShortcutId = u32;
/// Opaque handle into the compressed per-edge geometry store.
pub type PackedGeometryId = u32;
/// Segment traversal weight in deciseconds.
pub type EdgeWeight = i32;
/// Identifier of the source a segment speed came from.
pub type DatasourceId = u8;

/// Marks a travel direction without stored geometry.
pub const NO_GEOMETRY: PackedGeometryId = PackedGeometryId::MAX;
