//! Read-only access to the routing graph, geometry store and spatial index.

use super::{Edge, GeoCoord, ShortcutData, UnpackedEdge};
use crate::{DatasourceId, EdgeWeight, NodeId, PackedGeometryId, SegmentNodeId, ShortcutId};

/// Backend interface the tile renderer draws from.
///
/// Implementations hold the immutable graph snapshot; the renderer borrows
/// the facade for the duration of a single request and performs reads only.
/// Concurrent renders over one facade are safe as long as the backend
/// tolerates concurrent reads.
pub trait TileFacade {
    /// All directed segments intersecting the given bounding box.
    fn edges_in_box(&self, sw: GeoCoord, ne: GeoCoord) -> Vec<Edge>;

    fn coord_of_node(&self, node: NodeId) -> GeoCoord;

    /// Per-segment traversal weights of a packed geometry, in deciseconds.
    fn uncompressed_weights(&self, id: PackedGeometryId) -> Vec<EdgeWeight>;

    /// Per-segment datasource ids of a packed geometry.
    fn uncompressed_datasources(&self, id: PackedGeometryId) -> Vec<DatasourceId>;

    /// Node chain of a packed geometry, excluding the chain origin.
    fn uncompressed_geometry(&self, id: PackedGeometryId) -> Vec<NodeId>;

    /// Outgoing edges of an edge-based node in the contracted graph.
    fn adjacent_shortcuts(&self, node: SegmentNodeId) -> Vec<ShortcutId>;

    fn shortcut_data(&self, shortcut: ShortcutId) -> ShortcutData;

    fn shortcut_target(&self, shortcut: ShortcutId) -> SegmentNodeId;

    /// Expands a shortcut into its two direct constituent edges, each
    /// carrying the cumulative path weight.
    fn unpack_shortcut(&self, source: SegmentNodeId, target: SegmentNodeId) -> Vec<UnpackedEdge>;

    /// Packed geometry handle of an edge-based edge.
    fn geometry_index(&self, edge: ShortcutId) -> PackedGeometryId;

    fn datasource_name(&self, id: DatasourceId) -> String;
}
