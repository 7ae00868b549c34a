//! Edge records produced by the spatial index query.

use crate::{EdgeWeight, NodeId, PackedGeometryId, SegmentNodeId, ShortcutId};

/// Reference to a directed edge-based node with its traversal flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentId {
    pub id: SegmentNodeId,
    pub enabled: bool,
}

/// One directed road segment returned by the edges-in-box query.
///
/// Packed geometry vectors exclude the chain origin: for a chain of `n`
/// segments the node, weight and datasource vectors all have `n` entries,
/// and the last node entry is the terminating intersection.
#[derive(Debug, Clone)]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
    pub forward_packed_geometry_id: PackedGeometryId,
    pub reverse_packed_geometry_id: PackedGeometryId,
    /// Index of this segment within the forward packed geometry.
    pub fwd_segment_position: usize,
    pub forward_segment_id: SegmentId,
    pub reverse_segment_id: SegmentId,
    /// Segment belongs to a small disconnected subgraph.
    pub is_tiny_component: bool,
}

/// Travel direction flags of a contracted graph edge.
#[derive(Debug, Clone, Copy)]
pub struct ShortcutData {
    pub forward: bool,
    pub backward: bool,
}

/// Constituent edge of an unpacked shortcut.
#[derive(Debug, Clone, Copy)]
pub struct UnpackedEdge {
    pub id: ShortcutId,
    /// Cumulative path weight up to and including this edge, in deciseconds.
    pub weight: EdgeWeight,
}
