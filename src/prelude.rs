// Re-export key components
pub use crate::error::Error;
pub use crate::model::{Edge, GeoCoord, SegmentId, ShortcutData, TileFacade, UnpackedEdge};
pub use crate::tile::{render_tile, TileParams};

// Core identifier and weight types
pub use crate::DatasourceId;
pub use crate::EdgeWeight; // deciseconds
pub use crate::NodeId;
pub use crate::PackedGeometryId;
pub use crate::SegmentNodeId;
pub use crate::ShortcutId;
pub use crate::NO_GEOMETRY;
