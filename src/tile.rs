//! Two-pass tile assembly.
//!
//! Pass 1 walks every edge in the bounding box to fill the per-layer value
//! tables and resolve turn penalties; only then are the value-table offsets
//! each feature references known. Pass 2 serializes the `speeds` line layer
//! and the `turns` point layer against those tables.

use log::debug;

use crate::error::Error;
use crate::geometry::{clip, mercator, mercator::MercBounds, segment_length, TilePoint};
use crate::intern::InternTable;
use crate::model::{Edge, GeoCoord, TileFacade};
use crate::mvt::{geometry as mvt_geometry, GeomType, LayerWriter, Value};
use crate::turns::{collect_edge_turns, TurnData};
use crate::{DatasourceId, EdgeWeight, NO_GEOMETRY};

/// Deepest zoom level served.
pub const MAX_ZOOM: u8 = 22;

const LINE_KEYS: [&str; 4] = ["speed", "is_small", "datasource", "duration"];
const POINT_KEYS: [&str; 3] = ["bearing_in", "bearing_out", "weight"];

/// Slippy map tile coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileParams {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileParams {
    /// # Errors
    ///
    /// Returns [`Error::InvalidTile`] when the coordinate is outside the
    /// `z <= 22`, `x,y < 2^z` range.
    pub fn new(z: u8, x: u32, y: u32) -> Result<Self, Error> {
        let params = Self { z, x, y };
        if params.is_valid() {
            Ok(params)
        } else {
            Err(Error::InvalidTile { z, x, y })
        }
    }

    pub fn is_valid(self) -> bool {
        self.z <= MAX_ZOOM && self.x < 1u32 << self.z && self.y < 1u32 << self.z
    }
}

/// Attributes of one travel direction of an edge, resolved in pass 1.
#[derive(Debug, Clone, Copy)]
struct DirectedAttrs {
    weight: EdgeWeight,
    duration_offset: usize,
    datasource: DatasourceId,
}

/// Everything pass 1 learns about an edge, so pass 2 never has to
/// decompress the same geometry twice.
#[derive(Debug, Default)]
struct SegmentAttrs {
    forward: Option<DirectedAttrs>,
    reverse: Option<DirectedAttrs>,
    turns: Vec<TurnData>,
}

/// Renders the tile at `params` into `out`.
///
/// Appends a complete Mapbox Vector Tile blob: the `speeds` layer first,
/// then the `turns` layer, both always present. On error the buffer is
/// left in whatever state serialization reached; callers discard it.
///
/// # Errors
///
/// Returns [`Error::InvalidTile`] for out-of-range coordinates and
/// [`Error::InvalidSegment`] when a facade vector is shorter than the
/// segment position recorded on an edge.
pub fn render_tile<F: TileFacade>(
    facade: &F,
    params: TileParams,
    out: &mut Vec<u8>,
) -> Result<(), Error> {
    if !params.is_valid() {
        return Err(Error::InvalidTile {
            z: params.z,
            x: params.x,
            y: params.y,
        });
    }

    let (min_lon, min_lat, max_lon, max_lat) =
        mercator::tile_bounds_wgs84(params.z, params.x, params.y);
    let sw = GeoCoord::from_degrees(min_lon, min_lat);
    let ne = GeoCoord::from_degrees(max_lon, max_lat);

    let edges = facade.edges_in_box(sw, ne);
    debug!(
        "tile {}/{}/{}: {} edges in box",
        params.z,
        params.x,
        params.y,
        edges.len()
    );

    let mut line_ints = InternTable::new();
    let mut point_ints = InternTable::new();
    let mut max_datasource_id: DatasourceId = 0;
    let mut edge_attrs: Vec<SegmentAttrs> = Vec::with_capacity(edges.len());

    // Pass 1: tally attributes and resolve turns.
    for edge in &edges {
        let mut attrs = SegmentAttrs::default();

        if edge.forward_packed_geometry_id != NO_GEOMETRY {
            let weights = facade.uncompressed_weights(edge.forward_packed_geometry_id);
            let weight = vector_entry(&weights, edge.fwd_segment_position, "forward weight")?;
            let datasources = facade.uncompressed_datasources(edge.forward_packed_geometry_id);
            let datasource =
                vector_entry(&datasources, edge.fwd_segment_position, "forward datasource")?;

            attrs.forward = Some(DirectedAttrs {
                weight,
                duration_offset: line_ints.intern(weight),
                datasource,
            });
            max_datasource_id = max_datasource_id.max(datasource);

            let geometry = facade.uncompressed_geometry(edge.forward_packed_geometry_id);
            // The last segment of a chain ends at an intersection; that is
            // where turn penalties attach.
            if edge.fwd_segment_position + 1 == geometry.len() {
                attrs.turns =
                    collect_edge_turns(facade, edge, &weights, &geometry, &mut point_ints)?;
            }
        }

        if edge.reverse_packed_geometry_id != NO_GEOMETRY {
            let weights = facade.uncompressed_weights(edge.reverse_packed_geometry_id);
            // The reverse geometry runs the chain from the other end.
            let position = reverse_position(&weights, edge)?;
            let weight = weights[position];
            let datasources = facade.uncompressed_datasources(edge.reverse_packed_geometry_id);
            let datasource = vector_entry(&datasources, position, "reverse datasource")?;

            attrs.reverse = Some(DirectedAttrs {
                weight,
                duration_offset: line_ints.intern(weight),
                datasource,
            });
            max_datasource_id = max_datasource_id.max(datasource);
        }

        edge_attrs.push(attrs);
    }

    let bounds = mercator::tile_bounds_mercator(params.z, params.x, params.y);

    // Pass 2a: the speeds line layer.
    let mut speeds = LayerWriter::new("speeds");
    let mut feature_id = 1u64;
    for (edge, attrs) in edges.iter().zip(&edge_attrs) {
        let a = facade.coord_of_node(edge.u);
        let b = facade.coord_of_node(edge.v);
        let length = segment_length(a, b);

        if let Some(forward) = attrs.forward {
            if forward.weight != 0 && edge.forward_segment_id.enabled {
                emit_speed_line(
                    &mut speeds,
                    &mut feature_id,
                    edge,
                    (a, b),
                    forward,
                    length,
                    max_datasource_id,
                    &bounds,
                );
            }
        }
        if let Some(reverse) = attrs.reverse {
            if reverse.weight != 0 && edge.reverse_segment_id.enabled {
                emit_speed_line(
                    &mut speeds,
                    &mut feature_id,
                    edge,
                    (b, a),
                    reverse,
                    length,
                    max_datasource_id,
                    &bounds,
                );
            }
        }
    }

    for key in LINE_KEYS {
        speeds.add_key(key);
    }
    // Value table layout: the capped speed range, the two is_small booleans,
    // one name per datasource id, then the deduplicated durations.
    for speed in 0..128u64 {
        speeds.add_value(Value::Uint(speed));
    }
    speeds.add_value(Value::Bool(true));
    speeds.add_value(Value::Bool(false));
    for id in 0..=max_datasource_id {
        speeds.add_value(Value::String(facade.datasource_name(id)));
    }
    for &weight in line_ints.values() {
        // Weights are deciseconds; the wire carries seconds.
        speeds.add_value(Value::Double(f64::from(weight) / 10.0));
    }
    speeds.finish(out);

    // Pass 2b: the turns point layer.
    let mut turn_layer = LayerWriter::new("turns");
    let mut feature_id = 1u64;
    for (edge, attrs) in edges.iter().zip(&edge_attrs) {
        if attrs.turns.is_empty() {
            continue;
        }

        let point = mercator::project_to_tile(facade.coord_of_node(edge.v).to_point(), &bounds);
        if !clip::in_clip_box(point) {
            continue;
        }

        let commands = mvt_geometry::point_commands(point);
        for turn in &attrs.turns {
            let tags = [
                0,
                turn.bearing_in_offset as u32,
                1,
                turn.bearing_out_offset as u32,
                2,
                turn.weight_offset as u32,
            ];
            turn_layer.add_feature(feature_id, GeomType::Point, &tags, &commands);
            feature_id += 1;
        }
    }

    for key in POINT_KEYS {
        turn_layer.add_key(key);
    }
    for &value in point_ints.values() {
        turn_layer.add_value(Value::Uint(value as u64));
    }
    turn_layer.finish(out);

    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn emit_speed_line(
    layer: &mut LayerWriter,
    feature_id: &mut u64,
    edge: &Edge,
    (from, to): (GeoCoord, GeoCoord),
    attrs: DirectedAttrs,
    length: f64,
    max_datasource_id: DatasourceId,
    bounds: &MercBounds,
) {
    // Weight is deciseconds: x10 to seconds, x3.6 from m/s to km/h.
    let speed_kmh = (length / f64::from(attrs.weight) * 10.0 * 3.6).round() as u32;

    let from_point = mercator::project_to_tile(from.to_point(), bounds);
    let to_point = mercator::project_to_tile(to.to_point(), bounds);
    let Some((p0, p1)) = clip::clip_segment(from_point, to_point) else {
        return;
    };
    let line: [TilePoint; 2] = [p0, p1];

    let tags = [
        0,
        speed_kmh.min(127),
        1,
        128 + u32::from(!edge.is_tiny_component),
        2,
        130 + u32::from(attrs.datasource),
        3,
        130 + u32::from(max_datasource_id) + 1 + attrs.duration_offset as u32,
    ];
    layer.add_feature(
        *feature_id,
        GeomType::Line,
        &tags,
        &mvt_geometry::linestring_commands(&line),
    );
    *feature_id += 1;
}

fn vector_entry<T: Copy>(values: &[T], position: usize, what: &str) -> Result<T, Error> {
    values.get(position).copied().ok_or_else(|| {
        Error::InvalidSegment(format!(
            "{what} position {position} out of range ({} entries)",
            values.len()
        ))
    })
}

fn reverse_position(weights: &[EdgeWeight], edge: &Edge) -> Result<usize, Error> {
    weights
        .len()
        .checked_sub(edge.fwd_segment_position + 1)
        .ok_or_else(|| {
            Error::InvalidSegment(format!(
                "segment position {} out of range of reverse geometry ({} entries)",
                edge.fwd_segment_position,
                weights.len()
            ))
        })
}
