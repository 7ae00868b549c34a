//! Turn penalty extraction from the contracted graph.
//!
//! Only shortcut edges are enumerated, so turns that no route would ever
//! take are skipped along with their intersections. The turn cost falls
//! out of the contraction: the first-level shortcut weight minus the
//! summed segment weights of the edge leading into the intersection.

use hashbrown::{hash_map::Entry, HashMap};

use crate::error::Error;
use crate::geometry::bearing;
use crate::intern::InternTable;
use crate::model::{Edge, TileFacade};
use crate::{EdgeWeight, NodeId};

/// Offsets of one turn's attributes in the point layer value table.
#[derive(Debug, Clone, Copy)]
pub struct TurnData {
    pub bearing_in_offset: usize,
    pub bearing_out_offset: usize,
    pub weight_offset: usize,
}

/// Collects turn penalties for a segment terminating at intersection `v`.
///
/// `weights` and `geometry` are the forward vectors of the edge's packed
/// geometry, already decompressed by the caller. Bearings and turn weights
/// are interned into `point_ints` as they are discovered.
///
/// # Errors
///
/// Fails when the facade hands back an empty geometry for a shortcut
/// successor, which means the graph snapshot is inconsistent.
pub fn collect_edge_turns<F: TileFacade>(
    facade: &F,
    edge: &Edge,
    weights: &[EdgeWeight],
    geometry: &[NodeId],
    point_ints: &mut InternTable,
) -> Result<Vec<TurnData>, Error> {
    let sum_node_weight: EdgeWeight = weights.iter().sum();

    // The node right before the intersection on this edge; a single-segment
    // geometry starts at u itself.
    let before = if geometry.len() > 1 {
        geometry[geometry.len() - 2]
    } else {
        edge.u
    };
    let coord_a = facade.coord_of_node(before);
    let coord_b = facade.coord_of_node(edge.v);

    // Successor nodes reached through outgoing shortcuts, in discovery
    // order. A successor reached by several shortcuts keeps its first
    // position but takes the last-written weight.
    let mut successors: Vec<(NodeId, EdgeWeight)> = Vec::new();
    let mut positions: HashMap<NodeId, usize> = HashMap::new();

    for shortcut in facade.adjacent_shortcuts(edge.forward_segment_id.id) {
        if !facade.shortcut_data(shortcut).forward {
            continue;
        }

        let target = facade.shortcut_target(shortcut);
        let unpacked = facade.unpack_shortcut(edge.forward_segment_id.id, target);
        // A single constituent edge is just the edge we are already on, not
        // a turn.
        if unpacked.len() < 2 {
            continue;
        }

        let successor_geometry =
            facade.uncompressed_geometry(facade.geometry_index(unpacked[1].id));
        let c_node = *successor_geometry.first().ok_or_else(|| {
            Error::InvalidSegment(format!(
                "empty geometry for shortcut successor edge {}",
                unpacked[1].id
            ))
        })?;

        let turn_weight = unpacked[0].weight - sum_node_weight;
        match positions.entry(c_node) {
            Entry::Occupied(slot) => successors[*slot.get()].1 = turn_weight,
            Entry::Vacant(slot) => {
                slot.insert(successors.len());
                successors.push((c_node, turn_weight));
            }
        }
    }

    if successors.is_empty() {
        return Ok(Vec::new());
    }

    let bearing_in = bearing(coord_a, coord_b) as u64;
    let bearing_in_offset = point_ints.intern(bearing_in as i32);

    Ok(successors
        .iter()
        .map(|&(c_node, turn_weight)| {
            let bearing_out = bearing(coord_b, facade.coord_of_node(c_node)) as u64;
            TurnData {
                bearing_in_offset,
                bearing_out_offset: point_ints.intern(bearing_out as i32),
                weight_offset: point_ints.intern(turn_weight),
            }
        })
        .collect())
}
