//! Geometry command encoding.
//!
//! Commands are packed u32 values: `(count << 3) | cmd` headers followed by
//! zig-zag encoded coordinate deltas relative to a cursor starting at (0, 0).

use super::pbf::zigzag32;
use crate::geometry::TilePoint;

const MOVE_TO: u32 = 1;
const LINE_TO: u32 = 2;

fn command(cmd: u32, count: u32) -> u32 {
    count << 3 | cmd
}

/// Encodes a polyline as one MoveTo followed by a LineTo run.
///
/// Lines shorter than two points have no wire form and yield an empty
/// command stream.
pub fn linestring_commands(line: &[TilePoint]) -> Vec<u32> {
    if line.len() < 2 {
        return Vec::new();
    }

    let mut commands = Vec::with_capacity(2 + line.len() * 2);
    let mut cursor = TilePoint { x: 0, y: 0 };

    commands.push(command(MOVE_TO, 1));
    commands.push(zigzag32(line[0].x - cursor.x));
    commands.push(zigzag32(line[0].y - cursor.y));
    cursor = line[0];

    commands.push(command(LINE_TO, (line.len() - 1) as u32));
    for &p in &line[1..] {
        commands.push(zigzag32(p.x - cursor.x));
        commands.push(zigzag32(p.y - cursor.y));
        cursor = p;
    }
    commands
}

/// Encodes a single point as one absolute MoveTo.
pub fn point_commands(p: TilePoint) -> Vec<u32> {
    vec![command(MOVE_TO, 1), zigzag32(p.x), zigzag32(p.y)]
}
