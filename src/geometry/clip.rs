//! Segment clipping against the buffered tile box.

use super::TilePoint;
use crate::mvt::{BUFFER, EXTENT};

/// Lower bound of the clip box in grid units.
pub const CLIP_MIN: i32 = -BUFFER;
/// Upper bound of the clip box in grid units.
pub const CLIP_MAX: i32 = EXTENT as i32 + BUFFER;

const LEFT: u8 = 0b0001;
const RIGHT: u8 = 0b0010;
const BELOW: u8 = 0b0100;
const ABOVE: u8 = 0b1000;

/// Inclusive containment test against the buffered tile box.
pub fn in_clip_box(p: TilePoint) -> bool {
    p.x >= CLIP_MIN && p.x <= CLIP_MAX && p.y >= CLIP_MIN && p.y <= CLIP_MAX
}

/// Clips the segment `a`-`b` with Cohen–Sutherland.
///
/// Returns `None` for segments fully outside the box and for degenerate
/// segments with coincident endpoints, whose clipped form would collapse
/// to a single point. Intersection points are rounded back to grid units;
/// since the box bounds are themselves integers the result stays inside
/// the box.
pub fn clip_segment(a: TilePoint, b: TilePoint) -> Option<(TilePoint, TilePoint)> {
    if a == b {
        return None;
    }

    let (mut x0, mut y0) = (f64::from(a.x), f64::from(a.y));
    let (mut x1, mut y1) = (f64::from(b.x), f64::from(b.y));
    let mut code0 = outcode(x0, y0);
    let mut code1 = outcode(x1, y1);

    loop {
        if code0 | code1 == 0 {
            let p0 = TilePoint {
                x: x0.round() as i32,
                y: y0.round() as i32,
            };
            let p1 = TilePoint {
                x: x1.round() as i32,
                y: y1.round() as i32,
            };
            return Some((p0, p1));
        }
        if code0 & code1 != 0 {
            return None;
        }

        let outside = if code0 != 0 { code0 } else { code1 };
        let (x, y) = if outside & ABOVE != 0 {
            (
                x0 + (x1 - x0) * (f64::from(CLIP_MAX) - y0) / (y1 - y0),
                f64::from(CLIP_MAX),
            )
        } else if outside & BELOW != 0 {
            (
                x0 + (x1 - x0) * (f64::from(CLIP_MIN) - y0) / (y1 - y0),
                f64::from(CLIP_MIN),
            )
        } else if outside & RIGHT != 0 {
            (
                f64::from(CLIP_MAX),
                y0 + (y1 - y0) * (f64::from(CLIP_MAX) - x0) / (x1 - x0),
            )
        } else {
            (
                f64::from(CLIP_MIN),
                y0 + (y1 - y0) * (f64::from(CLIP_MIN) - x0) / (x1 - x0),
            )
        };

        if outside == code0 {
            x0 = x;
            y0 = y;
            code0 = outcode(x0, y0);
        } else {
            x1 = x;
            y1 = y;
            code1 = outcode(x1, y1);
        }
    }
}

fn outcode(x: f64, y: f64) -> u8 {
    let mut code = 0;
    if x < f64::from(CLIP_MIN) {
        code |= LEFT;
    } else if x > f64::from(CLIP_MAX) {
        code |= RIGHT;
    }
    if y < f64::from(CLIP_MIN) {
        code |= BELOW;
    } else if y > f64::from(CLIP_MAX) {
        code |= ABOVE;
    }
    code
}
