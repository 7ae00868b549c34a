//! Data model shared with the routing graph backend.

mod edge;
mod facade;

pub use edge::{Edge, SegmentId, ShortcutData, UnpackedEdge};
pub use facade::TileFacade;

use geo::Point;

/// Fixed-point WGS84 coordinate in microdegrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoCoord {
    pub lon: i32,
    pub lat: i32,
}

impl GeoCoord {
    const PRECISION: f64 = 1_000_000.0;

    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self {
            lon: (lon * Self::PRECISION).round() as i32,
            lat: (lat * Self::PRECISION).round() as i32,
        }
    }

    pub fn lon_degrees(self) -> f64 {
        f64::from(self.lon) / Self::PRECISION
    }

    pub fn lat_degrees(self) -> f64 {
        f64::from(self.lat) / Self::PRECISION
    }

    /// Floating-point view for geodesic math.
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon_degrees(), self.lat_degrees())
    }
}
