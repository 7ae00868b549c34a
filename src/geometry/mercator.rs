//! Web-Mercator math for slippy map tiles.
//!
//! Mercator coordinates are kept in zoom-0 pixel units: the whole world
//! spans [`TILE_SIZE`] pixels, so one tile at zoom `z` spans
//! `TILE_SIZE / 2^z` of them. Tile grid units subdivide a single tile
//! into [`EXTENT`] steps.

use geo::Point;

use super::TilePoint;
use crate::mvt::EXTENT;

pub const TILE_SIZE: f64 = 256.0;
pub const DEGREE_TO_PX: f64 = TILE_SIZE / 360.0;
/// Latitude bound of the square Web-Mercator world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_807;

/// Tile bounding box in mercator pixel units.
#[derive(Debug, Clone, Copy)]
pub struct MercBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl MercBounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Geographic bounding box of a tile as `(min_lon, min_lat, max_lon, max_lat)`.
pub fn tile_bounds_wgs84(z: u8, x: u32, y: u32) -> (f64, f64, f64, f64) {
    let side = f64::from(1u32 << z);
    let min_lon = f64::from(x) / side * 360.0 - 180.0;
    let max_lon = f64::from(x + 1) / side * 360.0 - 180.0;
    // Tile rows grow southward, so the row below gives the minimum latitude.
    let min_lat = tile_row_to_lat(f64::from(y + 1), side);
    let max_lat = tile_row_to_lat(f64::from(y), side);
    (min_lon, min_lat, max_lon, max_lat)
}

/// Mercator bounding box of a tile, for projecting points into grid units.
pub fn tile_bounds_mercator(z: u8, x: u32, y: u32) -> MercBounds {
    let (min_lon, min_lat, max_lon, max_lat) = tile_bounds_wgs84(z, x, y);
    MercBounds {
        min_x: min_lon * DEGREE_TO_PX,
        min_y: lat_to_mercator_y(min_lat) * DEGREE_TO_PX,
        max_x: max_lon * DEGREE_TO_PX,
        max_y: lat_to_mercator_y(max_lat) * DEGREE_TO_PX,
    }
}

/// Mercator ordinate of a latitude, in degree-scaled units.
pub fn lat_to_mercator_y(lat: f64) -> f64 {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0)
        .tan()
        .ln()
        .to_degrees()
}

/// Projects a WGS84 point into the grid of the tile described by `bounds`.
///
/// Grid rows grow downward, inverting the mercator Y axis. Coordinates are
/// rounded to integer grid units here, before any clipping happens.
pub fn project_to_tile(point: Point<f64>, bounds: &MercBounds) -> TilePoint {
    let px = point.x() * DEGREE_TO_PX;
    let py = lat_to_mercator_y(point.y()) * DEGREE_TO_PX;
    TilePoint {
        x: ((px - bounds.min_x) / bounds.width() * f64::from(EXTENT)).round() as i32,
        y: ((bounds.max_y - py) / bounds.height() * f64::from(EXTENT)).round() as i32,
    }
}

fn tile_row_to_lat(y: f64, side: f64) -> f64 {
    (std::f64::consts::PI * (1.0 - 2.0 * y / side))
        .sinh()
        .atan()
        .to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn world_tile_bounds() {
        let (min_lon, min_lat, max_lon, max_lat) = tile_bounds_wgs84(0, 0, 0);
        assert_approx_eq!(min_lon, -180.0, 1e-9);
        assert_approx_eq!(max_lon, 180.0, 1e-9);
        assert_approx_eq!(min_lat, -85.051_128_779_806_59, 1e-9);
        assert_approx_eq!(max_lat, 85.051_128_779_806_59, 1e-9);
    }

    #[test]
    fn world_tile_mercator_is_square() {
        let bounds = tile_bounds_mercator(0, 0, 0);
        assert_approx_eq!(bounds.min_x, -128.0, 1e-6);
        assert_approx_eq!(bounds.max_x, 128.0, 1e-6);
        assert_approx_eq!(bounds.min_y, -128.0, 1e-6);
        assert_approx_eq!(bounds.max_y, 128.0, 1e-6);
    }

    #[test]
    fn zoomed_tile_bounds_nest_in_parent() {
        let (min_lon, min_lat, max_lon, max_lat) = tile_bounds_wgs84(14, 8802, 5372);
        let (p_min_lon, p_min_lat, p_max_lon, p_max_lat) = tile_bounds_wgs84(13, 4401, 2686);
        assert!(min_lon >= p_min_lon && max_lon <= p_max_lon);
        assert!(min_lat >= p_min_lat && max_lat <= p_max_lat);
        assert!(min_lon < max_lon && min_lat < max_lat);
    }

    #[test]
    fn corners_project_to_grid_corners() {
        let (min_lon, min_lat, max_lon, max_lat) = tile_bounds_wgs84(14, 8802, 5372);
        let bounds = tile_bounds_mercator(14, 8802, 5372);

        let nw = project_to_tile(Point::new(min_lon, max_lat), &bounds);
        assert_eq!(nw, TilePoint { x: 0, y: 0 });

        let se = project_to_tile(Point::new(max_lon, min_lat), &bounds);
        assert_eq!(
            se,
            TilePoint {
                x: EXTENT as i32,
                y: EXTENT as i32
            }
        );
    }

    #[test]
    fn northern_points_get_smaller_rows() {
        let bounds = tile_bounds_mercator(14, 8802, 5372);
        let (min_lon, min_lat, max_lon, max_lat) = tile_bounds_wgs84(14, 8802, 5372);
        let mid_lon = (min_lon + max_lon) / 2.0;

        let north = project_to_tile(Point::new(mid_lon, max_lat), &bounds);
        let south = project_to_tile(Point::new(mid_lon, min_lat), &bounds);
        assert!(north.y < south.y);
    }

    #[test]
    fn polar_latitudes_clamp() {
        assert_approx_eq!(
            lat_to_mercator_y(89.0),
            lat_to_mercator_y(MAX_LATITUDE),
            1e-9
        );
        assert_approx_eq!(
            lat_to_mercator_y(-89.0),
            lat_to_mercator_y(-MAX_LATITUDE),
            1e-9
        );
    }
}
