use crate::core::constants::{EARTH_RADIUS, TILE_SIZE};
use crate::core::geo::{GeoCoordinate, ProjectedCoordinate};
use std::f64::consts::PI;

/// Conversion between geographic and magnification-tagged pixel space.
///
/// Implementations are pure; the viewport never caches their results
/// beyond the paired fields of its state.
pub trait Projection {
    /// Geographic to world pixels at `magnification`
    fn to_projected(&self, geo: GeoCoordinate, magnification: i32) -> ProjectedCoordinate;

    /// World pixels back to geographic
    fn to_geo(&self, projected: ProjectedCoordinate) -> GeoCoordinate;

    /// Ground position in projected meters `(meter_x, meter_y)`
    fn to_meters(&self, geo: GeoCoordinate) -> (f64, f64);
}

/// Spherical mercator (EPSG:3857) with the world origin at the south-west
/// corner, so pixel Y grows northwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    tile_size: u32,
}

impl WebMercator {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size: tile_size.max(1),
        }
    }

    /// Meters covered by one pixel at the equator
    fn resolution(&self, magnification: i32) -> f64 {
        2.0 * PI * EARTH_RADIUS / (self.tile_size as f64 * 2_f64.powi(magnification))
    }

    fn origin_shift() -> f64 {
        PI * EARTH_RADIUS
    }
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new(TILE_SIZE)
    }
}

impl Projection for WebMercator {
    fn to_projected(&self, geo: GeoCoordinate, magnification: i32) -> ProjectedCoordinate {
        let (mx, my) = self.to_meters(geo);
        let res = self.resolution(magnification);
        let shift = Self::origin_shift();
        ProjectedCoordinate::new(
            magnification,
            ((mx + shift) / res).round() as i64,
            ((my + shift) / res).round() as i64,
        )
    }

    fn to_geo(&self, projected: ProjectedCoordinate) -> GeoCoordinate {
        let res = self.resolution(projected.magnification);
        let shift = Self::origin_shift();
        let mx = projected.x as f64 * res - shift;
        let my = projected.y as f64 * res - shift;

        let lon = (mx / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (my / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        GeoCoordinate::new(lon, lat)
    }

    fn to_meters(&self, geo: GeoCoordinate) -> (f64, f64) {
        let x = geo.lon.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + geo.lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;
        (x, y)
    }
}
