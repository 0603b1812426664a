use crate::core::constants::{MAX_LATITUDE, MAX_LONGITUDE};
use serde::{Deserialize, Serialize};

/// A geographical coordinate in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lon: f64,
    pub lat: f64,
}

impl GeoCoordinate {
    /// Creates a new coordinate from longitude and latitude
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Clamps to the range a user-driven scroll may reach
    pub fn clamped(&self) -> Self {
        Self::new(
            self.lon.clamp(-MAX_LONGITUDE, MAX_LONGITUDE),
            self.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
        )
    }

    /// Validates that the coordinates are within the scrollable range
    pub fn is_valid(&self) -> bool {
        self.lat.abs() <= MAX_LATITUDE && self.lon.abs() <= MAX_LONGITUDE
    }
}

impl Default for GeoCoordinate {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// A world pixel position, valid only at its magnification.
///
/// Pixel Y grows towards the north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ProjectedCoordinate {
    pub magnification: i32,
    pub x: i64,
    pub y: i64,
}

impl ProjectedCoordinate {
    pub fn new(magnification: i32, x: i64, y: i64) -> Self {
        Self { magnification, x, y }
    }

    /// Same magnification, shifted by `(dx, dy)` pixels
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self::new(self.magnification, self.x + dx, self.y + dy)
    }

    /// Pixel delta `other - self`
    pub fn delta_to(&self, other: &ProjectedCoordinate) -> (i64, i64) {
        debug_assert_eq!(
            self.magnification, other.magnification,
            "projected coordinates at different magnifications"
        );
        (other.x - self.x, other.y - self.y)
    }
}

/// A point in viewport (screen) space, Y grows downwards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
