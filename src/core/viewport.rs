use crate::core::geo::{GeoCoordinate, ProjectedCoordinate, ScreenPoint};
use crate::core::projection::Projection;

/// Current and target view centre, magnification and size.
///
/// Each centre is stored in both representations. Every setter writes one
/// representation and derives the other from the viewport's magnification,
/// so the pair never drifts apart.
pub struct ViewportState {
    projection: Box<dyn Projection>,
    current_geo: GeoCoordinate,
    current_px: ProjectedCoordinate,
    target_geo: GeoCoordinate,
    target_px: ProjectedCoordinate,
    magnification: i32,
    width: i32,
    height: i32,
    /// Cosmetic render scale, independent of magnification
    scale: f64,
}

impl ViewportState {
    /// Creates a state centred on `center`, not yet laid out
    pub fn new(projection: Box<dyn Projection>, center: GeoCoordinate, magnification: i32) -> Self {
        let px = projection.to_projected(center, magnification);
        Self {
            projection,
            current_geo: center,
            current_px: px,
            target_geo: center,
            target_px: px,
            magnification,
            width: 0,
            height: 0,
            scale: 1.0,
        }
    }

    pub fn projection(&self) -> &dyn Projection {
        self.projection.as_ref()
    }

    pub fn current_geo(&self) -> GeoCoordinate {
        self.current_geo
    }

    pub fn current_pixels(&self) -> ProjectedCoordinate {
        self.current_px
    }

    pub fn target_geo(&self) -> GeoCoordinate {
        self.target_geo
    }

    pub fn target_pixels(&self) -> ProjectedCoordinate {
        self.target_px
    }

    pub fn magnification(&self) -> i32 {
        self.magnification
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Width and height are both positive
    pub fn is_laid_out(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn set_width(&mut self, width: i32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    pub fn set_current_geo(&mut self, geo: GeoCoordinate) {
        self.current_geo = geo;
        self.current_px = self.projection.to_projected(geo, self.magnification);
    }

    pub fn set_current_pixels(&mut self, px: ProjectedCoordinate) {
        let px = self.at_magnification(px);
        self.current_px = px;
        self.current_geo = self.projection.to_geo(px);
    }

    pub fn set_target_geo(&mut self, geo: GeoCoordinate) {
        self.target_geo = geo;
        self.target_px = self.projection.to_projected(geo, self.magnification);
    }

    pub fn set_target_pixels(&mut self, px: ProjectedCoordinate) {
        let px = self.at_magnification(px);
        self.target_px = px;
        self.target_geo = self.projection.to_geo(px);
    }

    /// Current and target both become `geo` at `magnification`
    pub fn set_center_immediate(&mut self, geo: GeoCoordinate, magnification: i32) {
        self.magnification = magnification;
        self.set_current_geo(geo);
        self.pin_target_to_current();
    }

    /// Switches magnification, re-deriving both pixel positions from their
    /// geographic representation so the geographic centre is preserved
    pub fn reproject(&mut self, magnification: i32) {
        self.magnification = magnification;
        self.current_px = self.projection.to_projected(self.current_geo, magnification);
        self.target_px = self.projection.to_projected(self.target_geo, magnification);
    }

    /// Current position jumps to the target exactly
    pub fn snap_current_to_target(&mut self) {
        self.current_px = self.target_px;
        self.current_geo = self.target_geo;
    }

    /// Target is locked onto the current position
    pub fn pin_target_to_current(&mut self) {
        self.target_px = self.current_px;
        self.target_geo = self.current_geo;
    }

    /// World pixel to viewport pixel around the current centre
    pub fn world_pixel_to_viewport(&self, world: ProjectedCoordinate) -> ScreenPoint {
        let (dx, dy) = self.current_px.delta_to(&world);
        ScreenPoint::new(
            (dx + (self.width >> 1) as i64) as i32,
            (-dy + (self.height >> 1) as i64) as i32,
        )
    }

    /// Inverse of [`world_pixel_to_viewport`](Self::world_pixel_to_viewport)
    pub fn viewport_to_world_pixel(&self, point: ScreenPoint) -> ProjectedCoordinate {
        let c = self.current_px;
        ProjectedCoordinate::new(
            self.magnification,
            point.x as i64 - (self.width >> 1) as i64 + c.x,
            -(point.y as i64 - (self.height >> 1) as i64) + c.y,
        )
    }

    fn at_magnification(&self, px: ProjectedCoordinate) -> ProjectedCoordinate {
        debug_assert_eq!(
            px.magnification, self.magnification,
            "pixel coordinate from another magnification"
        );
        ProjectedCoordinate::new(self.magnification, px.x, px.y)
    }
}

impl std::fmt::Debug for ViewportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportState")
            .field("current_geo", &self.current_geo)
            .field("current_px", &self.current_px)
            .field("target_geo", &self.target_geo)
            .field("target_px", &self.target_px)
            .field("magnification", &self.magnification)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("scale", &self.scale)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::projection::WebMercator;

    fn state() -> ViewportState {
        let mut s = ViewportState::new(
            Box::new(WebMercator::default()),
            GeoCoordinate::new(0.0, 0.0),
            10,
        );
        s.set_width(320);
        s.set_height(480);
        s
    }

    #[test]
    fn test_pairs_stay_consistent() {
        let mut s = state();
        let proj = WebMercator::default();

        s.set_target_geo(GeoCoordinate::new(5.0, 5.0));
        assert_eq!(s.target_pixels(), proj.to_projected(s.target_geo(), 10));

        let px = s.current_pixels().offset(100, -50);
        s.set_current_pixels(px);
        assert_eq!(s.current_geo(), proj.to_geo(px));
    }

    #[test]
    fn test_reproject_keeps_geo_center() {
        let mut s = state();
        s.set_center_immediate(GeoCoordinate::new(12.5, 41.9), 10);
        let geo = s.current_geo();
        s.reproject(11);
        assert_eq!(s.magnification(), 11);
        assert_eq!(s.current_pixels().magnification, 11);
        assert_eq!(s.current_geo(), geo);
        assert_eq!(s.target_pixels(), s.current_pixels());
    }

    #[test]
    fn test_viewport_transform_flips_y() {
        let s = state();
        let c = s.current_pixels();
        assert_eq!(s.world_pixel_to_viewport(c), ScreenPoint::new(160, 240));

        // North of the centre is above it on screen
        let north = s.world_pixel_to_viewport(c.offset(10, 20));
        assert_eq!(north, ScreenPoint::new(170, 220));
    }

    #[test]
    fn test_viewport_transform_inverse() {
        let s = state();
        for pt in [ScreenPoint::new(0, 0), ScreenPoint::new(17, 301), ScreenPoint::new(319, 479)] {
            let world = s.viewport_to_world_pixel(pt);
            assert_eq!(s.world_pixel_to_viewport(world), pt);
        }
    }
}
