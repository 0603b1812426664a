//! Fluent construction of a [`ViewportController`]
//!
//! Collaborators without a sensible default (tile provider and timer) are
//! passed to [`ViewportBuilder::build`]; everything else has one. The
//! resolved configuration is validated before anything is constructed.

use crate::core::{
    config::{ViewportConfig, ViewportProfile},
    controller::ViewportController,
    geo::GeoCoordinate,
    projection::{Projection, WebMercator},
};
use crate::rendering::ViewportOverlay;
use crate::runtime::{Clock, SystemClock, TimerSource};
use crate::tiles::TileProvider;
use crate::Result;

/// Builder for creating and configuring viewport controllers
pub struct ViewportBuilder {
    profile: ViewportProfile,
    projection: Option<Box<dyn Projection>>,
    clock: Option<Box<dyn Clock>>,
    overlay: Option<Box<dyn ViewportOverlay>>,
    center: GeoCoordinate,
    magnification: i32,
    size: (i32, i32),
    source: String,
}

impl ViewportBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            profile: ViewportProfile::default(),
            projection: None,
            clock: None,
            overlay: None,
            center: GeoCoordinate::default(),
            magnification: 0,
            size: (0, 0),
            source: String::new(),
        }
    }

    /// Set the motion/scroll/chrome profile
    pub fn with_profile(mut self, profile: ViewportProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set a custom configuration
    pub fn with_config(mut self, config: ViewportConfig) -> Self {
        self.profile = ViewportProfile::Custom(config);
        self
    }

    /// Replace the default web mercator projection
    pub fn with_projection(mut self, projection: Box<dyn Projection>) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Replace the system clock
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_overlay(mut self, overlay: Box<dyn ViewportOverlay>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Set the initial center and magnification
    pub fn with_center(mut self, center: GeoCoordinate, magnification: i32) -> Self {
        self.center = center;
        self.magnification = magnification;
        self
    }

    /// Set the initial viewport size in pixels
    pub fn with_size(mut self, width: i32, height: i32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set the map source key passed along with tile requests
    pub fn with_map_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Build the controller, rejecting an invalid configuration
    pub fn build(
        self,
        provider: Box<dyn TileProvider>,
        timer: Box<dyn TimerSource>,
    ) -> Result<ViewportController> {
        let config = self.profile.resolve();
        config.validate()?;

        let projection = self
            .projection
            .unwrap_or_else(|| Box::new(WebMercator::new(provider.tile_size())));
        let clock = self.clock.unwrap_or_else(|| Box::new(SystemClock::new()));
        let magnification = self
            .magnification
            .max(provider.magnification_min())
            .min(provider.magnification_max());

        let mut controller = ViewportController::from_parts(
            config,
            projection,
            provider,
            timer,
            clock,
            self.center.clamped(),
            magnification,
        );
        controller.set_map_source(self.source);
        if let Some(overlay) = self.overlay {
            controller.set_overlay(overlay);
        }
        let (width, height) = self.size;
        controller.resize(width, height);
        Ok(controller)
    }
}

impl Default for ViewportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{ManualClock, ManualTimer};
    use crate::tiles::{TileRequest, TileSink};
    use crate::MapError;

    struct EmptyProvider;

    impl TileProvider for EmptyProvider {
        fn magnification_min(&self) -> i32 {
            2
        }

        fn magnification_max(&self) -> i32 {
            15
        }

        fn tile_size(&self) -> u32 {
            256
        }

        fn tile_count(&self) -> usize {
            0
        }

        fn request_visible_tiles(&mut self, _request: &TileRequest<'_>, _sink: &mut dyn TileSink) {}
    }

    fn builder() -> ViewportBuilder {
        ViewportBuilder::new()
            .with_clock(Box::new(ManualClock::new(0)))
            .with_size(320, 480)
    }

    #[test]
    fn test_invalid_custom_config_is_rejected() {
        let mut config = ViewportConfig::default();
        config.motion.glide_friction = 1.5;
        let result = builder()
            .with_config(config)
            .build(Box::new(EmptyProvider), Box::new(ManualTimer::new()));
        assert!(matches!(result, Err(MapError::InvalidConfig(_))));

        let mut config = ViewportConfig::default();
        config.motion.pan_interval_ms = 0;
        let result = builder()
            .with_profile(ViewportProfile::Custom(config))
            .build(Box::new(EmptyProvider), Box::new(ManualTimer::new()));
        assert!(result.is_err());
    }

    #[test]
    fn test_build_clamps_start_position() {
        let viewport = builder()
            .with_center(GeoCoordinate::new(200.0, 90.0), 40)
            .build(Box::new(EmptyProvider), Box::new(ManualTimer::new()))
            .unwrap();
        assert_eq!(viewport.magnification(), 15);
        assert_eq!(viewport.current_center(), GeoCoordinate::new(180.0, 85.0));
        assert_eq!(viewport.width(), 320);
    }
}
