//! The viewport controller: public navigation operations on top of the
//! viewport state and motion engine.

use crate::animation::{MotionEngine, MotionMode, TickOutcome};
use crate::core::bounds::Rect;
use crate::core::config::ViewportConfig;
use crate::core::geo::{GeoCoordinate, ProjectedCoordinate, ScreenPoint};
use crate::core::projection::Projection;
use crate::core::viewport::ViewportState;
use crate::input::{KeyCode, ScrollDirection};
use crate::rendering::overlay::{draw_chrome, ChromeState};
use crate::rendering::{RenderSurface, ViewportOverlay};
use crate::runtime::{Clock, TimerSource};
use crate::tiles::{TileArrival, TileProvider, TileRequest, TileSink};

/// Notification delivered to viewport listeners
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// The visible region changed and needs a redraw
    Updated {
        center: GeoCoordinate,
        magnification: i32,
    },
}

/// Handle returned when registering a listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Event listener callback type
pub type ViewportCallback = Box<dyn FnMut(&ViewportEvent)>;

/// Owns the viewport state and motion engine and drives them from a timer.
///
/// Everything runs on the host's thread: controller calls and
/// [`on_timer`](Self::on_timer) are never concurrent.
pub struct ViewportController {
    state: ViewportState,
    motion: MotionEngine,
    config: ViewportConfig,
    provider: Box<dyn TileProvider>,
    timer: Box<dyn TimerSource>,
    clock: Box<dyn Clock>,
    /// Timer registration is armed
    has_timer: bool,
    source: String,
    listeners: Vec<(ListenerId, ViewportCallback)>,
    next_listener: u64,
    overlay: Option<Box<dyn ViewportOverlay>>,
}

impl ViewportController {
    pub(crate) fn from_parts(
        config: ViewportConfig,
        projection: Box<dyn Projection>,
        provider: Box<dyn TileProvider>,
        timer: Box<dyn TimerSource>,
        clock: Box<dyn Clock>,
        center: GeoCoordinate,
        magnification: i32,
    ) -> Self {
        Self {
            state: ViewportState::new(projection, center, magnification),
            motion: MotionEngine::new(config.motion.clone()),
            config,
            provider,
            timer,
            clock,
            has_timer: false,
            source: String::new(),
            listeners: Vec::new(),
            next_listener: 0,
            overlay: None,
        }
    }

    /// Start building a controller
    pub fn builder() -> crate::core::builder::ViewportBuilder {
        crate::core::builder::ViewportBuilder::new()
    }

    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    pub fn motion(&self) -> &MotionEngine {
        &self.motion
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// The pan target: where the view is heading
    pub fn center_position(&self) -> GeoCoordinate {
        self.state.target_geo()
    }

    pub fn center_position_pixels(&self) -> ProjectedCoordinate {
        self.state.target_pixels()
    }

    /// The position rendered this tick
    pub fn current_center(&self) -> GeoCoordinate {
        self.state.current_geo()
    }

    pub fn current_center_pixels(&self) -> ProjectedCoordinate {
        self.state.current_pixels()
    }

    pub fn magnification(&self) -> i32 {
        self.state.magnification()
    }

    pub fn width(&self) -> i32 {
        self.state.width()
    }

    pub fn height(&self) -> i32 {
        self.state.height()
    }

    pub fn scale(&self) -> f64 {
        self.state.scale()
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.state.set_scale(scale);
    }

    /// Timer registration is armed
    pub fn is_motion_active(&self) -> bool {
        self.has_timer
    }

    pub fn map_source(&self) -> &str {
        &self.source
    }

    /// Switches the tile source and refreshes visible tiles
    pub fn set_map_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.update_map();
    }

    pub fn set_overlay(&mut self, overlay: Box<dyn ViewportOverlay>) {
        self.overlay = Some(overlay);
    }

    /// Register a listener for viewport changes
    pub fn on_viewport_updated<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ViewportEvent) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    /// Current and target jump to `geo`; any motion is cancelled
    pub fn set_center_immediate(&mut self, geo: GeoCoordinate, magnification: i32) {
        let magnification = self.clamp_magnification(magnification);
        self.state.set_center_immediate(geo.clamped(), magnification);
        self.motion.stop();
    }

    /// Pans to `geo` at the current magnification
    pub fn set_center_position(&mut self, geo: GeoCoordinate, immediate: bool, gesture: bool) {
        let magnification = self.state.magnification();
        self.set_center_and_magnification(geo, magnification, immediate, gesture);
    }

    /// Pans to `geo` at `magnification`.
    ///
    /// A jump larger than one viewport moves the current centre to exactly
    /// one viewport short of the target, so the animated part never
    /// exceeds a screen. Non-gesture calls supersede any glide.
    /// Out-of-range positions are clamped to the mapped area.
    pub fn set_center_and_magnification(
        &mut self,
        geo: GeoCoordinate,
        magnification: i32,
        immediate: bool,
        gesture: bool,
    ) {
        let geo = geo.clamped();
        let magnification = self.clamp_magnification(magnification);
        if immediate || !self.state.is_laid_out() {
            self.set_center_immediate(geo, magnification);
            return;
        }

        if magnification != self.state.magnification() {
            self.motion.stop();
            self.state.reproject(magnification);
        }
        if !gesture {
            self.motion.stop();
        }

        let target = self.state.projection().to_projected(geo, magnification);
        let (dx, dy) = self.state.target_pixels().delta_to(&target);
        if let Some((cx, cy)) = clamp_to_viewport(dx, dy, self.state.width(), self.state.height())
        {
            log::debug!(
                "pan of ({}, {}) px exceeds the viewport, animating ({}, {})",
                dx,
                dy,
                cx,
                cy
            );
            self.motion.stop();
            self.state.set_current_pixels(target.offset(-cx, -cy));
        }
        self.state.set_target_geo(geo);
        self.arm_motion();
    }

    /// Jumps to `level` around the pan target
    pub fn set_magnification(&mut self, level: i32) {
        let level = self.clamp_magnification(level);
        let target = self.state.target_geo();
        self.set_center_and_magnification(target, level, true, false);
    }

    pub fn zoom_in(&mut self) {
        let level = self.state.magnification();
        if level < self.provider.magnification_max() {
            self.zoom_to(level + 1);
        }
    }

    pub fn zoom_out(&mut self) {
        let level = self.state.magnification();
        if level > self.provider.magnification_min() {
            self.zoom_to(level - 1);
        }
    }

    fn zoom_to(&mut self, level: i32) {
        log::debug!("zoom {} -> {}", self.state.magnification(), level);
        self.motion.stop();
        self.state.reproject(level);
    }

    /// Moves the pan target one step towards `direction`
    pub fn scroll(&mut self, direction: ScrollDirection, large_step: bool) {
        let small = self.config.scroll.small_step_px;
        let (h_step, v_step) = if large_step {
            (self.state.width() as i64, self.state.height() as i64)
        } else {
            (small, small)
        };
        let (ux, uy) = direction.unit();
        let px = self.state.target_pixels().offset(ux * h_step, uy * v_step);
        let geo = self.state.projection().to_geo(px).clamped();
        self.set_center_position(geo, false, false);
    }

    /// Averaging → Gliding, for the end of a drag gesture
    pub fn start_glide(&mut self) {
        if self.motion.mode() != MotionMode::Averaging {
            log::debug!("start_glide ignored in {:?}", self.motion.mode());
            return;
        }
        let now = self.clock.now_ms();
        self.motion.start_glide(now);
    }

    /// Stops gliding and locks the target to the current position
    pub fn stop_glide(&mut self) {
        self.motion.stop();
        self.state.pin_target_to_current();
        self.update_map();
    }

    /// Arrow keys scroll, the bound zoom keys zoom. Returns whether the key
    /// was consumed; visible tiles are refreshed either way.
    pub fn handle_key_input(&mut self, key: KeyCode) -> bool {
        let keys = self.config.keys;
        let consumed = if let Some(direction) = key.scroll_direction() {
            self.scroll(direction, false);
            true
        } else if key == keys.zoom_out {
            self.zoom_out();
            true
        } else if key == keys.zoom_in {
            self.zoom_in();
            true
        } else {
            false
        };
        self.update_map();
        consumed
    }

    pub fn handle_key_release(&mut self, _key: KeyCode) -> bool {
        true
    }

    pub fn resize(&mut self, width: i32, height: i32) {
        log::debug!("viewport resized to {}x{}", width, height);
        self.state.set_width(width);
        self.state.set_height(height);
        self.update_map();
    }

    pub fn set_width(&mut self, width: i32) {
        self.state.set_width(width);
        self.update_map();
    }

    pub fn set_height(&mut self, height: i32) {
        self.state.set_height(height);
        self.update_map();
    }

    /// Timer callback. No-op until the viewport is laid out.
    pub fn on_timer(&mut self) -> TickOutcome {
        if !self.state.is_laid_out() {
            return TickOutcome::Skipped;
        }
        let now = self.clock.now_ms();
        let outcome = self.motion.tick(now, &mut self.state);
        match outcome {
            TickOutcome::Skipped => {}
            TickOutcome::Moved => self.refresh(true),
            TickOutcome::Settled => {
                self.disarm_motion();
                self.refresh(true);
            }
        }
        outcome
    }

    /// A tile delivered after its request returned
    pub fn tile_received(&mut self, tile: &TileArrival) {
        log::trace!("tile arrived outside render at magnification {}", tile.magnification);
        self.notify();
    }

    /// Asks the provider for the tiles covering the current view
    pub fn update_map(&mut self) {
        self.refresh(false);
    }

    /// Draws tiles, overlay and chrome clipped to the viewport at `origin`
    pub fn render_frame(&mut self, surface: &mut dyn RenderSurface, origin: ScreenPoint) {
        let bounds = Rect::from_origin(origin, self.state.width(), self.state.height());
        surface.push_clip_rect(bounds);

        if self.state.is_laid_out() {
            let tile_size = self.provider.tile_size() as i32;
            let request = TileRequest {
                source: &self.source,
                center: self.state.current_geo(),
                magnification: self.state.magnification(),
                width: self.state.width(),
                height: self.state.height(),
            };
            let mut sink = DrawingSink {
                surface: &mut *surface,
                state: &self.state,
                origin,
                tile_size,
            };
            self.provider.request_visible_tiles(&request, &mut sink);
        }

        let magnification = self.state.magnification();
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.draw_overlay(surface, bounds, magnification);
        }

        let chrome = ChromeState {
            origin,
            width: self.state.width(),
            height: self.state.height(),
            magnification,
            magnification_min: self.provider.magnification_min(),
            magnification_max: self.provider.magnification_max(),
            meters_per_pixel: self.meters_per_pixel(),
            center: self.state.current_geo(),
            tile_count: self.provider.tile_count(),
            cached_tiles: self.provider.cached_tile_count(),
        };
        draw_chrome(surface, &chrome, &self.config.overlay);

        surface.pop_clip_rect();
    }

    /// Ground meters covered by one pixel at the pan target
    pub fn meters_per_pixel(&self) -> f64 {
        let projection = self.state.projection();
        let p1 = self.state.target_pixels();
        let g1 = projection.to_geo(p1);
        let g2 = projection.to_geo(p1.offset(1, 1));
        let (x1, _) = projection.to_meters(g1);
        let (x2, _) = projection.to_meters(g2);
        (x2 - x1) * g2.lat.abs().to_radians().cos()
    }

    pub fn world_pixel_to_viewport(&self, world: ProjectedCoordinate) -> ScreenPoint {
        self.state.world_pixel_to_viewport(world)
    }

    pub fn viewport_to_world_pixel(&self, point: ScreenPoint) -> ProjectedCoordinate {
        self.state.viewport_to_world_pixel(point)
    }

    fn refresh(&mut self, view_changed: bool) {
        if !self.state.is_laid_out() {
            return;
        }
        let request = TileRequest {
            source: &self.source,
            center: self.state.current_geo(),
            magnification: self.state.magnification(),
            width: self.state.width(),
            height: self.state.height(),
        };
        let mut sink = CountingSink::default();
        self.provider.request_visible_tiles(&request, &mut sink);
        if view_changed || sink.arrived > 0 {
            self.notify();
        }
    }

    fn notify(&mut self) {
        let event = ViewportEvent::Updated {
            center: self.state.current_geo(),
            magnification: self.state.magnification(),
        };
        for (_, callback) in self.listeners.iter_mut() {
            callback(&event);
        }
    }

    fn arm_motion(&mut self) {
        if !self.has_timer {
            self.motion.reset_clock(self.clock.now_ms());
            self.timer.arm();
            self.has_timer = true;
            log::debug!("motion timer armed");
        }
        self.motion.begin(self.state.current_pixels());
    }

    fn disarm_motion(&mut self) {
        if self.has_timer {
            self.timer.disarm();
            self.has_timer = false;
            log::debug!("motion timer disarmed");
        }
    }

    fn clamp_magnification(&self, level: i32) -> i32 {
        level
            .max(self.provider.magnification_min())
            .min(self.provider.magnification_max())
    }
}

impl Drop for ViewportController {
    fn drop(&mut self) {
        self.disarm_motion();
    }
}

/// Shrinks `(dx, dy)` to one viewport along the dominant axis, keeping its
/// direction. `None` when the delta already fits.
fn clamp_to_viewport(dx: i64, dy: i64, width: i32, height: i32) -> Option<(i64, i64)> {
    let fx = dx.abs() as f64 / width as f64;
    let fy = dy.abs() as f64 / height as f64;
    let factor = fx.max(fy);
    if factor <= 1.0 {
        return None;
    }
    if fx >= fy {
        Some((width as i64 * dx.signum(), (dy as f64 / factor) as i64))
    } else {
        Some(((dx as f64 / factor) as i64, height as i64 * dy.signum()))
    }
}

/// Draws tiles as they arrive during a render call
struct DrawingSink<'a> {
    surface: &'a mut dyn RenderSurface,
    state: &'a ViewportState,
    origin: ScreenPoint,
    tile_size: i32,
}

impl TileSink for DrawingSink<'_> {
    fn tile_arrived(&mut self, tile: &TileArrival) {
        if tile.magnification != self.state.magnification() {
            log::trace!("dropping tile at magnification {}", tile.magnification);
            return;
        }
        let world = self
            .state
            .projection()
            .to_projected(tile.center, tile.magnification);
        let pt = self.state.world_pixel_to_viewport(world);
        let half = self.tile_size / 2;
        self.surface.draw_image(
            tile.image,
            self.origin.x + pt.x - half,
            self.origin.y + pt.y - half,
            self.state.scale(),
        );
    }
}

/// Counts tiles yielded outside a render call
#[derive(Default)]
struct CountingSink {
    arrived: usize,
}

impl TileSink for CountingSink {
    fn tile_arrived(&mut self, _tile: &TileArrival) {
        self.arrived += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_small_deltas() {
        assert_eq!(clamp_to_viewport(320, -480, 320, 480), None);
        assert_eq!(clamp_to_viewport(0, 0, 320, 480), None);
    }

    #[test]
    fn test_clamp_dominant_axis_is_exact() {
        assert_eq!(clamp_to_viewport(-1000, 100, 320, 480), Some((-320, 32)));
        assert_eq!(clamp_to_viewport(100, 2400, 320, 480), Some((20, 480)));
        assert_eq!(clamp_to_viewport(7, -963, 320, 480), Some((3, -480)));
    }
}
