//! Per-frame chrome drawn on top of the tiles: magnification scale bar,
//! meters-per-pixel text, hairline cross, centre coordinates and a debug
//! line with tile counts.

use crate::core::bounds::Rect;
use crate::core::config::OverlayConfig;
use crate::core::constants::{CHROME_COLOR, SCALE_BAR_SHADOW};
use crate::core::geo::{GeoCoordinate, ScreenPoint};
use crate::rendering::surface::RenderSurface;

/// Hook for renderers drawing annotations in viewport space
pub trait ViewportOverlay {
    /// Called once per frame, after tiles and before the chrome
    fn draw_overlay(&mut self, surface: &mut dyn RenderSurface, bounds: Rect, magnification: i32);
}

/// Snapshot of the viewport the chrome is drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeState {
    pub origin: ScreenPoint,
    pub width: i32,
    pub height: i32,
    pub magnification: i32,
    pub magnification_min: i32,
    pub magnification_max: i32,
    pub meters_per_pixel: f64,
    pub center: GeoCoordinate,
    pub tile_count: usize,
    pub cached_tiles: usize,
}

impl ChromeState {
    /// Position of the magnification on the scale bar, 0.0 ..= 1.0
    pub fn scale_fraction(&self) -> f64 {
        let span = self.magnification_max - self.magnification_min;
        if span <= 0 {
            return 0.0;
        }
        ((self.magnification - self.magnification_min) as f64 / span as f64).clamp(0.0, 1.0)
    }
}

pub fn draw_chrome(surface: &mut dyn RenderSurface, state: &ChromeState, config: &OverlayConfig) {
    if config.show_scale_bar {
        draw_scale_bar(surface, state, config);
    }

    if config.show_crosshair {
        let cx = state.origin.x + state.width / 2;
        let cy = state.origin.y + state.height / 2;
        let size = config.crosshair_size;
        surface.fill_rect(Rect::new(cx, cy - size, 1, size * 2 + 1), CHROME_COLOR);
        surface.fill_rect(Rect::new(cx - size, cy, size * 2 + 1, 1), CHROME_COLOR);
    }

    if config.show_lat_lon {
        let text = format!("{:<3.4} {:<3.4}", state.center.lon, state.center.lat);
        surface.draw_text(state.origin.x, state.origin.y, &text, CHROME_COLOR);
    }

    if config.show_debug_info {
        let text = format!("Tiles: {} Cache: {}", state.tile_count, state.cached_tiles);
        surface.draw_text(state.origin.x, state.origin.y + 20, &text, CHROME_COLOR);
    }
}

fn draw_scale_bar(surface: &mut dyn RenderSurface, state: &ChromeState, config: &OverlayConfig) {
    let bar_width = config.scale_bar_width;
    let x = state.origin.x + state.width - bar_width - 5;
    let y = state.origin.y + 5;
    let crossbar = 7;
    let slider = x as f64 + state.scale_fraction() * bar_width as f64;

    // Shadow, then the thin bar on top
    for (thickness, color) in [(3, SCALE_BAR_SHADOW), (1, CHROME_COLOR)] {
        let bar_y = if thickness > 1 { y - thickness / 2 } else { y };
        surface.fill_rect(Rect::new(x, bar_y, bar_width, thickness), color);
        surface.fill_rect(
            Rect::new(
                (slider - 0.5 * thickness as f64) as i32,
                y - crossbar / 2,
                thickness,
                crossbar,
            ),
            color,
        );
    }

    if config.show_scale_text {
        let text = format!("{:5.2} m/px", state.meters_per_pixel);
        surface.draw_text(x, y + 5, &text, CHROME_COLOR);
    }
}
