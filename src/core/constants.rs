//! Engine-wide defaults for panning, glide and overlay chrome.
//! Keeping them in a single place makes it easier to tweak the magic numbers.

/// Default square tile size in pixels.
pub const TILE_SIZE: u32 = 256;

/// Minimum spacing between two processed motion ticks, in milliseconds.
///
/// Pan smoothing time is `PAN_INTERVAL_MS * PAN_AVERAGE_POINTS`.
pub const PAN_INTERVAL_MS: u64 = 30;

/// Default length of the moving-average window.
pub const PAN_AVERAGE_POINTS: usize = 8;

/// Capacity of the sample ring; `average_points` is clamped to this.
pub const MAX_PAN_SAMPLES: usize = 16;

/// Fraction of glide velocity lost per second of glide.
pub const GLIDE_FRICTION: f64 = 0.01;

/// Motion is negligible once both axis velocities are below this (px/s).
pub const SETTLE_VELOCITY: f64 = 1.0;

/// Pixels to scroll when not scrolling a full page.
pub const SMALL_SCROLL_STEP: i64 = 30;

/// Legal longitude range after a scroll.
pub const MAX_LONGITUDE: f64 = 180.0;

/// Legal latitude range after a scroll.
pub const MAX_LATITUDE: f64 = 85.0;

/// Half length of the hairline cross arms.
pub const CROSS_SIZE: i32 = 4;

/// Width of the magnification scale bar.
pub const SCALE_BAR_WIDTH: i32 = 80;

/// Scale bar colours (0xRRGGBB).
pub const SCALE_BAR_SHADOW: u32 = 0xa0a0a0;
pub const CHROME_COLOR: u32 = 0x000000;

/// Spherical mercator earth radius in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;
