//! # mapglide
//!
//! A map viewport navigation engine.
//!
//! The crate keeps the mapping between geographic coordinates and screen
//! pixels at a discrete magnification, and drives smooth panning, zooming
//! and inertial glide from a periodic timer. Tile fetching, drawing and
//! timers are collaborators injected through traits.

pub mod animation;
pub mod core;
pub mod input;
pub mod prelude;
pub mod rendering;
pub mod runtime;
pub mod tiles;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::Rect,
    builder::ViewportBuilder,
    config::{ViewportConfig, ViewportProfile},
    controller::{ListenerId, ViewportController, ViewportEvent},
    geo::{GeoCoordinate, ProjectedCoordinate, ScreenPoint},
    projection::{Projection, WebMercator},
    viewport::ViewportState,
};

pub use animation::{MotionEngine, MotionMode, TickOutcome};

pub use input::{KeyCode, ScrollDirection};

pub use rendering::{DrawCommand, RecordingSurface, RenderSurface, ViewportOverlay};

pub use runtime::{Clock, ManualClock, ManualTimer, SystemClock, TimerSource};

pub use tiles::{ImageHandle, TileArrival, TileProvider, TileRequest, TileSink};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type alias for convenience
pub type Error = MapError;
