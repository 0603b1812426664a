//! Prelude module for common mapglide types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use mapglide::prelude::*;`

pub use crate::core::{
    bounds::Rect,
    builder::ViewportBuilder,
    config::{
        KeyBindings, MotionConfig, OverlayConfig, ScrollConfig, ViewportConfig, ViewportProfile,
    },
    controller::{ListenerId, ViewportController, ViewportEvent},
    geo::{GeoCoordinate, ProjectedCoordinate, ScreenPoint},
    projection::{Projection, WebMercator},
    viewport::ViewportState,
};

pub use crate::animation::{MotionEngine, MotionMode, TickOutcome};

pub use crate::input::{KeyCode, ScrollDirection};

pub use crate::rendering::{DrawCommand, RecordingSurface, RenderSurface, ViewportOverlay};

pub use crate::runtime::{Clock, ManualClock, ManualTimer, SystemClock, TimerSource};

pub use crate::tiles::{ImageHandle, TileArrival, TileProvider, TileRequest, TileSink};

pub use crate::{MapError, Result};
