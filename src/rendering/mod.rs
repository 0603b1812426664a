pub mod overlay;
pub mod surface;

// Re-export main types
pub use overlay::{ChromeState, ViewportOverlay};
pub use surface::{DrawCommand, RecordingSurface, RenderSurface};
