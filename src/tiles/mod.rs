pub mod provider;

// Re-exports for convenience
pub use provider::{ImageHandle, TileArrival, TileProvider, TileRequest, TileSink};
