use crate::core::geo::GeoCoordinate;
use serde::{Deserialize, Serialize};

/// Opaque handle to a decoded tile image owned by the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub u64);

/// A tile that became available for drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileArrival {
    /// Geographic centre of the tile
    pub center: GeoCoordinate,
    pub magnification: i32,
    pub image: ImageHandle,
}

/// What the viewport currently needs covered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRequest<'a> {
    /// Key of the map source the tiles come from
    pub source: &'a str,
    pub center: GeoCoordinate,
    pub magnification: i32,
    pub width: i32,
    pub height: i32,
}

/// Receiver of tiles yielded while a request is being served
pub trait TileSink {
    fn tile_arrived(&mut self, tile: &TileArrival);
}

/// Tile source and cache as seen by the viewport.
///
/// `request_visible_tiles` never blocks: tiles already available are
/// handed to `sink` before it returns, the rest are delivered later
/// through [`ViewportController::tile_received`](crate::ViewportController::tile_received).
pub trait TileProvider {
    fn magnification_min(&self) -> i32;

    fn magnification_max(&self) -> i32;

    fn tile_size(&self) -> u32;

    /// Tiles known to the source (diagnostic)
    fn tile_count(&self) -> usize;

    /// Tiles held by the cache (diagnostic)
    fn cached_tile_count(&self) -> usize {
        0
    }

    fn request_visible_tiles(&mut self, request: &TileRequest<'_>, sink: &mut dyn TileSink);
}
