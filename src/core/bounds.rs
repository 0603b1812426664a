use crate::core::geo::ScreenPoint;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `width` x `height` anchored at `origin`
    pub fn from_origin(origin: ScreenPoint, width: i32, height: i32) -> Self {
        Self::new(origin.x, origin.y, width, height)
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}
