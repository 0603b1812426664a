use serde::{Deserialize, Serialize};

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
    Enter,
    Space,
    Tab,
    /// Digit row keys, `Digit(1)` .. `Digit(9)`
    Digit(u8),
    Other(u32),
}

impl KeyCode {
    /// Scroll direction bound to an arrow key
    pub fn scroll_direction(self) -> Option<ScrollDirection> {
        match self {
            KeyCode::ArrowUp => Some(ScrollDirection::North),
            KeyCode::ArrowDown => Some(ScrollDirection::South),
            KeyCode::ArrowLeft => Some(ScrollDirection::West),
            KeyCode::ArrowRight => Some(ScrollDirection::East),
            _ => None,
        }
    }
}

/// Compass direction of a keyboard or programmatic scroll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScrollDirection {
    North,
    South,
    East,
    West,
}

impl ScrollDirection {
    /// Unit step in world pixels (pixel Y grows north)
    pub fn unit(self) -> (i64, i64) {
        match self {
            ScrollDirection::North => (0, 1),
            ScrollDirection::South => (0, -1),
            ScrollDirection::East => (1, 0),
            ScrollDirection::West => (-1, 0),
        }
    }
}
