pub mod motion;
pub mod ring;

// Re-export commonly used types for convenience
pub use motion::{MotionEngine, MotionMode, TickOutcome};
pub use ring::SampleRing;
