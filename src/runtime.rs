//! Time and timer collaborators.
//!
//! The engine never spawns threads or sleeps. A host owns the real timer,
//! calls [`ViewportController::on_timer`](crate::ViewportController::on_timer)
//! while armed, and exposes arm/disarm through [`TimerSource`].

use instant::Instant;
use std::cell::Cell;
use std::rc::Rc;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Clock backed by the platform's monotonic time
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

/// Synthetic clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Recurring, level-triggered timer registration.
///
/// The controller only calls `arm` when not armed and `disarm` when armed,
/// but implementations should tolerate redundant calls.
pub trait TimerSource {
    fn arm(&mut self);
    fn disarm(&mut self);
}

/// Timer flag for hosts that pump ticks themselves; clones share state
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    armed: Rc<Cell<bool>>,
    arms: Rc<Cell<u32>>,
    disarms: Rc<Cell<u32>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// Number of idle → armed transitions
    pub fn arm_count(&self) -> u32 {
        self.arms.get()
    }

    /// Number of armed → idle transitions
    pub fn disarm_count(&self) -> u32 {
        self.disarms.get()
    }
}

impl TimerSource for ManualTimer {
    fn arm(&mut self) {
        if !self.armed.get() {
            self.armed.set(true);
            self.arms.set(self.arms.get() + 1);
        }
    }

    fn disarm(&mut self) {
        if self.armed.get() {
            self.armed.set(false);
            self.disarms.set(self.disarms.get() + 1);
        }
    }
}
