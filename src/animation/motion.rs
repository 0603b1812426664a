use crate::animation::ring::SampleRing;
use crate::core::config::MotionConfig;
use crate::core::geo::ProjectedCoordinate;
use crate::core::viewport::ViewportState;

/// Phase of the motion state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionMode {
    Idle,
    /// Current centre follows a moving average of the pan target
    Averaging,
    /// Inertial motion after release, decaying by friction
    Gliding,
}

/// Result of a single timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Arrived before the minimum tick interval elapsed
    Skipped,
    Moved,
    /// Motion became negligible; current centre snapped to the target
    Settled,
}

/// Periodic pan/glide integrator.
///
/// Owned by the controller; every tick receives the viewport state it
/// advances, so the engine holds no reference to its owner.
#[derive(Debug, Clone)]
pub struct MotionEngine {
    config: MotionConfig,
    mode: MotionMode,
    /// Pixels per second
    velocity: (f64, f64),
    samples: SampleRing,
    last_tick_ms: u64,
    glide_start_ms: u64,
}

impl MotionEngine {
    pub fn new(config: MotionConfig) -> Self {
        let samples = SampleRing::new(config.window());
        Self {
            config,
            mode: MotionMode::Idle,
            velocity: (0.0, 0.0),
            samples,
            last_tick_ms: 0,
            glide_start_ms: 0,
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    pub fn velocity(&self) -> (f64, f64) {
        self.velocity
    }

    pub fn is_gliding(&self) -> bool {
        self.mode == MotionMode::Gliding
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Restarts the tick interval measurement; called when the timer is armed
    pub fn reset_clock(&mut self, now_ms: u64) {
        self.last_tick_ms = now_ms;
    }

    /// Idle → Averaging. The window keeps only pan targets pushed by
    /// ticks, so the first tick after a stop lands on the target.
    pub fn begin(&mut self, current: ProjectedCoordinate) {
        if self.mode != MotionMode::Idle {
            return;
        }
        self.mode = MotionMode::Averaging;
        log::debug!("motion: idle -> averaging at ({}, {})", current.x, current.y);
    }

    /// Averaging → Gliding, keeping the last estimated velocity
    pub fn start_glide(&mut self, now_ms: u64) {
        self.mode = MotionMode::Gliding;
        self.glide_start_ms = now_ms;
        log::debug!(
            "motion: glide from velocity ({:.1}, {:.1}) px/s",
            self.velocity.0,
            self.velocity.1
        );
    }

    /// Back to Idle with an empty window. The timer registration is left
    /// alone; the next tick settles.
    pub fn stop(&mut self) {
        if self.mode != MotionMode::Idle {
            log::debug!("motion: stopped from {:?}", self.mode);
        }
        self.mode = MotionMode::Idle;
        self.velocity = (0.0, 0.0);
        self.samples.clear();
    }

    /// Advances `state` by one tick
    pub fn tick(&mut self, now_ms: u64, state: &mut ViewportState) -> TickOutcome {
        let delta = now_ms.saturating_sub(self.last_tick_ms);
        if delta < self.config.pan_interval_ms.max(1) {
            return TickOutcome::Skipped;
        }
        self.last_tick_ms = now_ms;

        match self.mode {
            MotionMode::Gliding => self.glide_step(now_ms, delta, state),
            MotionMode::Idle | MotionMode::Averaging => self.average_step(delta, state),
        }
    }

    fn average_step(&mut self, delta_ms: u64, state: &mut ViewportState) -> TickOutcome {
        let previous = state.current_pixels();
        let target = state.target_pixels();
        self.mode = MotionMode::Averaging;

        self.samples.push(target.x, target.y);
        let (x, y) = self.samples.average().unwrap_or((target.x, target.y));
        let next = ProjectedCoordinate::new(state.magnification(), x, y);
        state.set_current_pixels(next);

        let (dx, dy) = previous.delta_to(&next);
        self.velocity = (
            dx as f64 * 1000.0 / delta_ms as f64,
            dy as f64 * 1000.0 / delta_ms as f64,
        );
        log::trace!(
            "averaging: current ({}, {}) velocity ({:.1}, {:.1})",
            x,
            y,
            self.velocity.0,
            self.velocity.1
        );

        if next.delta_to(&target) == (0, 0) && self.is_slow() {
            self.settle(state);
            return TickOutcome::Settled;
        }
        TickOutcome::Moved
    }

    fn glide_step(&mut self, now_ms: u64, delta_ms: u64, state: &mut ViewportState) -> TickOutcome {
        let elapsed = now_ms.saturating_sub(self.glide_start_ms) as f64 / 1000.0;
        let friction = (1.0 - self.config.glide_friction).powf(1.0 + elapsed);
        self.velocity.0 *= friction;
        self.velocity.1 *= friction;

        let current = state.current_pixels();
        let step = delta_ms as f64 / 1000.0;
        let next = ProjectedCoordinate::new(
            state.magnification(),
            (current.x as f64 + self.velocity.0 * step) as i64,
            (current.y as f64 + self.velocity.1 * step) as i64,
        );
        state.set_current_pixels(next);
        state.pin_target_to_current();
        log::trace!(
            "gliding: current ({}, {}) friction {:.4}",
            next.x,
            next.y,
            friction
        );

        if self.is_slow() {
            self.settle(state);
            return TickOutcome::Settled;
        }
        TickOutcome::Moved
    }

    fn is_slow(&self) -> bool {
        let limit = self.config.settle_velocity;
        self.velocity.0.abs() < limit && self.velocity.1.abs() < limit
    }

    fn settle(&mut self, state: &mut ViewportState) {
        state.snap_current_to_target();
        log::debug!("motion: settled from {:?}", self.mode);
        self.mode = MotionMode::Idle;
        self.velocity = (0.0, 0.0);
        self.samples.clear();
    }
}
