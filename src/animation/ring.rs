use crate::core::constants::MAX_PAN_SAMPLES;

/// Fixed-capacity ring of recent pixel samples.
///
/// Storage is inline; pushing never allocates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRing {
    xs: [i64; MAX_PAN_SAMPLES],
    ys: [i64; MAX_PAN_SAMPLES],
    capacity: usize,
    count: usize,
    cursor: usize,
}

impl SampleRing {
    /// `capacity` is clamped to `1..=MAX_PAN_SAMPLES`
    pub fn new(capacity: usize) -> Self {
        Self {
            xs: [0; MAX_PAN_SAMPLES],
            ys: [0; MAX_PAN_SAMPLES],
            capacity: capacity.clamp(1, MAX_PAN_SAMPLES),
            count: 0,
            cursor: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Appends a sample, overwriting the oldest once full
    pub fn push(&mut self, x: i64, y: i64) {
        self.xs[self.cursor] = x;
        self.ys[self.cursor] = y;
        self.cursor = (self.cursor + 1) % self.capacity;
        if self.count < self.capacity {
            self.count += 1;
        }
    }

    pub fn clear(&mut self) {
        self.count = 0;
        self.cursor = 0;
    }

    /// Unweighted mean of the buffered samples, truncated towards zero
    pub fn average(&self) -> Option<(i64, i64)> {
        if self.count == 0 {
            return None;
        }
        let n = self.count as i64;
        let sum_x: i64 = self.xs[..self.count].iter().sum();
        let sum_y: i64 = self.ys[..self.count].iter().sum();
        Some((sum_x / n, sum_y / n))
    }
}
