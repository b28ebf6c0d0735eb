//! Eased tween animation
//!
//! Fixed-duration interpolation between two values along an easing curve.
//! Retargeting mid-flight restarts from the current value, so a tween never
//! jumps and never queues.

use crate::easing::Easing;

/// A single eased interpolation task
#[derive(Clone, Copy, Debug)]
pub struct Tween {
    from: f32,
    to: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    /// Create a settled tween resting at `initial`
    pub fn new(initial: f32) -> Self {
        Self {
            from: initial,
            to: initial,
            duration_ms: 0.0,
            elapsed_ms: 0.0,
            easing: Easing::default(),
        }
    }

    /// Set the easing curve used for subsequent progress
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).min(1.0)
        }
    }

    /// Current eased value
    pub fn value(&self) -> f32 {
        if self.is_settled() {
            return self.to;
        }
        let t = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * t
    }

    pub fn is_settled(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Ease toward `target` over `duration_ms`, starting from the current value
    ///
    /// Retargeting to the current target is a no-op: a flight keeps its
    /// running clock and a settled tween stays settled.
    pub fn retarget(&mut self, target: f32, duration_ms: f32) {
        if (target - self.to).abs() < f32::EPSILON {
            return;
        }
        self.from = self.value();
        self.to = target;
        self.duration_ms = duration_ms.max(0.0);
        self.elapsed_ms = 0.0;
    }

    /// Jump to `value` with no animation
    pub fn snap(&mut self, value: f32) {
        self.from = value;
        self.to = value;
        self.duration_ms = 0.0;
        self.elapsed_ms = 0.0;
    }

    /// Advance the tween clock by `dt_ms`
    pub fn step(&mut self, dt_ms: f32) {
        if self.is_settled() || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
    }
}
