//! Periodic interval timers
//!
//! Timers only count elapsed periods. Whoever owns the timer drains the
//! pending ticks on its own thread, so a tick never runs code on the
//! scheduler's clock.

/// A periodic tick counter
#[derive(Clone, Copy, Debug)]
pub struct IntervalTimer {
    period_ms: f32,
    elapsed_ms: f32,
    pending: u32,
}

impl IntervalTimer {
    /// Create a timer that fires every `period_ms`
    ///
    /// Non-positive or non-finite periods produce a timer that never fires.
    pub fn new(period_ms: f32) -> Self {
        Self {
            period_ms,
            elapsed_ms: 0.0,
            pending: 0,
        }
    }

    pub fn period_ms(&self) -> f32 {
        self.period_ms
    }

    /// Time accumulated toward the next tick
    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Time left until the next tick
    pub fn remaining_ms(&self) -> f32 {
        (self.period_ms - self.elapsed_ms).max(0.0)
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    fn is_armed(&self) -> bool {
        self.period_ms.is_finite() && self.period_ms > 0.0
    }

    /// Advance the timer clock by `dt_ms`, accruing every whole period
    pub fn step(&mut self, dt_ms: f32) {
        if !self.is_armed() || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return;
        }
        self.elapsed_ms += dt_ms;
        while self.elapsed_ms >= self.period_ms {
            self.elapsed_ms -= self.period_ms;
            self.pending = self.pending.saturating_add(1);
        }
    }

    /// Drain the ticks accrued since the last call
    pub fn take_ticks(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }

    /// Discard pending ticks and start a fresh full period
    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
        self.pending = 0;
    }
}
