//! Autoplay scheduler
//!
//! Holds at most one live interval timer. Starting always tears down the
//! previous timer first, and stopping drops it, so a stale period can never
//! keep firing after a restart.

use reel_animation::{ScheduledInterval, SchedulerHandle};
use serde::Serialize;
use std::time::Duration;

/// Autoplay run state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoplayState {
    #[default]
    Stopped,
    Running,
}

/// Owner of the carousel's autoplay timer
#[derive(Debug)]
pub struct Autoplay {
    handle: SchedulerHandle,
    timer: Option<ScheduledInterval>,
}

impl Autoplay {
    pub fn new(handle: SchedulerHandle) -> Self {
        Self {
            handle,
            timer: None,
        }
    }

    pub fn state(&self) -> AutoplayState {
        if self.timer.is_some() {
            AutoplayState::Running
        } else {
            AutoplayState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Period of the live timer
    pub fn interval(&self) -> Option<Duration> {
        self.timer.as_ref().map(ScheduledInterval::period)
    }

    /// Time until the next tick of the live timer
    pub fn remaining(&self) -> Option<Duration> {
        self.timer.as_ref().and_then(ScheduledInterval::remaining)
    }

    /// (Re)start with a full fresh `interval`
    pub fn start(&mut self, interval: Duration) {
        self.stop();
        self.timer = ScheduledInterval::start(&self.handle, interval);
        if self.timer.is_some() {
            tracing::debug!(?interval, "autoplay started");
        } else {
            tracing::warn!("autoplay not started: animation scheduler is gone");
        }
    }

    /// Release the timer, discarding any tick that has not been taken
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            tracing::debug!(interval = ?timer.period(), "autoplay stopped");
        }
    }

    /// Drain ticks accrued by the live timer
    pub fn take_ticks(&self) -> u32 {
        self.timer.as_ref().map_or(0, ScheduledInterval::take_ticks)
    }
}
