//! Reel Animation System
//!
//! Frame-clock driven tweens and timers for UI components.
//!
//! # Features
//!
//! - **Eased Tweens**: Fixed-duration interpolation with retargeting mid-flight
//! - **Interval Timers**: Periodic tick counters drained by their owner
//! - **Weak Handles**: Components never keep the scheduler alive
//! - **RAII Registration**: `AnimatedValue` and `ScheduledInterval` release
//!   their scheduler slot on drop
//! - **Deterministic Time**: `advance()` steps by an explicit duration for
//!   simulation and tests; `tick()` follows the wall clock

pub mod easing;
pub mod scheduler;
pub mod timer;
pub mod tween;

pub use easing::Easing;
pub use scheduler::{
    AnimatedValue, AnimationScheduler, ScheduledInterval, SchedulerHandle, TimerId, TweenId,
};
pub use timer::IntervalTimer;
pub use tween::Tween;
