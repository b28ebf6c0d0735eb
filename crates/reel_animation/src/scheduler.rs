//! Animation scheduler
//!
//! Owns every active tween and interval timer and steps them each frame.
//! Components never hold the scheduler itself; they hold a weak
//! [`SchedulerHandle`] and register work through RAII wrappers:
//! - `AnimatedValue` - an eased value with a single retargetable tween
//! - `ScheduledInterval` - a periodic timer released on drop

use crate::easing::Easing;
use crate::timer::IntervalTimer;
use crate::tween::Tween;
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::{Duration, Instant};

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
    /// Handle to a registered interval timer
    pub struct TimerId;
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, Tween>,
    timers: SlotMap<TimerId, IntervalTimer>,
    last_frame: Instant,
    /// Total time advanced since creation
    clock: Duration,
}

impl SchedulerInner {
    fn step(&mut self, dt: Duration) -> bool {
        let dt_ms = duration_ms(dt);
        self.clock += dt;

        for (_, tween) in self.tweens.iter_mut() {
            tween.step(dt_ms);
        }

        for (_, timer) in self.timers.iter_mut() {
            timer.step(dt_ms);
        }

        self.has_active()
    }

    fn has_active(&self) -> bool {
        self.tweens.iter().any(|(_, t)| !t.is_settled())
    }
}

fn duration_ms(dt: Duration) -> f32 {
    dt.as_micros() as f32 / 1000.0
}

fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    // A panic while holding the lock leaves plain numeric state behind; keep going
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The scheduler that steps all tweens and timers
///
/// Held by whoever drives frames (the host event loop). Time only moves
/// when the driver calls [`advance`](Self::advance) or [`tick`](Self::tick).
///
/// ```
/// use reel_animation::{AnimatedValue, AnimationScheduler};
/// use std::time::Duration;
///
/// let scheduler = AnimationScheduler::new();
/// let mut offset = AnimatedValue::new(scheduler.handle(), 0.0, 300);
/// offset.animate_to(-360.0);
///
/// scheduler.advance(Duration::from_millis(300));
/// assert_eq!(offset.get(), -360.0);
/// ```
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
                timers: SlotMap::with_key(),
                last_frame: Instant::now(),
                clock: Duration::ZERO,
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Step everything by an explicit frame duration
    ///
    /// Returns true if any tween is still in flight.
    pub fn advance(&self, dt: Duration) -> bool {
        let mut inner = lock(&self.inner);
        inner.last_frame += dt;
        inner.step(dt)
    }

    /// Step everything by the wall-clock time since the previous frame
    ///
    /// Returns true if any tween is still in flight.
    pub fn tick(&self) -> bool {
        let mut inner = lock(&self.inner);
        let now = Instant::now();
        let dt = now.saturating_duration_since(inner.last_frame);
        inner.last_frame = now;
        inner.step(dt)
    }

    /// Total time this scheduler has been advanced
    pub fn elapsed(&self) -> Duration {
        lock(&self.inner).clock
    }

    /// Check if any tweens are still in flight
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner).has_active()
    }

    /// Get the number of registered tweens
    pub fn tween_count(&self) -> usize {
        lock(&self.inner).tweens.len()
    }

    /// Get the number of registered timers
    pub fn timer_count(&self) -> usize {
        lock(&self.inner).timers.len()
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AnimationScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("AnimationScheduler")
            .field("tweens", &inner.tweens.len())
            .field("timers", &inner.timers.len())
            .field("clock", &inner.clock)
            .finish()
    }
}

/// A weak handle to the animation scheduler
///
/// This is passed to components that need to register animations.
/// It won't prevent the scheduler from being dropped; once it is, every
/// operation is a no-op.
#[derive(Clone, Debug)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    // =========================================================================
    // Tween Operations
    // =========================================================================

    /// Register a tween and return its ID
    pub fn register_tween(&self, tween: Tween) -> Option<TweenId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).tweens.insert(tween))
    }

    /// Retarget a tween from its current value
    pub fn retarget_tween(&self, id: TweenId, target: f32, duration_ms: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(tween) = lock(&inner).tweens.get_mut(id) {
                tween.retarget(target, duration_ms);
            }
        }
    }

    /// Jump a tween to `value` without animating
    pub fn snap_tween(&self, id: TweenId, value: f32) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(tween) = lock(&inner).tweens.get_mut(id) {
                tween.snap(value);
            }
        }
    }

    /// Get current tween value
    pub fn tween_value(&self, id: TweenId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get(id).map(|t| t.value()))
    }

    /// Check if a tween has settled
    ///
    /// A tween that no longer exists counts as settled.
    pub fn is_tween_settled(&self, id: TweenId) -> bool {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get(id).map(|t| t.is_settled()))
            .unwrap_or(true)
    }

    /// Remove a tween
    pub fn remove_tween(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).tweens.remove(id);
        }
    }

    // =========================================================================
    // Timer Operations
    // =========================================================================

    /// Register an interval timer and return its ID
    pub fn register_timer(&self, timer: IntervalTimer) -> Option<TimerId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).timers.insert(timer))
    }

    /// Drain ticks accrued by a timer
    pub fn take_timer_ticks(&self, id: TimerId) -> u32 {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).timers.get_mut(id).map(|t| t.take_ticks()))
            .unwrap_or(0)
    }

    /// Time left until a timer's next tick
    pub fn timer_remaining(&self, id: TimerId) -> Option<Duration> {
        self.inner.upgrade().and_then(|inner| {
            lock(&inner)
                .timers
                .get(id)
                .map(|t| Duration::from_micros((t.remaining_ms() * 1000.0) as u64))
        })
    }

    /// Restart a timer's period, discarding pending ticks
    pub fn reset_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            if let Some(timer) = lock(&inner).timers.get_mut(id) {
                timer.reset();
            }
        }
    }

    /// Check whether a timer is still registered
    pub fn has_timer(&self, id: TimerId) -> bool {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).timers.contains_key(id))
            .unwrap_or(false)
    }

    /// Remove a timer
    pub fn remove_timer(&self, id: TimerId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).timers.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

// ============================================================================
// Animated Value (tween-based)
// ============================================================================

/// An eased value that registers with the scheduler on first motion
///
/// Each instance owns at most one tween slot. Every `animate_to` retargets
/// that slot in place, so a new target overrides the one in flight instead
/// of queueing behind it. Dropping the value removes the tween, after which
/// the scheduler can no longer write to it.
#[derive(Debug)]
pub struct AnimatedValue {
    handle: SchedulerHandle,
    tween_id: Option<TweenId>,
    duration_ms: u32,
    easing: Easing,
    /// Value used before a tween exists
    current: f32,
    /// The value we're easing toward
    target: f32,
}

impl AnimatedValue {
    /// Create an animated value resting at `initial`
    pub fn new(handle: SchedulerHandle, initial: f32, duration_ms: u32) -> Self {
        Self {
            handle,
            tween_id: None,
            duration_ms,
            easing: Easing::default(),
            current: initial,
            target: initial,
        }
    }

    /// Use a different easing curve
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Ease toward `target`, overriding any flight in progress
    pub fn animate_to(&mut self, target: f32) {
        self.target = target;

        if let Some(id) = self.tween_id {
            self.handle
                .retarget_tween(id, target, self.duration_ms as f32);
            return;
        }

        if (target - self.current).abs() > f32::EPSILON {
            let tween = Tween::new(self.current).with_easing(self.easing);
            if let Some(id) = self.handle.register_tween(tween) {
                self.tween_id = Some(id);
                self.handle
                    .retarget_tween(id, target, self.duration_ms as f32);
            } else {
                // Scheduler is gone; nothing can animate
                self.current = target;
            }
        }
    }

    /// Get the current animated value
    pub fn get(&self) -> f32 {
        match self.tween_id {
            Some(id) => self.handle.tween_value(id).unwrap_or(self.target),
            None => self.current,
        }
    }

    /// Set value immediately without animation
    pub fn set_immediate(&mut self, value: f32) {
        if let Some(id) = self.tween_id {
            self.handle.snap_tween(id, value);
        }
        self.current = value;
        self.target = value;
    }

    /// Check if currently animating
    pub fn is_animating(&self) -> bool {
        match self.tween_id {
            Some(id) => !self.handle.is_tween_settled(id),
            None => false,
        }
    }

    /// Get the current target value
    pub fn target(&self) -> f32 {
        self.target
    }
}

impl Drop for AnimatedValue {
    fn drop(&mut self) {
        if let Some(id) = self.tween_id.take() {
            self.handle.remove_tween(id);
        }
    }
}

// ============================================================================
// Scheduled Interval
// ============================================================================

/// An owned periodic timer registration
///
/// The timer exists exactly as long as this value does. Dropping it removes
/// the timer from the scheduler, so no tick can be observed afterwards.
#[derive(Debug)]
pub struct ScheduledInterval {
    handle: SchedulerHandle,
    timer_id: TimerId,
    period: Duration,
}

impl ScheduledInterval {
    /// Register a timer firing every `period`
    ///
    /// Returns `None` if the scheduler has been dropped.
    pub fn start(handle: &SchedulerHandle, period: Duration) -> Option<Self> {
        let timer_id = handle.register_timer(IntervalTimer::new(duration_ms(period)))?;
        tracing::trace!(?timer_id, ?period, "interval registered");
        Some(Self {
            handle: handle.clone(),
            timer_id,
            period,
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn id(&self) -> TimerId {
        self.timer_id
    }

    /// Drain the ticks accrued since the last call
    pub fn take_ticks(&self) -> u32 {
        self.handle.take_timer_ticks(self.timer_id)
    }

    /// Time left until the next tick
    pub fn remaining(&self) -> Option<Duration> {
        self.handle.timer_remaining(self.timer_id)
    }
}

impl Drop for ScheduledInterval {
    fn drop(&mut self) {
        tracing::trace!(timer_id = ?self.timer_id, "interval released");
        self.handle.remove_timer(self.timer_id);
    }
}
