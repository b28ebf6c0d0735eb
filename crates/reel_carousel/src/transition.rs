//! Slide strip transition driver
//!
//! Translates the slide strip horizontally so the current slide fills the
//! viewport. The offset eases toward `-index * width` over a fixed duration.

use reel_animation::{AnimatedValue, Easing, SchedulerHandle};
use serde::Serialize;

/// Duration of the ease between two slides, in milliseconds
pub const TRANSITION_DURATION_MS: u32 = 300;

/// Measured width of the carousel viewport
///
/// Starts unmeasured. Zero, negative and non-finite widths are treated as
/// unmeasured rather than as a width of zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Viewport {
    width: Option<f32>,
}

impl Viewport {
    pub fn unmeasured() -> Self {
        Self { width: None }
    }

    pub fn measured(width: f32) -> Self {
        let mut viewport = Self::unmeasured();
        viewport.set_width(Some(width));
        viewport
    }

    /// Record a layout pass; returns true if the usable width changed
    pub fn set_width(&mut self, width: Option<f32>) -> bool {
        let width = width.filter(|w| w.is_finite() && *w > 0.0);
        let changed = width != self.width;
        self.width = width;
        changed
    }

    pub fn width(&self) -> Option<f32> {
        self.width
    }

    pub fn is_measured(&self) -> bool {
        self.width.is_some()
    }
}

/// The horizontally translated row of slides
#[derive(Debug)]
pub struct SlideStrip {
    offset: AnimatedValue,
}

impl SlideStrip {
    /// Create a strip resting on `index` at `width`
    pub fn new(handle: SchedulerHandle, index: usize, width: f32) -> Self {
        let offset = AnimatedValue::new(handle, offset_for(index, width), TRANSITION_DURATION_MS)
            .with_easing(Easing::EaseInOut);
        Self { offset }
    }

    /// Ease toward `index`, overriding any transition in flight
    pub fn animate_to(&mut self, index: usize, width: f32) {
        self.offset.animate_to(offset_for(index, width));
    }

    /// Jump straight to `index`, used after a resize
    pub fn snap_to(&mut self, index: usize, width: f32) {
        self.offset.set_immediate(offset_for(index, width));
    }

    /// Current translation, possibly mid-transition
    pub fn offset(&self) -> f32 {
        self.offset.get()
    }

    /// Translation the strip is easing toward
    pub fn target_offset(&self) -> f32 {
        self.offset.target()
    }

    pub fn is_animating(&self) -> bool {
        self.offset.is_animating()
    }
}

/// Resting translation for a slide
pub fn offset_for(index: usize, width: f32) -> f32 {
    -(index as f32) * width
}

/// Total width of a strip holding `count` slides
pub fn strip_width(count: usize, width: f32) -> f32 {
    count as f32 * width
}
