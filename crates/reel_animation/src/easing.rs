//! Easing curves
//!
//! Maps linear progress (0.0 to 1.0) onto an eased progress curve.

/// Easing function applied to a tween's linear progress
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Quadratic acceleration from zero velocity
    EaseIn,
    /// Quadratic deceleration to zero velocity
    EaseOut,
    /// Quadratic acceleration until halfway, then deceleration
    #[default]
    EaseInOut,
    /// Cubic acceleration until halfway, then deceleration
    EaseInOutCubic,
}

impl Easing {
    /// Apply the curve to `t`, clamped to `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let f = 2.0 * t - 2.0;
                    0.5 * f * f * f + 1.0
                }
            }
        }
    }
}
