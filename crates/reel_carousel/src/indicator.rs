//! Indicator strip rendering
//!
//! A pure function of the current index and slide count. It reads the
//! target index, so the active marker moves the instant a transition is
//! requested rather than when the slide finishes easing in.

use crate::config::{IndicatorPosition, IndicatorType};
use serde::Serialize;
use smallvec::SmallVec;

/// Inactive marker colour
pub const INACTIVE_COLOR: &str = "#334155";
/// Active marker colour
pub const ACTIVE_COLOR: &str = "#22c55e";
/// Horizontal margin on each side of a marker
pub const MARKER_MARGIN_X: f32 = 4.0;

/// Marker box for one indicator shape
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MarkerShape {
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
}

impl IndicatorType {
    /// Box dimensions for this marker type
    pub fn shape(&self) -> MarkerShape {
        match self {
            IndicatorType::Dots => MarkerShape {
                width: 10.0,
                height: 10.0,
                corner_radius: 5.0,
            },
            IndicatorType::Bars => MarkerShape {
                width: 25.0,
                height: 5.0,
                corner_radius: 0.0,
            },
            IndicatorType::Capsules => MarkerShape {
                width: 25.0,
                height: 5.0,
                corner_radius: 2.5,
            },
        }
    }
}

impl IndicatorPosition {
    /// Vertical offset of the strip from the bottom edge of the slides
    ///
    /// Negative values pull the strip up over the slides.
    pub fn margin_top(&self) -> f32 {
        match self {
            IndicatorPosition::Inside => -30.0,
            IndicatorPosition::Outside => 10.0,
        }
    }
}

/// One indicator marker
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct IndicatorMarker {
    /// Slide this marker selects when tapped
    pub index: usize,
    pub active: bool,
    pub shape: MarkerShape,
    pub margin_x: f32,
    pub color: &'static str,
}

/// The whole indicator strip
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndicatorLayout {
    pub indicator_type: IndicatorType,
    pub position: IndicatorPosition,
    pub margin_top: f32,
    pub markers: SmallVec<[IndicatorMarker; 8]>,
}

impl IndicatorLayout {
    /// Index of the highlighted marker, if any
    pub fn active_index(&self) -> Option<usize> {
        self.markers.iter().find(|m| m.active).map(|m| m.index)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Build the indicator strip: one marker per slide, `current` highlighted
pub fn render_indicators(
    current: Option<usize>,
    count: usize,
    indicator_type: IndicatorType,
    position: IndicatorPosition,
) -> IndicatorLayout {
    let shape = indicator_type.shape();
    let markers = (0..count)
        .map(|index| {
            let active = current == Some(index);
            IndicatorMarker {
                index,
                active,
                shape,
                margin_x: MARKER_MARGIN_X,
                color: if active { ACTIVE_COLOR } else { INACTIVE_COLOR },
            }
        })
        .collect();

    IndicatorLayout {
        indicator_type,
        position,
        margin_top: position.margin_top(),
        markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_marker_per_slide() {
        let layout = render_indicators(
            Some(1),
            4,
            IndicatorType::Capsules,
            IndicatorPosition::Inside,
        );
        assert_eq!(layout.len(), 4);
        assert_eq!(layout.active_index(), Some(1));
        assert_eq!(layout.markers.iter().filter(|m| m.active).count(), 1);
        assert_eq!(layout.markers[1].color, ACTIVE_COLOR);
        assert_eq!(layout.markers[0].color, INACTIVE_COLOR);
    }

    #[test]
    fn test_empty_collection_renders_nothing() {
        let layout = render_indicators(None, 0, IndicatorType::Dots, IndicatorPosition::Outside);
        assert!(layout.is_empty());
        assert_eq!(layout.active_index(), None);
    }

    #[test]
    fn test_marker_shapes() {
        assert_eq!(
            IndicatorType::Dots.shape(),
            MarkerShape {
                width: 10.0,
                height: 10.0,
                corner_radius: 5.0
            }
        );
        assert_eq!(IndicatorType::Bars.shape().corner_radius, 0.0);
        assert_eq!(IndicatorType::Capsules.shape().width, 25.0);
    }

    #[test]
    fn test_position_margin() {
        let inside = render_indicators(Some(0), 2, IndicatorType::Bars, IndicatorPosition::Inside);
        let outside =
            render_indicators(Some(0), 2, IndicatorType::Bars, IndicatorPosition::Outside);
        assert_eq!(inside.margin_top, -30.0);
        assert_eq!(outside.margin_top, 10.0);
    }
}
