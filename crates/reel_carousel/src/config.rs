//! Carousel configuration supplied by the host
//!
//! Only `images`, `slide_interval` and `auto_play` feed the state machine.
//! The remaining fields are presentation flags read when a frame is built.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default time between automatic advances, in milliseconds
pub const DEFAULT_SLIDE_INTERVAL_MS: i64 = 3000;

/// Opaque handle to an image bundled with the host application
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalImage(pub u64);

/// A single slide's image source
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRef {
    /// Remote image addressed by URI
    Uri(String),
    /// Image bundled with the host
    Local(LocalImage),
}

impl ImageRef {
    pub fn uri(uri: impl Into<String>) -> Self {
        ImageRef::Uri(uri.into())
    }

    pub fn local(handle: u64) -> Self {
        ImageRef::Local(LocalImage(handle))
    }
}

impl From<&str> for ImageRef {
    fn from(uri: &str) -> Self {
        ImageRef::Uri(uri.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(uri: String) -> Self {
        ImageRef::Uri(uri)
    }
}

impl From<LocalImage> for ImageRef {
    fn from(handle: LocalImage) -> Self {
        ImageRef::Local(handle)
    }
}

/// Indicator marker shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorType {
    /// Small round dots
    Dots,
    /// Flat square-cornered bars
    Bars,
    /// Bars with fully rounded ends
    #[default]
    Capsules,
}

/// Where the indicator strip sits relative to the slides
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorPosition {
    /// Overlaid on the bottom edge of the slides
    #[default]
    Inside,
    /// Below the slides
    Outside,
}

/// Carousel configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Slides in display order
    pub images: Vec<ImageRef>,
    /// Milliseconds between automatic advances; non-positive disables autoplay
    pub slide_interval: i64,
    /// Whether slides advance on their own
    pub auto_play: bool,
    /// Whether previous/next arrows are shown
    pub show_arrows: bool,
    /// Whether the indicator strip is shown
    pub show_indicators: bool,
    /// Indicator marker shape
    pub indicator_type: IndicatorType,
    /// Indicator strip placement
    pub indicator_position: IndicatorPosition,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            slide_interval: DEFAULT_SLIDE_INTERVAL_MS,
            auto_play: false,
            show_arrows: true,
            show_indicators: false,
            indicator_type: IndicatorType::default(),
            indicator_position: IndicatorPosition::default(),
        }
    }
}

impl CarouselConfig {
    /// Create a new carousel config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the slides
    pub fn images<I, T>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ImageRef>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    /// Set the autoplay interval in milliseconds
    pub fn slide_interval(mut self, interval_ms: i64) -> Self {
        self.slide_interval = interval_ms;
        self
    }

    /// Enable or disable autoplay
    pub fn auto_play(mut self, enabled: bool) -> Self {
        self.auto_play = enabled;
        self
    }

    /// Show or hide the arrow controls
    pub fn show_arrows(mut self, show: bool) -> Self {
        self.show_arrows = show;
        self
    }

    /// Show or hide the indicator strip
    pub fn show_indicators(mut self, show: bool) -> Self {
        self.show_indicators = show;
        self
    }

    /// Set the indicator marker shape
    pub fn indicator_type(mut self, indicator_type: IndicatorType) -> Self {
        self.indicator_type = indicator_type;
        self
    }

    /// Set the indicator strip placement
    pub fn indicator_position(mut self, position: IndicatorPosition) -> Self {
        self.indicator_position = position;
        self
    }

    pub fn slide_count(&self) -> usize {
        self.images.len()
    }

    /// The period autoplay should run at, if it should run at all
    ///
    /// `None` when autoplay is off, when the interval is not positive, or
    /// when there are no slides to advance through.
    pub fn autoplay_interval(&self) -> Option<Duration> {
        if !self.auto_play || self.images.is_empty() || self.slide_interval <= 0 {
            return None;
        }
        Some(Duration::from_millis(self.slide_interval as u64))
    }

    /// Autoplay was requested but the interval makes it impossible
    pub fn has_malformed_interval(&self) -> bool {
        self.auto_play && self.slide_interval <= 0
    }

    /// Whether moving from `previous` to `self` newly breaks the interval
    ///
    /// Presentation-only edits to an already malformed config don't count.
    pub(crate) fn malformed_interval_introduced(&self, previous: &CarouselConfig) -> bool {
        self.has_malformed_interval()
            && (!previous.has_malformed_interval()
                || self.slide_interval != previous.slide_interval)
    }

    /// Whether a change from `other` to `self` affects the autoplay schedule
    pub(crate) fn schedule_differs(&self, other: &CarouselConfig) -> bool {
        self.auto_play != other.auto_play
            || self.slide_interval != other.slide_interval
            || self.images.len() != other.images.len()
    }
}
