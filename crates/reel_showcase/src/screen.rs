//! Demo screen state
//!
//! The controls around the carousel: image count and interval steppers,
//! autoplay and controls switches, and the two indicator radios. Every
//! change produces a fresh [`CarouselConfig`] for the engine.

use crate::config::ScreenConfig;
use reel_carousel::{CarouselConfig, IndicatorPosition, IndicatorType};
use tracing::debug;

/// Interval stepper increment in milliseconds
pub const INTERVAL_STEP_MS: i64 = 500;

/// Host screen controls
#[derive(Clone, Debug, PartialEq)]
pub struct CarouselScreen {
    base_url: String,
    image_count: usize,
    slide_interval: i64,
    auto_play: bool,
    show_controls: bool,
    indicator_type: IndicatorType,
    indicator_position: IndicatorPosition,
}

impl CarouselScreen {
    pub fn from_config(config: &ScreenConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            image_count: config.image_count,
            slide_interval: config.slide_interval,
            auto_play: config.auto_play,
            show_controls: config.show_controls,
            indicator_type: config.indicator_type,
            indicator_position: config.indicator_position,
        }
    }

    /// Generated image URLs, numbered from 1
    pub fn images(&self) -> Vec<String> {
        (1..=self.image_count)
            .map(|n| format!("{}{}", self.base_url, n))
            .collect()
    }

    /// Engine configuration for the current control values
    pub fn carousel_config(&self) -> CarouselConfig {
        CarouselConfig::new()
            .images(self.images())
            .slide_interval(self.slide_interval)
            .auto_play(self.auto_play)
            .show_arrows(self.show_controls)
            .show_indicators(self.show_controls)
            .indicator_type(self.indicator_type)
            .indicator_position(self.indicator_position)
    }

    /// Move the interval by `steps` stepper clicks
    ///
    /// Not clamped; a non-positive interval turns autoplay off in the engine.
    pub fn step_interval(&mut self, steps: i64) {
        self.slide_interval = self
            .slide_interval
            .saturating_add(steps.saturating_mul(INTERVAL_STEP_MS));
        debug!("Slide interval -> {}ms", self.slide_interval);
    }

    /// Add or remove images, never going below zero
    pub fn step_images(&mut self, delta: i64) {
        let count = i64::try_from(self.image_count).unwrap_or(i64::MAX);
        let next = count.saturating_add(delta).max(0);
        self.image_count = usize::try_from(next).unwrap_or(usize::MAX);
        debug!("Image count -> {}", self.image_count);
    }

    pub fn set_auto_play(&mut self, enabled: bool) {
        self.auto_play = enabled;
    }

    pub fn set_controls(&mut self, enabled: bool) {
        self.show_controls = enabled;
    }

    pub fn set_indicator_type(&mut self, indicator_type: IndicatorType) {
        self.indicator_type = indicator_type;
    }

    pub fn set_indicator_position(&mut self, position: IndicatorPosition) {
        self.indicator_position = position;
    }

    pub fn image_count(&self) -> usize {
        self.image_count
    }

    pub fn slide_interval(&self) -> i64 {
        self.slide_interval
    }

    pub fn auto_play(&self) -> bool {
        self.auto_play
    }

    pub fn show_controls(&self) -> bool {
        self.show_controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_carousel::ImageRef;

    fn screen() -> CarouselScreen {
        CarouselScreen::from_config(&ScreenConfig::default())
    }

    #[test]
    fn test_default_images() {
        let images = screen().images();
        assert_eq!(
            images,
            vec![
                "https://placehold.jp/500x250.jpg?text=Image%201",
                "https://placehold.jp/500x250.jpg?text=Image%202",
                "https://placehold.jp/500x250.jpg?text=Image%203",
            ]
        );
    }

    #[test]
    fn test_controls_drive_arrows_and_indicators() {
        let mut screen = screen();
        let config = screen.carousel_config();
        assert!(config.show_arrows);
        assert!(config.show_indicators);

        screen.set_controls(false);
        let config = screen.carousel_config();
        assert!(!config.show_arrows);
        assert!(!config.show_indicators);
    }

    #[test]
    fn test_carousel_config_carries_screen_values() {
        let mut screen = screen();
        screen.set_auto_play(false);
        screen.set_indicator_type(IndicatorType::Dots);
        screen.set_indicator_position(IndicatorPosition::Inside);

        let config = screen.carousel_config();
        assert!(!config.auto_play);
        assert_eq!(config.slide_interval, 3000);
        assert_eq!(config.indicator_type, IndicatorType::Dots);
        assert_eq!(config.indicator_position, IndicatorPosition::Inside);
        assert_eq!(
            config.images[0],
            ImageRef::uri("https://placehold.jp/500x250.jpg?text=Image%201")
        );
    }

    #[test]
    fn test_interval_stepper_is_unclamped() {
        let mut screen = screen();
        screen.step_interval(1);
        assert_eq!(screen.slide_interval(), 3500);

        screen.step_interval(-8);
        assert_eq!(screen.slide_interval(), -500);
        assert_eq!(screen.carousel_config().autoplay_interval(), None);
    }

    #[test]
    fn test_image_stepper_stops_at_zero() {
        let mut screen = screen();
        screen.step_images(2);
        assert_eq!(screen.image_count(), 5);

        screen.step_images(-10);
        assert_eq!(screen.image_count(), 0);
        assert!(screen.images().is_empty());

        screen.step_images(1);
        assert_eq!(screen.image_count(), 1);
    }
}
