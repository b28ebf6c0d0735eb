//! Showcase configuration file handling
//!
//! `showcase.toml` seeds the demo screen controls, the simulated layout
//! and the session length. Every field is optional.

use anyhow::{Context, Result};
use reel_carousel::{IndicatorPosition, IndicatorType, DEFAULT_SLIDE_INTERVAL_MS};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Placeholder image service used by the demo screen
pub const DEFAULT_BASE_URL: &str = "https://placehold.jp/500x250.jpg?text=Image%20";

/// Top-level showcase configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShowcaseConfig {
    #[serde(default)]
    pub screen: ScreenConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Initial state of the demo screen controls
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ScreenConfig {
    /// Prefix for generated image URLs; the slide number is appended
    pub base_url: String,
    pub image_count: usize,
    pub slide_interval: i64,
    pub auto_play: bool,
    /// Drives both arrows and indicators
    pub show_controls: bool,
    pub indicator_type: IndicatorType,
    pub indicator_position: IndicatorPosition,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            image_count: 3,
            slide_interval: DEFAULT_SLIDE_INTERVAL_MS,
            auto_play: true,
            show_controls: true,
            indicator_type: IndicatorType::Capsules,
            indicator_position: IndicatorPosition::Outside,
        }
    }
}

/// Simulated layout
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width reported by the first layout pass
    pub width: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self { width: 360.0 }
    }
}

/// Session pacing
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Frame length in milliseconds
    pub frame_ms: u64,
    /// Session length in milliseconds
    pub duration_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            duration_ms: 10_000,
        }
    }
}

impl ShowcaseConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: ShowcaseConfig = toml::from_str(content)?;
        if config.session.frame_ms == 0 {
            anyhow::bail!("session.frame_ms must be at least 1");
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_screen_defaults() {
        let config = ShowcaseConfig::parse("").unwrap();
        assert_eq!(config.screen.image_count, 3);
        assert_eq!(config.screen.slide_interval, 3000);
        assert!(config.screen.auto_play);
        assert!(config.screen.show_controls);
        assert_eq!(config.screen.indicator_position, IndicatorPosition::Outside);
        assert_eq!(config.viewport.width, 360.0);
        assert_eq!(config.session.frame_ms, 16);
    }

    #[test]
    fn test_partial_sections() {
        let config = ShowcaseConfig::parse(
            r#"
            [screen]
            image_count = 5
            indicator_type = "bars"

            [session]
            duration_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.screen.image_count, 5);
        assert_eq!(config.screen.indicator_type, IndicatorType::Bars);
        assert_eq!(config.screen.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session.duration_ms, 2500);
        assert_eq!(config.session.frame_ms, 16);
    }

    #[test]
    fn test_zero_frame_rejected() {
        let err = ShowcaseConfig::parse("[session]\nframe_ms = 0\n").unwrap_err();
        assert!(err.to_string().contains("frame_ms"));
    }

    #[test]
    fn test_bundled_config_matches_defaults() {
        let config = ShowcaseConfig::parse(include_str!("../showcase.toml")).unwrap();
        let defaults = ScreenConfig::default();
        assert_eq!(config.screen.base_url, defaults.base_url);
        assert_eq!(config.screen.image_count, defaults.image_count);
        assert_eq!(config.screen.indicator_type, defaults.indicator_type);
        assert_eq!(config.session.duration_ms, 12_000);
    }

    #[test]
    fn test_unknown_indicator_rejected() {
        assert!(ShowcaseConfig::parse("[screen]\nindicator_type = \"stars\"\n").is_err());
    }
}
