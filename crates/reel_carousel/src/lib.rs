//! Reel Carousel
//!
//! An auto-advancing image carousel engine with swipe navigation, driven by
//! the `reel_animation` frame clock. The engine is headless: hosts feed it
//! layout widths, configuration and gesture samples, and draw whatever
//! [`CarouselFrame`] it reports.
//!
//! # Structure
//!
//! - **Slide index** ([`index`]): the current slide, wrapped onto the collection
//! - **Transition driver** ([`transition`]): eased strip offset toward the current slide
//! - **Gesture translation** ([`gesture`]): pan samples to discrete intents, across threads
//! - **Autoplay** ([`autoplay`]): a single restartable interval timer
//! - **Indicators** ([`indicator`]): pure rendering of the marker strip
//! - **Engine** ([`carousel`]): the owner that sequences all of the above

pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod error;
pub mod gesture;
pub mod index;
pub mod indicator;
pub mod observer;
pub mod transition;

pub use autoplay::{Autoplay, AutoplayState};
pub use carousel::{Carousel, CarouselFrame};
pub use config::{
    CarouselConfig, ImageRef, IndicatorPosition, IndicatorType, LocalImage,
    DEFAULT_SLIDE_INTERVAL_MS,
};
pub use error::{CarouselError, Result};
pub use gesture::{
    classify, intent_channel, GestureOutcome, Intent, IntentQueue, IntentSender, PanTracker,
    SwipeDirection, SWIPE_THRESHOLD,
};
pub use index::{wrap_index, Origin, SlideIndex};
pub use indicator::{render_indicators, IndicatorLayout, IndicatorMarker, MarkerShape};
pub use observer::{IndexChange, ObserverId, Observers};
pub use transition::{SlideStrip, Viewport, TRANSITION_DURATION_MS};
