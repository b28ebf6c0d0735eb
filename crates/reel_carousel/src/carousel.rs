//! Carousel engine
//!
//! Owns the slide index, the strip offset and the autoplay timer, and is
//! the only place any of them is written. Everything that wants to move the
//! carousel (swipes, arrow presses, indicator taps, autoplay ticks) goes
//! through [`Carousel::request_index`].
//!
//! Manual requests are bracketed by the autoplay timer: the timer is
//! released before the index changes and a fresh one is started after, so
//! the next automatic advance is always a full interval away.
//!
//! # Example
//!
//! ```
//! use reel_animation::AnimationScheduler;
//! use reel_carousel::{Carousel, CarouselConfig};
//! use std::time::Duration;
//!
//! let scheduler = AnimationScheduler::new();
//! let config = CarouselConfig::new()
//!     .images(["a.jpg", "b.jpg"])
//!     .auto_play(true)
//!     .slide_interval(1000);
//! let mut carousel = Carousel::new(scheduler.handle(), config);
//! carousel.set_viewport_width(360.0);
//!
//! scheduler.advance(Duration::from_millis(1000));
//! carousel.pump();
//! assert_eq!(carousel.current_index(), Some(1));
//! ```

use crate::autoplay::{Autoplay, AutoplayState};
use crate::config::CarouselConfig;
use crate::error::{CarouselError, Result};
use crate::gesture::{intent_channel, Intent, IntentQueue, IntentSender, PanTracker, SwipeDirection};
use crate::index::{Origin, SlideIndex};
use crate::indicator::{render_indicators, IndicatorLayout};
use crate::observer::{IndexChange, ObserverId, Observers};
use crate::transition::{strip_width, SlideStrip, Viewport};
use reel_animation::SchedulerHandle;
use serde::Serialize;
use std::time::Duration;

/// Index state and strip offset; exists only while there are slides to show
#[derive(Debug)]
struct SlideState {
    index: SlideIndex,
    strip: SlideStrip,
}

/// Snapshot of everything a host needs to draw the carousel
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CarouselFrame {
    pub current_index: Option<usize>,
    pub slide_count: usize,
    pub viewport_width: Option<f32>,
    /// Current strip translation, possibly mid-transition
    pub offset: Option<f32>,
    /// Translation the strip is easing toward
    pub target_offset: Option<f32>,
    pub strip_width: Option<f32>,
    pub animating: bool,
    pub autoplay: AutoplayState,
    /// Whether previous/next arrows are drawn
    pub arrows: bool,
    /// The indicator strip, when shown
    pub indicators: Option<IndicatorLayout>,
}

/// The carousel state owner
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    handle: SchedulerHandle,
    viewport: Viewport,
    slides: Option<SlideState>,
    autoplay: Autoplay,
    intents: IntentQueue,
    intent_tx: IntentSender,
    observers: Observers,
    mounted: bool,
}

impl Carousel {
    /// Mount a carousel
    ///
    /// Nothing moves until the host reports a viewport width.
    pub fn new(handle: SchedulerHandle, config: CarouselConfig) -> Self {
        let (intent_tx, intents) = intent_channel();
        if config.has_malformed_interval() {
            tracing::warn!(
                slide_interval = config.slide_interval,
                "non-positive slide interval, autoplay disabled"
            );
        }

        let mut carousel = Self {
            autoplay: Autoplay::new(handle.clone()),
            config,
            handle,
            viewport: Viewport::unmeasured(),
            slides: None,
            intents,
            intent_tx,
            observers: Observers::new(),
            mounted: true,
        };
        carousel.sync_slides(false);
        carousel.sync_autoplay();
        carousel
    }

    // =========================================================================
    // Host inputs
    // =========================================================================

    /// Report the width measured by a layout pass
    pub fn set_viewport_width(&mut self, width: f32) {
        self.apply_layout(Some(width));
    }

    /// Forget the measured width, e.g. while the view is detached
    pub fn invalidate_layout(&mut self) {
        self.apply_layout(None);
    }

    fn apply_layout(&mut self, width: Option<f32>) {
        if !self.mounted || !self.viewport.set_width(width) {
            return;
        }
        tracing::debug!(width = ?self.viewport.width(), "viewport changed");
        self.sync_slides(true);
        self.sync_autoplay();
    }

    /// Replace the configuration
    ///
    /// Changing the slide count, interval or autoplay flag restarts the
    /// autoplay schedule; presentation-only changes leave it alone.
    pub fn set_config(&mut self, config: CarouselConfig) {
        if !self.mounted {
            return;
        }
        if config.malformed_interval_introduced(&self.config) {
            tracing::warn!(
                slide_interval = config.slide_interval,
                "non-positive slide interval, autoplay disabled"
            );
        }

        let schedule_changed = config.schedule_differs(&self.config);
        self.config = config;
        self.sync_slides(false);
        if schedule_changed {
            self.sync_autoplay();
        }
    }

    /// Bring index state in line with the slide count and viewport
    ///
    /// With `snap`, an existing strip jumps to its resting offset; used when
    /// the geometry changed under it.
    fn sync_slides(&mut self, snap: bool) {
        let count = self.config.slide_count();
        if count == 0 {
            if self.slides.take().is_some() {
                tracing::debug!("slides removed, index state dropped");
            }
            return;
        }

        let width = self.viewport.width();
        if let Some(slides) = self.slides.as_mut() {
            let resized = slides.index.len() != count;
            if resized {
                // count > 0 was checked above
                let _ = slides.index.resize(count);
            }
            if let Some(width) = width.filter(|_| snap || resized) {
                slides.strip.snap_to(slides.index.current(), width);
            }
            return;
        }

        let Some(width) = width else {
            return;
        };
        if let Ok(index) = SlideIndex::new(count) {
            let strip = SlideStrip::new(self.handle.clone(), index.current(), width);
            tracing::debug!(count, width, "index state created");
            self.slides = Some(SlideState { index, strip });
        }
    }

    /// Run autoplay iff everything it needs is present, with a fresh period
    fn sync_autoplay(&mut self) {
        let interval = self
            .config
            .autoplay_interval()
            .filter(|_| self.mounted && self.slides.is_some() && self.viewport.is_measured());

        match interval {
            Some(interval) => self.autoplay.start(interval),
            None => self.autoplay.stop(),
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Move to `target`, wrapped onto the slide collection
    ///
    /// Manual requests stop autoplay before the move and restart it with a
    /// full interval afterwards. Requesting the current index leaves the
    /// index and offset alone but still restarts the interval when manual.
    pub fn request_index(&mut self, target: i64, origin: Origin) -> Result<usize> {
        if !self.mounted {
            return Err(CarouselError::Unmounted);
        }
        if self.config.images.is_empty() {
            tracing::trace!(target, ?origin, "request ignored: no slides");
            return Err(CarouselError::EmptyCollection);
        }
        let width = match self.viewport.width() {
            Some(width) => width,
            None => {
                tracing::trace!(target, ?origin, "request ignored: viewport unmeasured");
                return Err(CarouselError::UnmeasuredViewport);
            }
        };

        if origin == Origin::Manual {
            self.autoplay.stop();
        }

        let slides = self
            .slides
            .as_mut()
            .ok_or(CarouselError::EmptyCollection)?;
        let previous = slides.index.current();
        let current = slides.index.set(target);
        slides.strip.animate_to(current, width);

        if previous != current {
            tracing::debug!(previous, current, ?origin, "slide transition");
            self.observers.notify(&IndexChange {
                previous,
                current,
                origin,
            });
        }

        if origin == Origin::Manual {
            self.sync_autoplay();
        }
        Ok(current)
    }

    fn step(&mut self, delta: i64, origin: Origin) -> Result<usize> {
        let current = self
            .current_index()
            .ok_or(if self.config.images.is_empty() {
                CarouselError::EmptyCollection
            } else {
                CarouselError::UnmeasuredViewport
            })?;
        self.request_index(current as i64 + delta, origin)
    }

    /// Show the next slide, as the "next" arrow does
    pub fn advance(&mut self) -> Result<usize> {
        self.step(1, Origin::Manual)
    }

    /// Show the previous slide, as the "previous" arrow does
    pub fn retreat(&mut self) -> Result<usize> {
        self.step(-1, Origin::Manual)
    }

    /// Show a specific slide, as an indicator tap does
    pub fn select(&mut self, index: usize) -> Result<usize> {
        self.request_index(index as i64, Origin::Manual)
    }

    /// Apply a completed swipe
    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<usize> {
        self.apply_intent(direction.intent())
    }

    /// Apply a discrete intent on the owner thread
    pub fn apply_intent(&mut self, intent: Intent) -> Result<usize> {
        match intent {
            Intent::Advance => self.advance(),
            Intent::Retreat => self.retreat(),
            Intent::Select(index) => self.select(index),
        }
    }

    /// Owner-thread re-entry point, called once per frame
    ///
    /// Applies queued intents first, then any autoplay ticks. A manual intent
    /// releases the timer, so ticks that accrued before it are discarded
    /// rather than applied against a stale index. Returns the number of
    /// transitions applied.
    pub fn pump(&mut self) -> usize {
        if !self.mounted {
            return 0;
        }

        let mut applied = 0;
        for intent in self.intents.drain() {
            match self.apply_intent(intent) {
                Ok(_) => applied += 1,
                Err(err) => tracing::trace!(?intent, %err, "intent not applied"),
            }
        }

        let ticks = self.autoplay.take_ticks();
        for _ in 0..ticks {
            if self.step(1, Origin::Auto).is_ok() {
                applied += 1;
            }
        }
        applied
    }

    // =========================================================================
    // Gesture handoff
    // =========================================================================

    /// Sender for intents produced off the owner thread
    pub fn intent_sender(&self) -> IntentSender {
        self.intent_tx.clone()
    }

    /// A pan tracker wired to this carousel, to be moved to the sampling thread
    pub fn pan_tracker(&self) -> PanTracker {
        PanTracker::new(self.intent_sender())
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Be told about every index change
    pub fn on_index_change<F>(&mut self, callback: F) -> ObserverId
    where
        F: Fn(&IndexChange) + Send + Sync + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Tear the carousel down
    ///
    /// Releases the autoplay timer and the offset tween, closes the intent
    /// queue and drops observers. Every later call is a no-op.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.autoplay.stop();
        self.slides = None;
        self.intents.close();
        self.observers.clear();
        tracing::debug!("carousel unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn slide_count(&self) -> usize {
        self.config.slide_count()
    }

    /// The slide being shown or transitioned to
    pub fn current_index(&self) -> Option<usize> {
        self.slides.as_ref().map(|s| s.index.current())
    }

    pub fn offset(&self) -> Option<f32> {
        self.slides.as_ref().map(|s| s.strip.offset())
    }

    pub fn target_offset(&self) -> Option<f32> {
        self.slides.as_ref().map(|s| s.strip.target_offset())
    }

    pub fn is_animating(&self) -> bool {
        self.slides.as_ref().is_some_and(|s| s.strip.is_animating())
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        self.autoplay.state()
    }

    /// Time until the next automatic advance
    pub fn next_autoplay_in(&self) -> Option<Duration> {
        self.autoplay.remaining()
    }

    /// Indicator strip for the current index
    pub fn indicators(&self) -> IndicatorLayout {
        render_indicators(
            self.current_index(),
            self.slide_count(),
            self.config.indicator_type,
            self.config.indicator_position,
        )
    }

    /// Everything needed to draw the carousel right now
    pub fn frame(&self) -> CarouselFrame {
        let width = self.viewport.width();
        let has_slides = self.slides.is_some();
        CarouselFrame {
            current_index: self.current_index(),
            slide_count: self.slide_count(),
            viewport_width: width,
            offset: self.offset(),
            target_offset: self.target_offset(),
            strip_width: width.map(|w| strip_width(self.slide_count(), w)),
            animating: self.is_animating(),
            autoplay: self.autoplay_state(),
            arrows: self.config.show_arrows && has_slides && width.is_some(),
            indicators: self.config.show_indicators.then(|| self.indicators()),
        }
    }
}

impl Drop for Carousel {
    fn drop(&mut self) {
        self.unmount();
    }
}
