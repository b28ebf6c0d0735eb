//! Scripted demo session
//!
//! Drives one carousel through a script on a frame loop. The simulated
//! clock advances by exactly one frame per iteration; the realtime clock
//! follows a tokio interval and the wall clock.

use crate::config::ShowcaseConfig;
use crate::render::Renderer;
use crate::screen::CarouselScreen;
use crate::script::{Action, Script};
use anyhow::{Context, Result};
use reel_animation::AnimationScheduler;
use reel_carousel::{Carousel, IndexChange, Origin};
use serde::Serialize;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// How a session is paced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    pub frame: Duration,
    pub duration: Duration,
    /// Follow the wall clock instead of stepping a simulated one
    pub realtime: bool,
}

impl SessionOptions {
    pub fn from_config(config: &ShowcaseConfig) -> Self {
        Self {
            frame: Duration::from_millis(config.session.frame_ms.max(1)),
            duration: Duration::from_millis(config.session.duration_ms),
            realtime: false,
        }
    }
}

/// What happened over a session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub elapsed_ms: u64,
    pub frames: u64,
    pub events: usize,
    pub transitions: usize,
    pub manual: usize,
    pub auto: usize,
    pub final_index: Option<usize>,
    pub slide_count: usize,
}

/// One carousel, its demo screen and a script to play against them
pub struct Session<W: Write> {
    scheduler: AnimationScheduler,
    carousel: Carousel,
    screen: CarouselScreen,
    script: Script,
    changes: Arc<Mutex<Vec<IndexChange>>>,
    renderer: Renderer<W>,
    options: SessionOptions,
    summary: SessionSummary,
}

impl<W: Write> Session<W> {
    /// Mount the carousel and run the first layout pass
    pub fn new(
        config: &ShowcaseConfig,
        script: Script,
        renderer: Renderer<W>,
        options: SessionOptions,
    ) -> Self {
        let scheduler = AnimationScheduler::new();
        let screen = CarouselScreen::from_config(&config.screen);
        let mut carousel = Carousel::new(scheduler.handle(), screen.carousel_config());
        carousel.set_viewport_width(config.viewport.width);

        let changes = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&changes);
        carousel.on_index_change(move |change| {
            if let Ok(mut log) = sink.lock() {
                log.push(*change);
            }
        });

        info!(
            slides = carousel.slide_count(),
            width = config.viewport.width,
            events = script.len(),
            "Session ready"
        );

        Self {
            scheduler,
            carousel,
            screen,
            script,
            changes,
            renderer,
            options,
            summary: SessionSummary::default(),
        }
    }

    /// Play the script until the session length has elapsed
    pub async fn run(mut self) -> Result<(SessionSummary, W)> {
        if self.options.realtime {
            let mut interval = tokio::time::interval(self.options.frame);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // First tick completes immediately
            interval.tick().await;
            self.scheduler.tick();
            while self.scheduler.elapsed() < self.options.duration {
                interval.tick().await;
                self.scheduler.tick();
                self.frame().await?;
            }
        } else {
            while self.scheduler.elapsed() < self.options.duration {
                let remaining = self.options.duration - self.scheduler.elapsed();
                self.scheduler.advance(remaining.min(self.options.frame));
                self.frame().await?;
                tokio::task::yield_now().await;
            }
        }

        self.finish()
    }

    /// One frame: due events, then the carousel's own work, then output
    async fn frame(&mut self) -> Result<()> {
        self.summary.frames += 1;
        let now = self.scheduler.elapsed();

        while let Some(event) = self.script.next_due(now) {
            self.summary.events += 1;
            self.renderer.action(now, &event.action)?;
            self.apply(&event.action).await?;
        }

        self.carousel.pump();
        self.flush_changes(now)
    }

    async fn apply(&mut self, action: &Action) -> Result<()> {
        debug!(?action, "Applying action");
        match action {
            Action::Swipe { dx, samples } => self.swipe(*dx, *samples).await?,
            Action::Next | Action::Prev if !self.carousel.frame().arrows => {
                debug!(?action, "Press ignored: arrows hidden");
            }
            Action::Next => log_rejected(self.carousel.advance()),
            Action::Prev => log_rejected(self.carousel.retreat()),
            Action::Tap { index } if !self.has_marker(*index) => {
                debug!(index, "Tap ignored: no such indicator marker");
            }
            Action::Tap { index } => log_rejected(self.carousel.select(*index)),
            Action::IntervalStep { delta } => {
                self.screen.step_interval(*delta);
                self.reconfigure();
            }
            Action::ImagesStep { delta } => {
                self.screen.step_images(*delta);
                self.reconfigure();
            }
            Action::AutoPlay { enabled } => {
                self.screen.set_auto_play(*enabled);
                self.reconfigure();
            }
            Action::Controls { enabled } => {
                self.screen.set_controls(*enabled);
                self.reconfigure();
            }
            Action::IndicatorType { value } => {
                self.screen.set_indicator_type(*value);
                self.reconfigure();
            }
            Action::IndicatorPosition { value } => {
                self.screen.set_indicator_position(*value);
                self.reconfigure();
            }
            Action::Layout { width } => self.carousel.set_viewport_width(*width),
        }
        Ok(())
    }

    /// Whether an indicator marker for `index` is on screen
    fn has_marker(&self, index: usize) -> bool {
        self.carousel.config().show_indicators && index < self.carousel.slide_count()
    }

    fn reconfigure(&mut self) {
        self.carousel.set_config(self.screen.carousel_config());
    }

    /// Sample a pan gesture on the blocking pool
    ///
    /// The tracker only sends an intent; the carousel picks it up on the
    /// next pump.
    async fn swipe(&mut self, dx: f32, samples: u32) -> Result<()> {
        let mut tracker = self.carousel.pan_tracker();
        let outcome = tokio::task::spawn_blocking(move || {
            tracker.begin();
            for step in 1..=samples {
                tracker.update(dx * step as f32 / samples as f32);
            }
            tracker.end()
        })
        .await
        .context("Gesture sampler failed")?;

        debug!(?outcome, dx, "Pan ended");
        Ok(())
    }

    fn flush_changes(&mut self, now: Duration) -> Result<()> {
        let changes = match self.changes.lock() {
            Ok(mut log) => std::mem::take(&mut *log),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        if changes.is_empty() {
            return Ok(());
        }

        let frame = self.carousel.frame();
        for change in &changes {
            self.summary.transitions += 1;
            match change.origin {
                Origin::Manual => self.summary.manual += 1,
                Origin::Auto => self.summary.auto += 1,
            }
            self.renderer.change(now, change, &frame)?;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<(SessionSummary, W)> {
        let elapsed = self.scheduler.elapsed();
        self.summary.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.summary.final_index = self.carousel.current_index();
        self.summary.slide_count = self.carousel.slide_count();

        if !self.script.is_empty() {
            warn!(
                remaining = self.script.len(),
                "Session ended before every event ran"
            );
        }

        self.carousel.unmount();
        self.renderer.summary(&self.summary)?;
        self.renderer.flush()?;
        info!(
            transitions = self.summary.transitions,
            frames = self.summary.frames,
            "Session finished"
        );

        let summary = self.summary.clone();
        Ok((summary, self.renderer.into_inner()))
    }
}

fn log_rejected(result: reel_carousel::Result<usize>) {
    if let Err(err) = result {
        debug!(%err, "Request ignored");
    }
}
